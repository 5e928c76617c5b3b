use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use service::dto::TagDto;

use crate::{errors::JsonApiError, extractors::ValidatedJson, state::AppState};

#[utoipa::path(
    get, path = "/api/v1/tags", tag = "tags",
    responses((status = 200, description = "Active tags", body = [TagDto]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TagDto>>, JsonApiError> {
    Ok(Json(state.tags.list_tags().await?))
}

#[utoipa::path(
    post, path = "/api/v1/tags", tag = "tags",
    request_body = TagDto,
    responses((status = 201, description = "Created", body = TagDto), (status = 400, description = "Validation Error"))
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<TagDto>,
) -> Result<(StatusCode, Json<TagDto>), JsonApiError> {
    let created = state.tags.create_tag(dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/v1/tags/{id}", tag = "tags",
    params(("id" = i32, Path, description = "Tag id")),
    responses((status = 200, description = "OK", body = TagDto), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<TagDto>, JsonApiError> {
    Ok(Json(state.tags.get_tag(id).await?))
}

#[utoipa::path(
    put, path = "/api/v1/tags/{id}", tag = "tags",
    params(("id" = i32, Path, description = "Tag id")),
    request_body = TagDto,
    responses(
        (status = 200, description = "Updated", body = TagDto),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<TagDto>,
) -> Result<Json<TagDto>, JsonApiError> {
    Ok(Json(state.tags.update_tag(id, dto).await?))
}

#[utoipa::path(
    delete, path = "/api/v1/tags/{id}", tag = "tags",
    params(("id" = i32, Path, description = "Tag id")),
    responses((status = 204, description = "Deactivated"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.tags.delete_tag(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
