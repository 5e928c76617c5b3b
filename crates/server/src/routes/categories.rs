use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use service::dto::CategoryDto;

use crate::{errors::JsonApiError, extractors::ValidatedJson, state::AppState};

#[utoipa::path(
    get, path = "/api/v1/categories", tag = "categories",
    responses((status = 200, description = "Active categories", body = [CategoryDto]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<CategoryDto>>, JsonApiError> {
    Ok(Json(state.categories.list_categories().await?))
}

#[utoipa::path(
    post, path = "/api/v1/categories", tag = "categories",
    request_body = CategoryDto,
    responses((status = 201, description = "Created", body = CategoryDto), (status = 400, description = "Validation Error"))
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CategoryDto>,
) -> Result<(StatusCode, Json<CategoryDto>), JsonApiError> {
    let created = state.categories.create_category(dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/v1/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses((status = 200, description = "OK", body = CategoryDto), (status = 404, description = "Not Found"))
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<CategoryDto>, JsonApiError> {
    Ok(Json(state.categories.get_category(id).await?))
}

#[utoipa::path(
    put, path = "/api/v1/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    request_body = CategoryDto,
    responses(
        (status = 200, description = "Updated", body = CategoryDto),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
/// Name and description are replaced; `active` is applied only when present.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<CategoryDto>,
) -> Result<Json<CategoryDto>, JsonApiError> {
    Ok(Json(state.categories.update_category(id, dto).await?))
}

#[utoipa::path(
    delete, path = "/api/v1/categories/{id}", tag = "categories",
    params(("id" = i32, Path, description = "Category id")),
    responses((status = 204, description = "Deactivated"), (status = 404, description = "Not Found"))
)]
/// Soft delete. Products keep their reference.
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.categories.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
