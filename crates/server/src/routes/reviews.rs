use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use service::dto::{ReviewDto, ReviewSummary};

use crate::{errors::JsonApiError, extractors::ValidatedJson, state::AppState};

/// Paging parameters are accepted for compatibility; the full list is returned.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReviewListQuery {
    pub page: Option<u64>,
    pub size: Option<u64>,
}

#[utoipa::path(
    post, path = "/api/v1/products/{id}/reviews", tag = "reviews",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ReviewDto,
    responses(
        (status = 200, description = "Review added", body = ReviewDto),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Product not found")
    )
)]
pub async fn add_review(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    ValidatedJson(dto): ValidatedJson<ReviewDto>,
) -> Result<Json<ReviewDto>, JsonApiError> {
    let created = state.reviews.add_review(product_id, dto).await?;
    info!(product_id, review_id = ?created.id, "added review");
    Ok(Json(created))
}

#[utoipa::path(
    get, path = "/api/v1/products/{id}/reviews", tag = "reviews",
    params(
        ("id" = i32, Path, description = "Product id"),
        ReviewListQuery
    ),
    responses((status = 200, description = "Reviews ordered by id", body = [ReviewDto]))
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
    Query(_q): Query<ReviewListQuery>,
) -> Result<Json<Vec<ReviewDto>>, JsonApiError> {
    Ok(Json(state.reviews.list_reviews(product_id).await?))
}

#[utoipa::path(
    get, path = "/api/v1/products/{id}/reviews/summary", tag = "reviews",
    params(("id" = i32, Path, description = "Product id")),
    responses((status = 200, description = "Average rating and count", body = ReviewSummary))
)]
pub async fn review_summary(
    State(state): State<AppState>,
    Path(product_id): Path<i32>,
) -> Result<Json<ReviewSummary>, JsonApiError> {
    Ok(Json(state.reviews.review_summary(product_id).await?))
}
