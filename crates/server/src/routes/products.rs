use std::collections::{BTreeMap, BTreeSet};

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use service::dto::{ProductRequest, ProductResponse};
use service::search::ProductSearch;

use crate::{errors::JsonApiError, extractors::ValidatedJson, state::AppState};

pub const RESOURCE_ID_HEADER: &str = "x-resource-id";
pub const ALLOWED_METHODS: &str = "GET,POST,PUT,DELETE,HEAD,OPTIONS,PATCH";

/// Accepted for compatibility; listing is not paginated.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub sort_by: Option<String>,
    pub page: Option<u64>,
    pub size: Option<u64>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    pub name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuery {
    pub min_price: f64,
    pub max_price: f64,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedQuery {
    pub name: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub category_id: Option<i32>,
    /// Comma separated, e.g. `1,2,3`.
    pub tag_ids: Option<String>,
    pub min_rating: Option<f64>,
}

impl AdvancedQuery {
    fn into_search(self) -> Result<ProductSearch, JsonApiError> {
        let tag_ids = match self.tag_ids.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(parse_id_list(raw)?),
            None => None,
        };
        Ok(ProductSearch {
            name: self.name.filter(|n| !n.is_empty()),
            min_price: self.min_price,
            max_price: self.max_price,
            category_id: self.category_id,
            tag_ids,
            min_rating: self.min_rating,
        })
    }
}

fn parse_id_list(raw: &str) -> Result<BTreeSet<i32>, JsonApiError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>().map_err(|_| {
                JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(format!("invalid tag id: {s}")))
            })
        })
        .collect()
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StockQuery {
    pub quantity: i32,
}

#[utoipa::path(
    post, path = "/api/v1/products", tag = "products",
    request_body = ProductRequest,
    params(("X-API-Key" = String, Header, description = "API key")),
    responses(
        (status = 201, description = "Created", body = ProductResponse),
        (status = 400, description = "Validation Error"),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Referenced category or tag not found")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<ProductRequest>,
) -> Result<impl IntoResponse, JsonApiError> {
    let created = state.products.create_product(req).await?;
    info!(id = created.id, "created product");
    let headers = [(RESOURCE_ID_HEADER, created.id.to_string())];
    Ok((StatusCode::CREATED, headers, Json(created)))
}

#[utoipa::path(
    get, path = "/api/v1/products", tag = "products",
    params(ListQuery),
    responses((status = 200, description = "Active products", body = [ProductResponse]))
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(_q): Query<ListQuery>,
) -> Result<Json<Vec<ProductResponse>>, JsonApiError> {
    Ok(Json(state.products.list_products().await?))
}

#[utoipa::path(
    options, path = "/api/v1/products", tag = "products",
    responses((status = 200, description = "Allowed methods in the Allow header"))
)]
pub async fn product_options() -> impl IntoResponse {
    (StatusCode::OK, [(header::ALLOW, ALLOWED_METHODS)])
}

#[utoipa::path(
    get, path = "/api/v1/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "OK", body = ProductResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_product(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<ProductResponse>, JsonApiError> {
    Ok(Json(state.products.get_product(id).await?))
}

#[utoipa::path(
    head, path = "/api/v1/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses((status = 200, description = "Exists"), (status = 404, description = "Not Found"))
)]
pub async fn head_product(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    if state.products.product_exists(id).await? {
        Ok(StatusCode::OK)
    } else {
        Ok(StatusCode::NOT_FOUND)
    }
}

#[utoipa::path(
    put, path = "/api/v1/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Updated", body = ProductResponse),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<ProductRequest>,
) -> Result<Json<ProductResponse>, JsonApiError> {
    Ok(Json(state.products.update_product(id, req).await?))
}

#[utoipa::path(
    delete, path = "/api/v1/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    responses((status = 204, description = "Deactivated"), (status = 404, description = "Not Found"))
)]
pub async fn delete_product(State(state): State<AppState>, Path(id): Path<i32>) -> Result<StatusCode, JsonApiError> {
    state.products.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch, path = "/api/v1/products/{id}/stock", tag = "products",
    params(("id" = i32, Path, description = "Product id"), StockQuery),
    responses(
        (status = 204, description = "Stock updated"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(q): Query<StockQuery>,
) -> Result<StatusCode, JsonApiError> {
    state.products.update_stock(id, q.quantity).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/api/v1/products/{id}/tags", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = Vec<i32>,
    responses((status = 200, description = "Tags added", body = ProductResponse), (status = 404, description = "Not Found"))
)]
pub async fn add_tags(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(tag_ids): Json<BTreeSet<i32>>,
) -> Result<Json<ProductResponse>, JsonApiError> {
    Ok(Json(state.products.add_tags(id, tag_ids).await?))
}

#[utoipa::path(
    post, path = "/api/v1/products/{id}/specifications", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = crate::openapi::SpecificationsDoc,
    responses((status = 200, description = "Merged", body = ProductResponse), (status = 404, description = "Not Found"))
)]
pub async fn add_specifications(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(specs): Json<BTreeMap<String, String>>,
) -> Result<Json<ProductResponse>, JsonApiError> {
    Ok(Json(state.products.add_specifications(id, specs).await?))
}

#[utoipa::path(
    post, path = "/api/v1/products/{id}/images", tag = "products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = Vec<String>,
    responses((status = 200, description = "Appended", body = ProductResponse), (status = 404, description = "Not Found"))
)]
pub async fn add_images(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(urls): Json<Vec<String>>,
) -> Result<Json<ProductResponse>, JsonApiError> {
    Ok(Json(state.products.add_images(id, urls).await?))
}

#[utoipa::path(
    get, path = "/api/v1/products/search", tag = "products",
    params(NameQuery),
    responses((status = 200, description = "Matches", body = [ProductResponse]))
)]
pub async fn search_by_name(
    State(state): State<AppState>,
    Query(q): Query<NameQuery>,
) -> Result<Json<Vec<ProductResponse>>, JsonApiError> {
    Ok(Json(state.products.search_by_name(&q.name).await?))
}

#[utoipa::path(
    get, path = "/api/v1/products/search/price", tag = "products",
    params(PriceQuery),
    responses((status = 200, description = "Active products in range", body = [ProductResponse]))
)]
pub async fn search_by_price(
    State(state): State<AppState>,
    Query(q): Query<PriceQuery>,
) -> Result<Json<Vec<ProductResponse>>, JsonApiError> {
    Ok(Json(state.products.search_by_price_range(q.min_price, q.max_price).await?))
}

#[utoipa::path(
    get, path = "/api/v1/products/search/advanced", tag = "products",
    params(AdvancedQuery),
    responses(
        (status = 200, description = "Matches", body = [ProductResponse]),
        (status = 400, description = "Malformed tagIds")
    )
)]
pub async fn search_advanced(
    State(state): State<AppState>,
    Query(q): Query<AdvancedQuery>,
) -> Result<Json<Vec<ProductResponse>>, JsonApiError> {
    let search = q.into_search()?;
    Ok(Json(state.products.search_products(&search).await?))
}

#[utoipa::path(
    get, path = "/api/v1/products/category/{category_id}", tag = "products",
    params(("category_id" = i32, Path, description = "Category id")),
    responses((status = 200, description = "Products in category", body = [ProductResponse]))
)]
pub async fn by_category(
    State(state): State<AppState>,
    Path(category_id): Path<i32>,
) -> Result<Json<Vec<ProductResponse>>, JsonApiError> {
    Ok(Json(state.products.products_by_category(category_id).await?))
}

#[utoipa::path(
    get, path = "/api/v1/products/tag/{tag_id}", tag = "products",
    params(("tag_id" = i32, Path, description = "Tag id")),
    responses((status = 200, description = "Products carrying the tag", body = [ProductResponse]))
)]
pub async fn by_tag(
    State(state): State<AppState>,
    Path(tag_id): Path<i32>,
) -> Result<Json<Vec<ProductResponse>>, JsonApiError> {
    Ok(Json(state.products.products_by_tag(tag_id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_id_list_parses_and_dedups() {
        let ids = parse_id_list("3, 1,3,,2").unwrap();
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(parse_id_list("1,x").is_err());
    }

    #[test]
    fn blank_advanced_params_are_absent() {
        let q = AdvancedQuery {
            name: Some(String::new()),
            min_price: None,
            max_price: None,
            category_id: None,
            tag_ids: Some(" ".into()),
            min_rating: None,
        };
        assert!(q.into_search().unwrap().is_empty());
    }
}
