pub mod categories;
pub mod products;
pub mod reviews;
pub mod tags;

use axum::{
    extract::Request,
    http::{header, Method},
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use tower::{service_fn, ServiceExt};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::{metrics, types::Health};

use crate::{auth, openapi::ApiDoc, state::AppState};

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

fn product_routes(state: &AppState) -> Router<AppState> {
    // Only creation is guarded by the API key
    let create = post(products::create_product)
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_api_key));

    Router::new()
        .route(
            "/api/v1/products",
            create.get(products::list_products).options(products::product_options),
        )
        .route("/api/v1/products/search", get(products::search_by_name))
        .route("/api/v1/products/search/price", get(products::search_by_price))
        .route("/api/v1/products/search/advanced", get(products::search_advanced))
        .route("/api/v1/products/category/:category_id", get(products::by_category))
        .route("/api/v1/products/tag/:tag_id", get(products::by_tag))
        .route(
            "/api/v1/products/:id",
            get(products::get_product)
                .head(products::head_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/api/v1/products/:id/stock", patch(products::update_stock))
        .route("/api/v1/products/:id/tags", post(products::add_tags))
        .route("/api/v1/products/:id/specifications", post(products::add_specifications))
        .route("/api/v1/products/:id/images", post(products::add_images))
        .route("/api/v1/products/:id/reviews", post(reviews::add_review).get(reviews::list_reviews))
        .route("/api/v1/products/:id/reviews/summary", get(reviews::review_summary))
}

fn taxonomy_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/tags", get(tags::list).post(tags::create))
        .route("/api/v1/tags/:id", get(tags::get).put(tags::update).delete(tags::delete))
        .route("/api/v1/categories", get(categories::list).post(categories::create))
        .route(
            "/api/v1/categories/:id",
            get(categories::get).put(categories::update).delete(categories::delete),
        )
}

/// A CORS preflight carries `Origin` and `Access-Control-Request-Method`;
/// a bare OPTIONS request does not.
fn is_preflight(req: &Request) -> bool {
    req.method() == Method::OPTIONS
        && req.headers().contains_key(header::ORIGIN)
        && req.headers().contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}

/// Build the full application router: catalog API, health, metrics and docs.
pub fn build_router(state: AppState) -> Router {
    let app = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics::metrics_handler))
        .merge(product_routes(&state))
        .merge(taxonomy_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(middleware::from_fn(metrics::track_metrics));
    let with_cors = app.clone().layer(CorsLayer::very_permissive());

    // CorsLayer answers every OPTIONS itself; bare ones must reach the handlers
    let dispatch = service_fn(move |req: Request| {
        let target = if req.method() == Method::OPTIONS && !is_preflight(&req) { app.clone() } else { with_cors.clone() };
        target.oneshot(req)
    });

    Router::new()
        .fallback_service(dispatch)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx responses are logged at ERROR
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
