use std::collections::BTreeMap;

use utoipa::OpenApi;
use utoipa::ToSchema;

use service::dto::{CategoryDto, ProductRequest, ProductResponse, ReviewDto, ReviewSummary, TagDto};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Body of `POST /api/v1/products/{id}/specifications`.
#[derive(ToSchema)]
pub struct SpecificationsDoc(pub BTreeMap<String, String>);

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::create_product,
        crate::routes::products::list_products,
        crate::routes::products::product_options,
        crate::routes::products::get_product,
        crate::routes::products::head_product,
        crate::routes::products::update_product,
        crate::routes::products::delete_product,
        crate::routes::products::update_stock,
        crate::routes::products::add_tags,
        crate::routes::products::add_specifications,
        crate::routes::products::add_images,
        crate::routes::products::search_by_name,
        crate::routes::products::search_by_price,
        crate::routes::products::search_advanced,
        crate::routes::products::by_category,
        crate::routes::products::by_tag,
        crate::routes::reviews::add_review,
        crate::routes::reviews::list_reviews,
        crate::routes::reviews::review_summary,
        crate::routes::tags::list,
        crate::routes::tags::create,
        crate::routes::tags::get,
        crate::routes::tags::update,
        crate::routes::tags::delete,
        crate::routes::categories::list,
        crate::routes::categories::create,
        crate::routes::categories::get,
        crate::routes::categories::update,
        crate::routes::categories::delete,
    ),
    components(
        schemas(
            HealthResponse,
            SpecificationsDoc,
            ProductRequest,
            ProductResponse,
            CategoryDto,
            TagDto,
            ReviewDto,
            ReviewSummary,
        )
    ),
    tags(
        (name = "health"),
        (name = "products"),
        (name = "reviews"),
        (name = "tags"),
        (name = "categories")
    )
)]
pub struct ApiDoc;
