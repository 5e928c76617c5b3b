#![cfg(test)]
use sea_orm::DatabaseConnection;

use crate::dto::{CategoryDto, ProductRequest, TagDto};
use crate::{CategoryService, ProductService, ReviewService, TagService};

/// Each test gets its own migrated in-memory database.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}

pub struct Services {
    pub products: ProductService,
    pub categories: CategoryService,
    pub tags: TagService,
    pub reviews: ReviewService,
}

pub async fn services() -> Result<Services, anyhow::Error> {
    let db = get_db().await?;
    Ok(Services {
        products: ProductService::new(db.clone()),
        categories: CategoryService::new(db.clone()),
        tags: TagService::new(db.clone()),
        reviews: ReviewService::new(db),
    })
}

pub fn product_req(name: &str, price: f64) -> ProductRequest {
    ProductRequest {
        name: name.to_string(),
        description: Some(format!("{name} description")),
        price: Some(price),
        stock_quantity: Some(5),
        ..Default::default()
    }
}

pub fn category_dto(name: &str) -> CategoryDto {
    CategoryDto { id: None, name: name.to_string(), description: None, active: None }
}

pub fn tag_dto(name: &str) -> TagDto {
    TagDto { id: None, name: name.to_string() }
}
