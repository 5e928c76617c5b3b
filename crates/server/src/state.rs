use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::{CategoryService, ProductService, ReviewService, TagService};

use crate::auth::ApiKeys;

#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
    pub categories: CategoryService,
    pub tags: TagService,
    pub reviews: ReviewService,
    pub api_keys: Arc<ApiKeys>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, api_keys: ApiKeys) -> Self {
        Self {
            products: ProductService::new(db.clone()),
            categories: CategoryService::new(db.clone()),
            tags: TagService::new(db.clone()),
            reviews: ReviewService::new(db),
            api_keys: Arc::new(api_keys),
        }
    }
}
