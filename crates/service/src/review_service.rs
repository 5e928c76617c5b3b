use sea_orm::DatabaseConnection;
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{ReviewDto, ReviewSummary};
use crate::errors::ServiceError;
use crate::repository::{product_repo, review_repo};

#[derive(Clone)]
pub struct ReviewService {
    db: DatabaseConnection,
}

impl ReviewService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// The product may be inactive; it only has to exist.
    #[instrument(skip(self, dto), fields(rating = dto.rating))]
    pub async fn add_review(&self, product_id: i32, dto: ReviewDto) -> Result<ReviewDto, ServiceError> {
        dto.validate()?;
        if !product_repo::exists(&self.db, product_id).await? {
            return Err(ServiceError::not_found("Product", product_id));
        }
        let created = review_repo::insert(&self.db, product_id, dto.rating, dto.comment, dto.author).await?;
        info!(product_id, review_id = created.id, "review_added");
        Ok(created.into())
    }

    /// Every review of the product ordered by id; an unknown product yields none.
    pub async fn list_reviews(&self, product_id: i32) -> Result<Vec<ReviewDto>, ServiceError> {
        let rows = review_repo::find_by_product(&self.db, product_id).await?;
        Ok(rows.into_iter().map(ReviewDto::from).collect())
    }

    pub async fn review_summary(&self, product_id: i32) -> Result<ReviewSummary, ServiceError> {
        let stats = review_repo::rating_stats_for(&self.db, product_id).await?;
        Ok(ReviewSummary { average_rating: stats.average(), total_reviews: stats.review_count as i32 })
    }
}
