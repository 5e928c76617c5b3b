use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use models::review;

use crate::repository::ID_CHUNK;

/// Review totals for one product; average is derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingStats {
    pub rating_sum: i64,
    pub review_count: i64,
}

impl RatingStats {
    pub fn average(&self) -> f64 {
        if self.review_count == 0 {
            return 0.0;
        }
        self.rating_sum as f64 / self.review_count as f64
    }
}

#[derive(Debug, FromQueryResult)]
struct RatingRow {
    product_id: i32,
    rating_sum: Option<i64>,
    review_count: i64,
}

/// One grouped aggregate query for every product in `product_ids`.
/// Products without reviews are absent from the map.
pub async fn rating_stats<C: ConnectionTrait>(db: &C, product_ids: &[i32]) -> Result<HashMap<i32, RatingStats>, DbErr> {
    let mut stats = HashMap::new();
    for chunk in product_ids.chunks(ID_CHUNK) {
        let rows = review::Entity::find()
            .select_only()
            .column(review::Column::ProductId)
            .column_as(SimpleExpr::from(Func::sum(Expr::col((review::Entity, review::Column::Rating)))), "rating_sum")
            .column_as(SimpleExpr::from(Func::count(Expr::col((review::Entity, review::Column::Id)))), "review_count")
            .filter(review::Column::ProductId.is_in(chunk.iter().copied()))
            .group_by(review::Column::ProductId)
            .into_model::<RatingRow>()
            .all(db)
            .await?;
        stats.extend(rows.into_iter().map(|r| {
            (r.product_id, RatingStats { rating_sum: r.rating_sum.unwrap_or(0), review_count: r.review_count })
        }));
    }
    Ok(stats)
}

pub async fn rating_stats_for<C: ConnectionTrait>(db: &C, product_id: i32) -> Result<RatingStats, DbErr> {
    let stats = rating_stats(db, &[product_id]).await?;
    Ok(stats.get(&product_id).copied().unwrap_or_default())
}

pub async fn find_by_product_ids<C: ConnectionTrait>(db: &C, product_ids: &[i32]) -> Result<Vec<review::Model>, DbErr> {
    let mut found = Vec::new();
    for chunk in product_ids.chunks(ID_CHUNK) {
        let rows = review::Entity::find()
            .filter(review::Column::ProductId.is_in(chunk.iter().copied()))
            .order_by_asc(review::Column::Id)
            .all(db)
            .await?;
        found.extend(rows);
    }
    Ok(found)
}

pub async fn find_by_product<C: ConnectionTrait>(db: &C, product_id: i32) -> Result<Vec<review::Model>, DbErr> {
    find_by_product_ids(db, &[product_id]).await
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    product_id: i32,
    rating: i32,
    comment: Option<String>,
    author: Option<String>,
) -> Result<review::Model, DbErr> {
    review::ActiveModel {
        product_id: Set(product_id),
        rating: Set(rating),
        comment: Set(comment),
        author: Set(author),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::RatingStats;

    #[test]
    fn average_of_nothing_is_zero() {
        assert_eq!(RatingStats::default().average(), 0.0);
    }

    #[test]
    fn average_divides_sum_by_count() {
        let s = RatingStats { rating_sum: 9, review_count: 2 };
        assert!((s.average() - 4.5).abs() < f64::EPSILON);
    }
}
