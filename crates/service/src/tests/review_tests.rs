use anyhow::Result;

use crate::dto::ReviewDto;
use crate::errors::ServiceError;
use crate::test_support::{product_req, services};

fn review(rating: i32, author: &str) -> ReviewDto {
    ReviewDto { id: None, rating, comment: Some("ok".into()), author: Some(author.into()), created_at: None }
}

#[tokio::test]
async fn add_review_updates_aggregates() -> Result<()> {
    let s = services().await?;
    let p = s.products.create_product(product_req("Toaster", 30.0)).await?;

    let added = s.reviews.add_review(p.id, review(5, "a")).await?;
    assert!(added.id.is_some());
    assert!(added.created_at.is_some());
    s.reviews.add_review(p.id, review(2, "b")).await?;

    let summary = s.reviews.review_summary(p.id).await?;
    assert_eq!(summary.total_reviews, 2);
    assert_eq!(summary.average_rating, 3.5);

    let projected = s.products.get_product(p.id).await?;
    assert_eq!(projected.total_reviews, 2);
    assert_eq!(projected.average_rating, 3.5);
    assert_eq!(projected.reviews.iter().map(|r| r.rating).collect::<Vec<_>>(), vec![5, 2]);
    Ok(())
}

#[tokio::test]
async fn reviews_on_inactive_products_are_allowed() -> Result<()> {
    let s = services().await?;
    let p = s.products.create_product(product_req("Old Radio", 15.0)).await?;
    s.products.delete_product(p.id).await?;
    s.reviews.add_review(p.id, review(3, "c")).await?;
    assert_eq!(s.reviews.review_summary(p.id).await?.total_reviews, 1);
    Ok(())
}

#[tokio::test]
async fn add_review_rejects_bad_input() -> Result<()> {
    let s = services().await?;
    assert!(matches!(s.reviews.add_review(404, review(3, "x")).await, Err(ServiceError::NotFound(_))));

    let p = s.products.create_product(product_req("Blender", 45.0)).await?;
    assert!(matches!(s.reviews.add_review(p.id, review(6, "x")).await, Err(ServiceError::Validation(_))));
    assert!(matches!(s.reviews.add_review(p.id, review(0, "x")).await, Err(ServiceError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn list_reviews_returns_every_review_by_id() -> Result<()> {
    let s = services().await?;
    let p = s.products.create_product(product_req("Speaker", 60.0)).await?;
    for i in 0..15 {
        s.reviews.add_review(p.id, review(1 + i % 5, &format!("r{i}"))).await?;
    }

    let all = s.reviews.list_reviews(p.id).await?;
    assert_eq!(all.len(), 15);
    let authors: Vec<String> = all.iter().filter_map(|r| r.author.clone()).collect();
    let expected: Vec<String> = (0..15).map(|i| format!("r{i}")).collect();
    assert_eq!(authors, expected);
    Ok(())
}

#[tokio::test]
async fn unknown_product_has_empty_reviews_and_zero_summary() -> Result<()> {
    let s = services().await?;
    assert!(s.reviews.list_reviews(99).await?.is_empty());
    let summary = s.reviews.review_summary(99).await?;
    assert_eq!(summary.total_reviews, 0);
    assert_eq!(summary.average_rating, 0.0);
    Ok(())
}
