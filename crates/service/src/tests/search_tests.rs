use std::collections::BTreeSet;

use anyhow::Result;

use crate::dto::{ProductRequest, ReviewDto};
use crate::search::ProductSearch;
use crate::test_support::{category_dto, product_req, services, tag_dto};

fn review(rating: i32) -> ReviewDto {
    ReviewDto { id: None, rating, comment: None, author: None, created_at: None }
}

fn names(list: &[crate::dto::ProductResponse]) -> Vec<&str> {
    list.iter().map(|p| p.name.as_str()).collect()
}

#[tokio::test]
async fn price_range_is_inclusive_and_active_only() -> Result<()> {
    let s = services().await?;
    for (name, price) in [("Five", 5.0), ("Fifteen", 15.0), ("Twenty-five", 25.0), ("Twenty", 20.0)] {
        s.products.create_product(product_req(name, price)).await?;
    }
    let twenty = s.products.search_by_name("twenty").await?;
    let hidden = twenty.iter().find(|p| p.name == "Twenty").map(|p| p.id).unwrap();
    s.products.delete_product(hidden).await?;

    let hits = s.products.search_by_price_range(10.0, 20.0).await?;
    assert_eq!(names(&hits), vec!["Fifteen"]);

    let edges = s.products.search_by_price_range(5.0, 15.0).await?;
    assert_eq!(names(&edges), vec!["Five", "Fifteen"]);
    Ok(())
}

#[tokio::test]
async fn name_search_ignores_case_and_active_flag() -> Result<()> {
    let s = services().await?;
    let lamp = s.products.create_product(product_req("Desk LAMP", 10.0)).await?;
    s.products.create_product(product_req("Floor lamp", 10.0)).await?;
    s.products.create_product(product_req("Chair", 10.0)).await?;
    s.products.delete_product(lamp.id).await?;

    let hits = s.products.search_by_name("Lamp").await?;
    assert_eq!(names(&hits), vec!["Desk LAMP", "Floor lamp"]);

    // LIKE wildcards in the needle are literal
    assert!(s.products.search_by_name("%").await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn by_category_and_by_tag() -> Result<()> {
    let s = services().await?;
    let cat = s.categories.create_category(category_dto("Office")).await?.id;
    let tag = s.tags.create_tag(tag_dto("wood")).await?.id.unwrap();
    let desk = s
        .products
        .create_product(ProductRequest { category_id: cat, tag_ids: Some(BTreeSet::from([tag])), ..product_req("Desk", 99.0) })
        .await?;
    s.products.create_product(product_req("Mug", 4.0)).await?;
    s.products.delete_product(desk.id).await?;

    let in_cat = s.products.products_by_category(cat.unwrap()).await?;
    assert_eq!(names(&in_cat), vec!["Desk"]);
    let tagged = s.products.products_by_tag(tag).await?;
    assert_eq!(names(&tagged), vec!["Desk"]);
    assert!(s.products.products_by_tag(tag + 100).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn advanced_search_ands_filters() -> Result<()> {
    let s = services().await?;
    let cat = s.categories.create_category(category_dto("Audio")).await?.id;
    let t_wireless = s.tags.create_tag(tag_dto("wireless")).await?.id.unwrap();
    let t_studio = s.tags.create_tag(tag_dto("studio")).await?.id.unwrap();

    s.products
        .create_product(ProductRequest {
            category_id: cat,
            tag_ids: Some(BTreeSet::from([t_wireless])),
            reviews: Some(vec![review(5), review(4)]),
            ..product_req("Wireless Headphones", 120.0)
        })
        .await?;
    s.products
        .create_product(ProductRequest {
            category_id: cat,
            tag_ids: Some(BTreeSet::from([t_studio])),
            reviews: Some(vec![review(2)]),
            ..product_req("Studio Headphones", 80.0)
        })
        .await?;
    s.products.create_product(product_req("Cheap Earbuds", 10.0)).await?;

    let all = s.products.search_products(&ProductSearch::default()).await?;
    assert_eq!(all.len(), 3);

    let rated = ProductSearch { min_rating: Some(4.0), ..Default::default() };
    assert_eq!(names(&s.products.search_products(&rated).await?), vec!["Wireless Headphones"]);

    let zero_floor = ProductSearch { min_rating: Some(0.0), ..Default::default() };
    assert_eq!(s.products.search_products(&zero_floor).await?.len(), 3);

    let tagged = ProductSearch { tag_ids: Some(BTreeSet::from([t_wireless, t_studio])), ..Default::default() };
    assert_eq!(s.products.search_products(&tagged).await?.len(), 2);

    let combined = ProductSearch {
        name: Some("headphones".into()),
        min_price: Some(50.0),
        max_price: Some(100.0),
        category_id: cat,
        ..Default::default()
    };
    let hits = s.products.search_products(&combined).await?;
    assert_eq!(names(&hits), vec!["Studio Headphones"]);
    assert_eq!(hits[0].total_reviews, 1);
    assert_eq!(hits[0].average_rating, 2.0);
    Ok(())
}
