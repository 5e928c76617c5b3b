//! Turns persisted products into `ProductResponse` values.
//!
//! Relations and review aggregates are loaded once per batch, so projecting
//! n products costs a fixed number of queries.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use sea_orm::{ConnectionTrait, DbErr};

use models::product;

use crate::dto::{CategoryDto, ProductResponse, ReviewDto, TagDto};
use crate::repository::{category_repo, product_repo, review_repo};

pub async fn project_one<C: ConnectionTrait>(db: &C, product: product::Model) -> Result<ProductResponse, DbErr> {
    let mut all = project_all(db, vec![product]).await?;
    all.pop().ok_or_else(|| DbErr::Custom("projection produced no rows".into()))
}

/// Output order matches input order.
pub async fn project_all<C: ConnectionTrait>(db: &C, products: Vec<product::Model>) -> Result<Vec<ProductResponse>, DbErr> {
    if products.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i32> = products.iter().map(|p| p.id).collect();
    let category_ids: Vec<i32> = products
        .iter()
        .filter_map(|p| p.category_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let categories: HashMap<i32, CategoryDto> = category_repo::find_by_ids(db, &category_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, CategoryDto::from(c)))
        .collect();

    let mut tags: HashMap<i32, BTreeMap<i32, TagDto>> = HashMap::new();
    for (product_id, tag) in product_repo::tags_for(db, &ids).await? {
        tags.entry(product_id).or_default().insert(tag.id, TagDto::from(tag));
    }

    let mut reviews: HashMap<i32, Vec<ReviewDto>> = HashMap::new();
    for r in review_repo::find_by_product_ids(db, &ids).await? {
        reviews.entry(r.product_id).or_default().push(ReviewDto::from(r));
    }

    let mut images: HashMap<i32, Vec<String>> = HashMap::new();
    for img in product_repo::images_for(db, &ids).await? {
        images.entry(img.product_id).or_default().push(img.url);
    }

    let mut specs: HashMap<i32, BTreeMap<String, String>> = HashMap::new();
    for s in product_repo::specifications_for(db, &ids).await? {
        specs.entry(s.product_id).or_default().insert(s.spec_key, s.spec_value);
    }

    let stats = review_repo::rating_stats(db, &ids).await?;

    Ok(products
        .into_iter()
        .map(|p| {
            let stat = stats.get(&p.id).copied().unwrap_or_default();
            ProductResponse {
                id: p.id,
                name: p.name,
                description: p.description,
                price: p.price,
                stock_quantity: p.stock_quantity,
                created_at: p.created_at,
                updated_at: p.updated_at,
                active: p.active,
                category: p.category_id.and_then(|cid| categories.get(&cid).cloned()),
                tags: tags.remove(&p.id).map(|t| t.into_values().collect()).unwrap_or_default(),
                reviews: reviews.remove(&p.id).unwrap_or_default(),
                image_urls: images.remove(&p.id).unwrap_or_default(),
                specifications: specs.remove(&p.id).unwrap_or_default(),
                average_rating: stat.average(),
                total_reviews: stat.review_count as i32,
            }
        })
        .collect())
}
