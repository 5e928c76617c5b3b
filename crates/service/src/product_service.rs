use std::collections::{BTreeMap, BTreeSet};

use sea_orm::{ConnectionTrait, DatabaseConnection, Set, TransactionTrait};
use tracing::{info, instrument};
use validator::Validate;

use models::{category, product, tag};

use crate::dto::{ProductRequest, ProductResponse};
use crate::errors::ServiceError;
use crate::projection::{project_all, project_one};
use crate::repository::product_repo::{self, ProductFields};
use crate::repository::{category_repo, review_repo, tag_repo};
use crate::search::ProductSearch;

/// Product use cases. Every mutation runs in one transaction.
#[derive(Clone)]
pub struct ProductService {
    db: DatabaseConnection,
}

impl ProductService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    #[instrument(skip(self, req), fields(name = %req.name))]
    pub async fn create_product(&self, req: ProductRequest) -> Result<ProductResponse, ServiceError> {
        req.validate()?;
        let fields = scalar_fields(&req)?;
        let txn = self.db.begin().await?;

        let category = match req.category_id {
            Some(id) => Some(resolve_category(&txn, id).await?),
            None => None,
        };
        let tag_ids = req.tag_ids.unwrap_or_default();
        resolve_tags(&txn, &tag_ids).await?;

        let created = product_repo::insert(&txn, fields, category.map(|c| c.id)).await?;
        product_repo::link_tags(&txn, created.id, &tag_ids).await?;
        product_repo::append_images(&txn, created.id, &req.image_urls.unwrap_or_default()).await?;
        product_repo::merge_specifications(&txn, created.id, &req.specifications.unwrap_or_default()).await?;
        for r in req.reviews.unwrap_or_default() {
            review_repo::insert(&txn, created.id, r.rating, r.comment, r.author).await?;
        }

        let resp = project_one(&txn, created).await?;
        txn.commit().await?;
        info!(product_id = resp.id, "product_created");
        Ok(resp)
    }

    pub async fn get_product(&self, id: i32) -> Result<ProductResponse, ServiceError> {
        let found = find_product(&self.db, id).await?;
        Ok(project_one(&self.db, found).await?)
    }

    /// Active products ordered by id.
    pub async fn list_products(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        let rows = product_repo::find_active(&self.db).await?;
        Ok(project_all(&self.db, rows).await?)
    }

    /// Replaces scalars and (when given) the category; tags, images and
    /// specifications are merged. Reviews in the payload are ignored.
    #[instrument(skip(self, req))]
    pub async fn update_product(&self, id: i32, req: ProductRequest) -> Result<ProductResponse, ServiceError> {
        req.validate()?;
        let fields = scalar_fields(&req)?;
        let txn = self.db.begin().await?;

        let existing = find_product(&txn, id).await?;
        let category = match req.category_id {
            Some(cid) => Some(resolve_category(&txn, cid).await?),
            None => None,
        };
        let tag_ids = req.tag_ids.unwrap_or_default();
        resolve_tags(&txn, &tag_ids).await?;

        let mut am: product::ActiveModel = existing.into();
        am.name = Set(fields.name);
        am.description = Set(fields.description);
        am.price = Set(fields.price);
        am.stock_quantity = Set(fields.stock_quantity);
        if let Some(c) = category {
            am.category_id = Set(Some(c.id));
        }
        let updated = product_repo::save_touched(&txn, am).await?;
        product_repo::link_tags(&txn, id, &tag_ids).await?;
        product_repo::append_images(&txn, id, &req.image_urls.unwrap_or_default()).await?;
        product_repo::merge_specifications(&txn, id, &req.specifications.unwrap_or_default()).await?;

        let resp = project_one(&txn, updated).await?;
        txn.commit().await?;
        info!(product_id = id, "product_updated");
        Ok(resp)
    }

    /// Soft delete: the row stays, `active` becomes false.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        let mut am: product::ActiveModel = find_product(&txn, id).await?.into();
        am.active = Set(false);
        product_repo::save_touched(&txn, am).await?;
        txn.commit().await?;
        info!(product_id = id, "product_deactivated");
        Ok(())
    }

    pub async fn product_exists(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(product_repo::exists(&self.db, id).await?)
    }

    /// All-or-nothing: one unknown tag id leaves the product untouched.
    #[instrument(skip(self))]
    pub async fn add_tags(&self, id: i32, tag_ids: BTreeSet<i32>) -> Result<ProductResponse, ServiceError> {
        let txn = self.db.begin().await?;
        let existing = find_product(&txn, id).await?;
        resolve_tags(&txn, &tag_ids).await?;
        product_repo::link_tags(&txn, id, &tag_ids).await?;
        let touched = product_repo::touch(&txn, existing).await?;
        let resp = project_one(&txn, touched).await?;
        txn.commit().await?;
        info!(product_id = id, count = tag_ids.len(), "product_tags_added");
        Ok(resp)
    }

    #[instrument(skip(self, specs))]
    pub async fn add_specifications(&self, id: i32, specs: BTreeMap<String, String>) -> Result<ProductResponse, ServiceError> {
        let txn = self.db.begin().await?;
        let existing = find_product(&txn, id).await?;
        product_repo::merge_specifications(&txn, id, &specs).await?;
        let touched = product_repo::touch(&txn, existing).await?;
        let resp = project_one(&txn, touched).await?;
        txn.commit().await?;
        info!(product_id = id, count = specs.len(), "product_specifications_merged");
        Ok(resp)
    }

    #[instrument(skip(self, urls))]
    pub async fn add_images(&self, id: i32, urls: Vec<String>) -> Result<ProductResponse, ServiceError> {
        let txn = self.db.begin().await?;
        let existing = find_product(&txn, id).await?;
        product_repo::append_images(&txn, id, &urls).await?;
        let touched = product_repo::touch(&txn, existing).await?;
        let resp = project_one(&txn, touched).await?;
        txn.commit().await?;
        info!(product_id = id, count = urls.len(), "product_images_added");
        Ok(resp)
    }

    #[instrument(skip(self))]
    pub async fn update_stock(&self, id: i32, quantity: i32) -> Result<(), ServiceError> {
        product::validate_stock_quantity(quantity)?;
        let txn = self.db.begin().await?;
        let mut am: product::ActiveModel = find_product(&txn, id).await?.into();
        am.stock_quantity = Set(quantity);
        product_repo::save_touched(&txn, am).await?;
        txn.commit().await?;
        info!(product_id = id, quantity, "product_stock_updated");
        Ok(())
    }

    pub async fn products_by_category(&self, category_id: i32) -> Result<Vec<ProductResponse>, ServiceError> {
        let rows = product_repo::find_by_category(&self.db, category_id).await?;
        Ok(project_all(&self.db, rows).await?)
    }

    pub async fn products_by_tag(&self, tag_id: i32) -> Result<Vec<ProductResponse>, ServiceError> {
        let rows = product_repo::find_by_tag(&self.db, tag_id).await?;
        Ok(project_all(&self.db, rows).await?)
    }

    /// Active flag is not applied here; inactive products match too.
    #[instrument(skip(self))]
    pub async fn search_products(&self, search: &ProductSearch) -> Result<Vec<ProductResponse>, ServiceError> {
        let rows = product_repo::find_matching(&self.db, search.to_condition()).await?;
        Ok(project_all(&self.db, rows).await?)
    }

    pub async fn search_by_price_range(&self, min: f64, max: f64) -> Result<Vec<ProductResponse>, ServiceError> {
        let rows = product_repo::find_by_price_range(&self.db, min, max).await?;
        Ok(project_all(&self.db, rows).await?)
    }

    pub async fn search_by_name(&self, name: &str) -> Result<Vec<ProductResponse>, ServiceError> {
        let rows = product_repo::find_by_name_containing(&self.db, name).await?;
        Ok(project_all(&self.db, rows).await?)
    }
}

fn scalar_fields(req: &ProductRequest) -> Result<ProductFields, ServiceError> {
    Ok(ProductFields {
        name: req.name.clone(),
        description: req.description.clone(),
        price: req.price.ok_or_else(|| ServiceError::Validation("price: Price is required".into()))?,
        stock_quantity: req
            .stock_quantity
            .ok_or_else(|| ServiceError::Validation("stock_quantity: Stock quantity is required".into()))?,
    })
}

async fn find_product<C: ConnectionTrait>(db: &C, id: i32) -> Result<product::Model, ServiceError> {
    product_repo::find_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found("Product", id))
}

async fn resolve_category<C: ConnectionTrait>(db: &C, id: i32) -> Result<category::Model, ServiceError> {
    category_repo::find_by_id(db, id).await?.ok_or_else(|| ServiceError::not_found("Category", id))
}

async fn resolve_tags<C: ConnectionTrait>(db: &C, ids: &BTreeSet<i32>) -> Result<Vec<tag::Model>, ServiceError> {
    let found = tag_repo::find_by_ids(db, ids).await?;
    if found.len() != ids.len() {
        return Err(ServiceError::tags_not_found());
    }
    Ok(found)
}
