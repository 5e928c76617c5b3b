use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, OnConflict, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use models::{product, product_image, product_specification, product_tag, tag};

use crate::repository::ID_CHUNK;
use crate::search;

/// Scalar columns written on create and replaced on update.
#[derive(Debug, Clone)]
pub struct ProductFields {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock_quantity: i32,
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<product::Model>, DbErr> {
    product::Entity::find_by_id(id).one(db).await
}

pub async fn exists<C: ConnectionTrait>(db: &C, id: i32) -> Result<bool, DbErr> {
    let n = product::Entity::find().filter(product::Column::Id.eq(id)).count(db).await?;
    Ok(n > 0)
}

pub async fn find_active<C: ConnectionTrait>(db: &C) -> Result<Vec<product::Model>, DbErr> {
    find_matching(db, Condition::all().add(product::Column::Active.eq(true))).await
}

pub async fn find_matching<C: ConnectionTrait>(db: &C, cond: Condition) -> Result<Vec<product::Model>, DbErr> {
    product::Entity::find().filter(cond).order_by_asc(product::Column::Id).all(db).await
}

/// Inclusive on both ends; active products only.
pub async fn find_by_price_range<C: ConnectionTrait>(db: &C, min: f64, max: f64) -> Result<Vec<product::Model>, DbErr> {
    find_matching(
        db,
        Condition::all()
            .add(product::Column::Active.eq(true))
            .add(product::Column::Price.between(min, max)),
    )
    .await
}

pub async fn find_by_name_containing<C: ConnectionTrait>(db: &C, name: &str) -> Result<Vec<product::Model>, DbErr> {
    find_matching(db, Condition::all().add(search::name_contains(name))).await
}

pub async fn find_by_category<C: ConnectionTrait>(db: &C, category_id: i32) -> Result<Vec<product::Model>, DbErr> {
    find_matching(db, Condition::all().add(product::Column::CategoryId.eq(category_id))).await
}

pub async fn find_by_tag<C: ConnectionTrait>(db: &C, tag_id: i32) -> Result<Vec<product::Model>, DbErr> {
    let tags = BTreeSet::from([tag_id]);
    find_matching(db, Condition::all().add(search::has_any_tag(&tags))).await
}

pub async fn insert<C: ConnectionTrait>(db: &C, fields: ProductFields, category_id: Option<i32>) -> Result<product::Model, DbErr> {
    let now = Utc::now().into();
    product::ActiveModel {
        name: Set(fields.name),
        description: Set(fields.description),
        price: Set(fields.price),
        stock_quantity: Set(fields.stock_quantity),
        active: Set(true),
        category_id: Set(category_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Persist `am` with `updated_at` bumped to now.
pub async fn save_touched<C: ConnectionTrait>(db: &C, mut am: product::ActiveModel) -> Result<product::Model, DbErr> {
    am.updated_at = Set(Utc::now().into());
    am.update(db).await
}

pub async fn touch<C: ConnectionTrait>(db: &C, model: product::Model) -> Result<product::Model, DbErr> {
    save_touched(db, model.into()).await
}

/// Adds the links that are not there yet; existing ones are left alone,
/// including links a concurrent caller inserted first.
pub async fn link_tags<C: ConnectionTrait>(db: &C, product_id: i32, tag_ids: &BTreeSet<i32>) -> Result<(), DbErr> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    let rows = tag_ids
        .iter()
        .map(|tag_id| product_tag::ActiveModel { product_id: Set(product_id), tag_id: Set(*tag_id) });
    product_tag::Entity::insert_many(rows)
        .on_conflict(
            OnConflict::columns([product_tag::Column::ProductId, product_tag::Column::TagId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}

/// Positions continue after the highest existing one. Reads order images by
/// id, so appends stay in insertion order even when positions collide.
pub async fn append_images<C: ConnectionTrait>(db: &C, product_id: i32, urls: &[String]) -> Result<(), DbErr> {
    if urls.is_empty() {
        return Ok(());
    }
    let last: Option<Option<i32>> = product_image::Entity::find()
        .select_only()
        .column_as(SimpleExpr::from(Func::max(Expr::col(product_image::Column::Position))), "last_position")
        .filter(product_image::Column::ProductId.eq(product_id))
        .into_tuple()
        .one(db)
        .await?;
    let start = last.flatten().map_or(0, |p| p + 1);
    let rows = urls.iter().enumerate().map(|(i, url)| product_image::ActiveModel {
        product_id: Set(product_id),
        position: Set(start + i as i32),
        url: Set(url.clone()),
        ..Default::default()
    });
    product_image::Entity::insert_many(rows).exec_without_returning(db).await?;
    Ok(())
}

/// Upsert keyed on `(product_id, spec_key)`; colliding keys take the new value.
pub async fn merge_specifications<C: ConnectionTrait>(
    db: &C,
    product_id: i32,
    specs: &BTreeMap<String, String>,
) -> Result<(), DbErr> {
    if specs.is_empty() {
        return Ok(());
    }
    let rows = specs.iter().map(|(k, v)| product_specification::ActiveModel {
        product_id: Set(product_id),
        spec_key: Set(k.clone()),
        spec_value: Set(v.clone()),
        ..Default::default()
    });
    product_specification::Entity::insert_many(rows)
        .on_conflict(
            OnConflict::columns([product_specification::Column::ProductId, product_specification::Column::SpecKey])
                .update_column(product_specification::Column::SpecValue)
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}

/// `(product_id, tag)` pairs for a batch of products, one query.
pub async fn tags_for<C: ConnectionTrait>(db: &C, product_ids: &[i32]) -> Result<Vec<(i32, tag::Model)>, DbErr> {
    let mut pairs = Vec::new();
    for chunk in product_ids.chunks(ID_CHUNK) {
        let rows = product_tag::Entity::find()
            .filter(product_tag::Column::ProductId.is_in(chunk.iter().copied()))
            .find_also_related(tag::Entity)
            .all(db)
            .await?;
        pairs.extend(rows.into_iter().filter_map(|(link, tag)| tag.map(|t| (link.product_id, t))));
    }
    Ok(pairs)
}

pub async fn images_for<C: ConnectionTrait>(db: &C, product_ids: &[i32]) -> Result<Vec<product_image::Model>, DbErr> {
    let mut found = Vec::new();
    for chunk in product_ids.chunks(ID_CHUNK) {
        let rows = product_image::Entity::find()
            .filter(product_image::Column::ProductId.is_in(chunk.iter().copied()))
            .order_by_asc(product_image::Column::ProductId)
            .order_by_asc(product_image::Column::Id)
            .all(db)
            .await?;
        found.extend(rows);
    }
    Ok(found)
}

pub async fn specifications_for<C: ConnectionTrait>(
    db: &C,
    product_ids: &[i32],
) -> Result<Vec<product_specification::Model>, DbErr> {
    let mut found = Vec::new();
    for chunk in product_ids.chunks(ID_CHUNK) {
        found.extend(
            product_specification::Entity::find()
                .filter(product_specification::Column::ProductId.is_in(chunk.iter().copied()))
                .all(db)
                .await?,
        );
    }
    Ok(found)
}
