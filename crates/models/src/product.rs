use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{category, errors, product_image, product_specification, product_tag, review, tag};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub stock_quantity: i32,
    /// Soft-delete marker; rows are never removed.
    pub active: bool,
    pub category_id: Option<i32>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Category, ProductTag, Image, Specification, Review }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Category => Entity::belongs_to(category::Entity).from(Column::CategoryId).to(category::Column::Id).into(),
            Relation::ProductTag => Entity::has_many(product_tag::Entity).into(),
            Relation::Image => Entity::has_many(product_image::Entity).into(),
            Relation::Specification => Entity::has_many(product_specification::Entity).into(),
            Relation::Review => Entity::has_many(review::Entity).into(),
        }
    }
}

impl Related<category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl Related<product_tag::Entity> for Entity {
    fn to() -> RelationDef { Relation::ProductTag.def() }
}

impl Related<tag::Entity> for Entity {
    fn to() -> RelationDef { product_tag::Relation::Tag.def() }
    fn via() -> Option<RelationDef> { Some(product_tag::Relation::Product.def().rev()) }
}

impl Related<product_image::Entity> for Entity {
    fn to() -> RelationDef { Relation::Image.def() }
}

impl Related<product_specification::Entity> for Entity {
    fn to() -> RelationDef { Relation::Specification.def() }
}

impl Related<review::Entity> for Entity {
    fn to() -> RelationDef { Relation::Review.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_stock_quantity(quantity: i32) -> Result<(), errors::ModelError> {
    if quantity <= 0 {
        return Err(errors::ModelError::Validation("stock quantity must be positive".into()));
    }
    Ok(())
}
