use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{product, product_tag};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { ProductTag }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ProductTag => Entity::has_many(product_tag::Entity).into(),
        }
    }
}

impl Related<product_tag::Entity> for Entity {
    fn to() -> RelationDef { Relation::ProductTag.def() }
}

impl Related<product::Entity> for Entity {
    fn to() -> RelationDef { product_tag::Relation::Product.def() }
    fn via() -> Option<RelationDef> { Some(product_tag::Relation::Tag.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}
