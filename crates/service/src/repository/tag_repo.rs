use std::collections::BTreeSet;

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};

use models::tag;

use crate::repository::ID_CHUNK;
use crate::search::lower_contains;

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<tag::Model>, DbErr> {
    tag::Entity::find_by_id(id).one(db).await
}

pub async fn find_by_ids<C: ConnectionTrait>(db: &C, ids: &BTreeSet<i32>) -> Result<Vec<tag::Model>, DbErr> {
    let ids: Vec<i32> = ids.iter().copied().collect();
    let mut found = Vec::with_capacity(ids.len());
    // Chunks follow the set's ascending order, so the result stays sorted by id
    for chunk in ids.chunks(ID_CHUNK) {
        let rows = tag::Entity::find()
            .filter(tag::Column::Id.is_in(chunk.iter().copied()))
            .order_by_asc(tag::Column::Id)
            .all(db)
            .await?;
        found.extend(rows);
    }
    Ok(found)
}

pub async fn find_active<C: ConnectionTrait>(db: &C) -> Result<Vec<tag::Model>, DbErr> {
    tag::Entity::find()
        .filter(tag::Column::Active.eq(true))
        .order_by_asc(tag::Column::Id)
        .all(db)
        .await
}

pub async fn find_by_name_containing<C: ConnectionTrait>(db: &C, name: &str) -> Result<Vec<tag::Model>, DbErr> {
    tag::Entity::find()
        .filter(lower_contains((tag::Entity, tag::Column::Name), name))
        .order_by_asc(tag::Column::Id)
        .all(db)
        .await
}

pub async fn insert<C: ConnectionTrait>(db: &C, name: &str) -> Result<tag::Model, DbErr> {
    tag::ActiveModel { name: Set(name.to_string()), active: Set(true), ..Default::default() }
        .insert(db)
        .await
}

pub async fn update<C: ConnectionTrait>(db: &C, am: tag::ActiveModel) -> Result<tag::Model, DbErr> {
    am.update(db).await
}
