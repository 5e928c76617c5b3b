use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};

use models::category;

use crate::repository::ID_CHUNK;
use crate::search::lower_contains;

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<category::Model>, DbErr> {
    category::Entity::find_by_id(id).one(db).await
}

/// Batch lookup used by projections.
pub async fn find_by_ids<C: ConnectionTrait>(db: &C, ids: &[i32]) -> Result<Vec<category::Model>, DbErr> {
    let mut found = Vec::with_capacity(ids.len());
    for chunk in ids.chunks(ID_CHUNK) {
        found.extend(category::Entity::find().filter(category::Column::Id.is_in(chunk.iter().copied())).all(db).await?);
    }
    Ok(found)
}

pub async fn find_active<C: ConnectionTrait>(db: &C) -> Result<Vec<category::Model>, DbErr> {
    category::Entity::find()
        .filter(category::Column::Active.eq(true))
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
}

pub async fn find_by_name_containing<C: ConnectionTrait>(db: &C, name: &str) -> Result<Vec<category::Model>, DbErr> {
    category::Entity::find()
        .filter(lower_contains((category::Entity, category::Column::Name), name))
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
}

pub async fn insert<C: ConnectionTrait>(db: &C, name: &str, description: Option<String>, active: bool) -> Result<category::Model, DbErr> {
    category::ActiveModel {
        name: Set(name.to_string()),
        description: Set(description),
        active: Set(active),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn update<C: ConnectionTrait>(db: &C, am: category::ActiveModel) -> Result<category::Model, DbErr> {
    am.update(db).await
}
