use sea_orm::{DatabaseConnection, Set};
use tracing::{info, instrument};
use validator::Validate;

use models::tag;

use crate::dto::TagDto;
use crate::errors::ServiceError;
use crate::repository::tag_repo;

#[derive(Clone)]
pub struct TagService {
    db: DatabaseConnection,
}

impl TagService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    #[instrument(skip(self, dto), fields(name = %dto.name))]
    pub async fn create_tag(&self, dto: TagDto) -> Result<TagDto, ServiceError> {
        dto.validate()?;
        let created = tag_repo::insert(&self.db, &dto.name).await?;
        info!(tag_id = created.id, "tag_created");
        Ok(created.into())
    }

    /// Active tags only.
    pub async fn list_tags(&self) -> Result<Vec<TagDto>, ServiceError> {
        let rows = tag_repo::find_active(&self.db).await?;
        Ok(rows.into_iter().map(TagDto::from).collect())
    }

    pub async fn get_tag(&self, id: i32) -> Result<TagDto, ServiceError> {
        Ok(self.find(id).await?.into())
    }

    #[instrument(skip(self, dto))]
    pub async fn update_tag(&self, id: i32, dto: TagDto) -> Result<TagDto, ServiceError> {
        dto.validate()?;
        let mut am: tag::ActiveModel = self.find(id).await?.into();
        am.name = Set(dto.name);
        let updated = tag_repo::update(&self.db, am).await?;
        info!(tag_id = id, "tag_updated");
        Ok(updated.into())
    }

    /// Soft delete; existing product links are kept.
    #[instrument(skip(self))]
    pub async fn delete_tag(&self, id: i32) -> Result<(), ServiceError> {
        let mut am: tag::ActiveModel = self.find(id).await?.into();
        am.active = Set(false);
        tag_repo::update(&self.db, am).await?;
        info!(tag_id = id, "tag_deactivated");
        Ok(())
    }

    pub async fn search_by_name(&self, name: &str) -> Result<Vec<TagDto>, ServiceError> {
        let rows = tag_repo::find_by_name_containing(&self.db, name).await?;
        Ok(rows.into_iter().map(TagDto::from).collect())
    }

    async fn find(&self, id: i32) -> Result<tag::Model, ServiceError> {
        tag_repo::find_by_id(&self.db, id).await?.ok_or_else(|| ServiceError::not_found("Tag", id))
    }
}
