use sea_orm::{DatabaseConnection, Set};
use tracing::{info, instrument};
use validator::Validate;

use models::category;

use crate::dto::CategoryDto;
use crate::errors::ServiceError;
use crate::repository::category_repo;

#[derive(Clone)]
pub struct CategoryService {
    db: DatabaseConnection,
}

impl CategoryService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    #[instrument(skip(self, dto), fields(name = %dto.name))]
    pub async fn create_category(&self, dto: CategoryDto) -> Result<CategoryDto, ServiceError> {
        dto.validate()?;
        let created =
            category_repo::insert(&self.db, &dto.name, dto.description, dto.active.unwrap_or(true)).await?;
        info!(category_id = created.id, "category_created");
        Ok(created.into())
    }

    /// Active categories only.
    pub async fn list_categories(&self) -> Result<Vec<CategoryDto>, ServiceError> {
        let rows = category_repo::find_active(&self.db).await?;
        Ok(rows.into_iter().map(CategoryDto::from).collect())
    }

    pub async fn get_category(&self, id: i32) -> Result<CategoryDto, ServiceError> {
        Ok(self.find(id).await?.into())
    }

    /// Name and description are replaced; an absent `active` keeps the current flag.
    #[instrument(skip(self, dto))]
    pub async fn update_category(&self, id: i32, dto: CategoryDto) -> Result<CategoryDto, ServiceError> {
        dto.validate()?;
        let mut am: category::ActiveModel = self.find(id).await?.into();
        am.name = Set(dto.name);
        am.description = Set(dto.description);
        if let Some(active) = dto.active {
            am.active = Set(active);
        }
        let updated = category_repo::update(&self.db, am).await?;
        info!(category_id = id, "category_updated");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: i32) -> Result<(), ServiceError> {
        let mut am: category::ActiveModel = self.find(id).await?.into();
        am.active = Set(false);
        category_repo::update(&self.db, am).await?;
        info!(category_id = id, "category_deactivated");
        Ok(())
    }

    pub async fn search_by_name(&self, name: &str) -> Result<Vec<CategoryDto>, ServiceError> {
        let rows = category_repo::find_by_name_containing(&self.db, name).await?;
        Ok(rows.into_iter().map(CategoryDto::from).collect())
    }

    async fn find(&self, id: i32) -> Result<category::Model, ServiceError> {
        category_repo::find_by_id(&self.db, id).await?.ok_or_else(|| ServiceError::not_found("Category", id))
    }
}
