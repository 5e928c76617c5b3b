//! Migrator registering catalog migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_category;
mod m20240301_000002_create_tag;
mod m20240301_000003_create_product;
mod m20240301_000004_create_product_tag;
mod m20240301_000005_create_product_image;
mod m20240301_000006_create_product_specification;
mod m20240301_000007_create_review;
mod m20240301_000008_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_category::Migration),
            Box::new(m20240301_000002_create_tag::Migration),
            Box::new(m20240301_000003_create_product::Migration),
            Box::new(m20240301_000004_create_product_tag::Migration),
            Box::new(m20240301_000005_create_product_image::Migration),
            Box::new(m20240301_000006_create_product_specification::Migration),
            Box::new(m20240301_000007_create_review::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000008_add_indexes::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnectOptions, Database};

    #[tokio::test]
    async fn up_and_down_on_sqlite() -> anyhow::Result<()> {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await?;

        Migrator::up(&db, None).await?;
        let manager = SchemaManager::new(&db);
        for table in ["category", "tag", "product", "product_tag", "product_image", "product_specification", "review"] {
            assert!(manager.has_table(table).await?, "missing table {table}");
        }

        Migrator::down(&db, None).await?;
        assert!(!manager.has_table("product").await?);
        Ok(())
    }
}
