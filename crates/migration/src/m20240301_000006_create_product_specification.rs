//! Create `product_specification` table.
//! One value per (product, key); merges overwrite on collision.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductSpecification::Table)
                    .if_not_exists()
                    .col(pk_auto(ProductSpecification::Id))
                    .col(integer(ProductSpecification::ProductId).not_null())
                    .col(string_len(ProductSpecification::SpecKey, 255).not_null())
                    .col(text(ProductSpecification::SpecValue).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_specification_product")
                            .from(ProductSpecification::Table, ProductSpecification::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_product_specification_key")
                    .table(ProductSpecification::Table)
                    .col(ProductSpecification::ProductId)
                    .col(ProductSpecification::SpecKey)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProductSpecification::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ProductSpecification {
    Table,
    Id,
    ProductId,
    SpecKey,
    SpecValue,
}

#[derive(DeriveIden)]
enum Product { Table, Id }
