//! Create `product_tag` join table (many-to-many between product and tag).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductTag::Table)
                    .if_not_exists()
                    .col(integer(ProductTag::ProductId).not_null())
                    .col(integer(ProductTag::TagId).not_null())
                    .primary_key(
                        Index::create()
                            .name("pk_product_tag")
                            .col(ProductTag::ProductId)
                            .col(ProductTag::TagId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_tag_product")
                            .from(ProductTag::Table, ProductTag::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_product_tag_tag")
                            .from(ProductTag::Table, ProductTag::TagId)
                            .to(Tag::Table, Tag::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ProductTag::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ProductTag {
    Table,
    ProductId,
    TagId,
}

#[derive(DeriveIden)]
enum Product { Table, Id }

#[derive(DeriveIden)]
enum Tag { Table, Id }
