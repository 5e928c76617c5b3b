use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Product: listing filters on active and category
        manager
            .create_index(
                Index::create()
                    .name("idx_product_active")
                    .table(Product::Table)
                    .col(Product::Active)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_product_category")
                    .table(Product::Table)
                    .col(Product::CategoryId)
                    .to_owned(),
            )
            .await?;

        // ProductTag: reverse lookup by tag
        manager
            .create_index(
                Index::create()
                    .name("idx_product_tag_tag")
                    .table(ProductTag::Table)
                    .col(ProductTag::TagId)
                    .to_owned(),
            )
            .await?;

        // ProductImage / Review: per-product lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_product_image_product")
                    .table(ProductImage::Table)
                    .col(ProductImage::ProductId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_review_product")
                    .table(Review::Table)
                    .col(Review::ProductId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_product_active").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_product_category").table(Product::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_product_tag_tag").table(ProductTag::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_product_image_product").table(ProductImage::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_review_product").table(Review::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Product { Table, Active, CategoryId }

#[derive(DeriveIden)]
enum ProductTag { Table, TagId }

#[derive(DeriveIden)]
enum ProductImage { Table, ProductId }

#[derive(DeriveIden)]
enum Review { Table, ProductId }
