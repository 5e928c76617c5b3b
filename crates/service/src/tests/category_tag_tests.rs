use anyhow::Result;

use crate::dto::{CategoryDto, ProductRequest};
use crate::errors::ServiceError;
use crate::test_support::{category_dto, product_req, services, tag_dto};

#[tokio::test]
async fn category_crud_with_soft_delete() -> Result<()> {
    let s = services().await?;
    let created = s
        .categories
        .create_category(CategoryDto { description: Some("Things for cooking".into()), ..category_dto("Kitchen") })
        .await?;
    let id = created.id.unwrap();
    assert_eq!(created.active, Some(true));

    let renamed = s
        .categories
        .update_category(id, CategoryDto { name: "Kitchenware".into(), description: None, id: None, active: None })
        .await?;
    assert_eq!(renamed.name, "Kitchenware");
    assert_eq!(renamed.description, None);
    assert_eq!(renamed.active, Some(true));

    s.categories.delete_category(id).await?;
    assert_eq!(s.categories.get_category(id).await?.active, Some(false));
    assert!(s.categories.list_categories().await?.is_empty());
    assert_eq!(s.categories.search_by_name("WARE").await?.len(), 1);
    assert!(matches!(s.categories.get_category(id + 1).await, Err(ServiceError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn inactive_category_still_resolves_for_products() -> Result<()> {
    let s = services().await?;
    let id = s.categories.create_category(category_dto("Retired")).await?.id;
    s.categories.delete_category(id.unwrap()).await?;
    let p = s.products.create_product(ProductRequest { category_id: id, ..product_req("Relic", 3.0) }).await?;
    assert_eq!(p.category.and_then(|c| c.active), Some(false));
    Ok(())
}

#[tokio::test]
async fn tag_crud_with_soft_delete() -> Result<()> {
    let s = services().await?;
    let t = s.tags.create_tag(tag_dto("vintage")).await?;
    let id = t.id.unwrap();
    s.tags.create_tag(tag_dto("modern")).await?;

    let updated = s.tags.update_tag(id, tag_dto("retro")).await?;
    assert_eq!(updated.name, "retro");

    let p = s
        .products
        .create_product(ProductRequest { tag_ids: Some([id].into_iter().collect()), ..product_req("Record Player", 150.0) })
        .await?;
    s.tags.delete_tag(id).await?;

    let listed: Vec<_> = s.tags.list_tags().await?.into_iter().map(|t| t.name).collect();
    assert_eq!(listed, vec!["modern"]);
    assert_eq!(s.tags.get_tag(id).await?.name, "retro");
    assert_eq!(s.products.get_product(p.id).await?.tags.len(), 1);
    assert_eq!(s.tags.search_by_name("ETR").await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn tag_and_category_validation() -> Result<()> {
    let s = services().await?;
    assert!(matches!(s.tags.create_tag(tag_dto("x")).await, Err(ServiceError::Validation(_))));
    assert!(matches!(s.categories.create_category(category_dto("ab")).await, Err(ServiceError::Validation(_))));
    assert!(matches!(s.tags.update_tag(5, tag_dto("fine")).await, Err(ServiceError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn tag_and_category_names_are_stored_as_sent() -> Result<()> {
    let s = services().await?;
    let tag = s.tags.create_tag(tag_dto("  x ")).await?;
    assert_eq!(tag.name, "  x ");
    let renamed = s.tags.update_tag(tag.id.unwrap(), tag_dto(" io ")).await?;
    assert_eq!(renamed.name, " io ");

    let cat = s.categories.create_category(category_dto("  ab ")).await?;
    assert_eq!(cat.name, "  ab ");
    assert_eq!(s.categories.get_category(cat.id.unwrap()).await?.name, "  ab ");
    Ok(())
}
