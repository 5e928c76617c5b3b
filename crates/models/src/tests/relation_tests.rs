use crate::db::connect_in_memory;
use crate::{category, product, product_tag, tag};
use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, Set};

#[tokio::test]
async fn test_product_category_and_tags() -> Result<()> {
    let db = connect_in_memory().await?;

    let cat = category::ActiveModel {
        name: Set("Books".into()),
        description: Set(Some("Paper and ink".into())),
        active: Set(true),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    let now = Utc::now().into();
    let p = product::ActiveModel {
        name: Set("Rust in Action".into()),
        description: Set(None),
        price: Set(39.0),
        stock_quantity: Set(3),
        active: Set(true),
        category_id: Set(Some(cat.id)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    let t1 = tag::ActiveModel { name: Set("rust".into()), active: Set(true), ..Default::default() }.insert(&db).await?;
    let t2 = tag::ActiveModel { name: Set("systems".into()), active: Set(true), ..Default::default() }.insert(&db).await?;
    for t in [&t1, &t2] {
        product_tag::ActiveModel { product_id: Set(p.id), tag_id: Set(t.id) }.insert(&db).await?;
    }

    let owner = p.find_related(category::Entity).one(&db).await?;
    assert_eq!(owner.map(|c| c.id), Some(cat.id));

    let mut tags = p.find_related(tag::Entity).all(&db).await?;
    tags.sort_by_key(|t| t.id);
    assert_eq!(tags.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(), vec!["rust", "systems"]);

    let tagged = t1.find_related(product::Entity).all(&db).await?;
    assert_eq!(tagged.len(), 1);
    assert_eq!(tagged[0].id, p.id);

    let in_category = cat.find_related(product::Entity).all(&db).await?;
    assert_eq!(in_category.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_deleting_tag_row_drops_join_rows() -> Result<()> {
    let db = connect_in_memory().await?;
    let now = Utc::now().into();
    let p = product::ActiveModel {
        name: Set("Lamp".into()),
        description: Set(None),
        price: Set(12.0),
        stock_quantity: Set(1),
        active: Set(true),
        category_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    let t = tag::ActiveModel { name: Set("home".into()), active: Set(true), ..Default::default() }.insert(&db).await?;
    product_tag::ActiveModel { product_id: Set(p.id), tag_id: Set(t.id) }.insert(&db).await?;

    tag::Entity::delete_by_id(t.id).exec(&db).await?;
    let links = product_tag::Entity::find().all(&db).await?;
    assert!(links.is_empty());
    Ok(())
}
