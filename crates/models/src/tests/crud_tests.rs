use crate::db::connect_in_memory;
use crate::{category, product, review};
use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

fn new_product(name: &str, price: f64, category_id: Option<i32>) -> product::ActiveModel {
    let now = Utc::now().into();
    product::ActiveModel {
        name: Set(name.to_string()),
        description: Set(Some("test product".into())),
        price: Set(price),
        stock_quantity: Set(10),
        active: Set(true),
        category_id: Set(category_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_category_crud() -> Result<()> {
    let db = connect_in_memory().await?;

    let created = category::ActiveModel {
        name: Set("Electronics".into()),
        description: Set(None),
        active: Set(true),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    assert!(created.id > 0);

    let found = category::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.as_ref().map(|c| c.name.as_str()), Some("Electronics"));

    let mut am: category::ActiveModel = found.unwrap().into();
    am.active = Set(false);
    let updated = am.update(&db).await?;
    assert!(!updated.active);

    let active = category::Entity::find().filter(category::Column::Active.eq(true)).all(&db).await?;
    assert!(active.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_product_insert_generates_ids_and_keeps_price() -> Result<()> {
    let db = connect_in_memory().await?;

    let a = new_product("Keyboard", 49.9, None).insert(&db).await?;
    let b = new_product("Mouse", 19.5, None).insert(&db).await?;
    assert_ne!(a.id, b.id);
    assert!((a.price - 49.9).abs() < f64::EPSILON);

    let cheap = product::Entity::find()
        .filter(product::Column::Price.lte(20.0))
        .all(&db)
        .await?;
    assert_eq!(cheap.len(), 1);
    assert_eq!(cheap[0].name, "Mouse");
    Ok(())
}

#[tokio::test]
async fn test_review_belongs_to_product() -> Result<()> {
    let db = connect_in_memory().await?;
    let p = new_product("Monitor", 199.0, None).insert(&db).await?;

    let r = review::ActiveModel {
        product_id: Set(p.id),
        rating: Set(4),
        comment: Set(Some("sharp".into())),
        author: Set(Some("ana".into())),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    assert_eq!(r.product_id, p.id);

    // Hard-deleting the product cascades to its reviews
    product::Entity::delete_by_id(p.id).exec(&db).await?;
    assert!(review::Entity::find_by_id(r.id).one(&db).await?.is_none());
    Ok(())
}


#[test]
fn test_stock_quantity_must_be_positive() {
    assert!(product::validate_stock_quantity(0).is_err());
    assert!(product::validate_stock_quantity(-3).is_err());
    assert!(product::validate_stock_quantity(1).is_ok());
}
