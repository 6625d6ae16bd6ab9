use std::str::FromStr;

use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, Set};

use super::{setup_test_db, unique_phone};
use crate::errors::ModelError;
use crate::{order, service, user};

#[tokio::test]
async fn user_create_find_and_unique_phone() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let phone = unique_phone();
    let created = user::create(&db, &phone, None, Some("uz")).await?;
    assert_eq!(created.phone_number, phone);
    assert_eq!(created.language_code.as_deref(), Some("uz"));
    assert!(created.created_at <= created.updated_at);

    let found = user::find_by_phone(&db, &phone).await?.expect("user by phone");
    assert_eq!(found.id, created.id);

    let dup = user::create(&db, &phone, None, None).await;
    assert!(matches!(dup, Err(ModelError::Conflict(_))), "got {dup:?}");

    assert!(user::hard_delete(&db, created.id).await?);
    assert!(user::find_by_phone(&db, &phone).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn deleting_user_cascades_orders() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let u = user::create(&db, &unique_phone(), None, None).await?;
    let o = order::ActiveModel {
        user_id: Set(u.id),
        status: Set(order::OrderStatus::Pending),
        total_amount: Set(Some(Decimal::from_str("100.00")?)),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    assert_eq!(order::count_for_user(&db, u.id).await?, 1);

    user::hard_delete(&db, u.id).await?;
    assert!(order::Entity::find_by_id(o.id).one(&db).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn deactivated_service_is_not_active() -> anyhow::Result<()> {
    let Some(db) = setup_test_db().await else { return Ok(()) };

    let s = service::ActiveModel {
        name: Set("Test massage".into()),
        base_price: Set(Some(Decimal::from_str("50000.00")?)),
        duration_minutes: Set(Some(30)),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    assert!(service::find_active(&db, s.id).await?.is_some());

    let off = service::deactivate(&db, s.id).await?.expect("service exists");
    assert!(!off.is_active);
    assert!(service::find_active(&db, s.id).await?.is_none());
    assert!(service::Entity::find_by_id(s.id).one(&db).await?.is_some());

    s.delete(&db).await?;
    Ok(())
}
