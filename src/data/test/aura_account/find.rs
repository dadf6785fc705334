use super::*;
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue};

/// Tests finding an account that was never written.
///
/// Verifies that reads of an unknown user return nothing and that the fallback read yields
/// the implicit default account without inserting a row.
///
/// Expected: Ok(None), then the default account with no row created
#[tokio::test]
async fn returns_none_for_unknown_user() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AuraAccountRepository::new(db);
    let scope = Scope::Guild(1);

    assert!(repo.find(42, &scope).await?.is_none());

    let stored = repo.find_or_default(42, &scope).await?;
    assert_eq!(stored, StoredAccount::implicit());
    assert_eq!(stored.account.amount, 100);

    let rows = entity::prelude::AuraAccount::find().all(db).await?;
    assert!(rows.is_empty());

    Ok(())
}

/// Tests finding a seeded account.
///
/// Verifies that the stored blob decodes into the account fields and that the row id and
/// version are carried along.
///
/// Expected: Ok(Some) with amount, shield and bomb restored
#[tokio::test]
async fn finds_seeded_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let shield_expires = Utc::now() + Duration::hours(3);
    let row = factory::aura_account::AuraAccountFactory::new(db)
        .user_id(42)
        .guild(7)
        .amount(1_500)
        .shield_expires(shield_expires)
        .item("bomb")
        .build()
        .await?;

    let repo = AuraAccountRepository::new(db);
    let stored = repo.find(42, &Scope::Guild(7)).await?.unwrap();

    assert_eq!(stored.id, Some(row.id));
    assert_eq!(stored.version, 0);
    assert_eq!(stored.account.amount, 1_500);
    assert_eq!(stored.account.shield_expires, Some(shield_expires));
    assert_eq!(stored.account.bomb_count(), 1);

    Ok(())
}

/// Tests that balances are isolated per scope.
///
/// Verifies that an account in one guild is invisible from another guild and from the
/// global scope.
///
/// Expected: Ok(None) outside the seeded scope
#[tokio::test]
async fn isolates_scopes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_aura_account_with_amount(db, 42, 7, 900).await?;

    let repo = AuraAccountRepository::new(db);

    assert!(repo.find(42, &Scope::Guild(7)).await?.is_some());
    assert!(repo.find(42, &Scope::Guild(8)).await?.is_none());
    assert!(repo.find(42, &Scope::Global).await?.is_none());

    Ok(())
}

/// Tests reading a row whose blob no longer matches the account layout.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn fails_on_corrupt_blob() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    entity::aura_account::ActiveModel {
        user_id: ActiveValue::Set("42".to_string()),
        scope: ActiveValue::Set("7".to_string()),
        data: ActiveValue::Set(serde_json::json!({ "amount": "lots" })),
        version: ActiveValue::Set(0),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let repo = AuraAccountRepository::new(db);
    let result = repo.find(42, &Scope::Guild(7)).await;

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
