use super::*;

/// Tests the first write of an implicit account.
///
/// Verifies that saving an account that was never stored inserts a row at version 0.
///
/// Expected: Ok(true) and the row is readable
#[tokio::test]
async fn inserts_implicit_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AuraAccountRepository::new(db);
    let scope = Scope::Guild(1);

    let mut stored = repo.find_or_default(42, &scope).await?;
    stored.account.apply_delta(50)?;

    assert!(repo.save(42, &scope, &stored).await?);

    let reloaded = repo.find(42, &scope).await?.unwrap();
    assert!(reloaded.id.is_some());
    assert_eq!(reloaded.version, 0);
    assert_eq!(reloaded.account.amount, 150);
    assert_eq!(reloaded.account.stats.total_gained, 50);

    Ok(())
}

/// Tests two writers materializing the same implicit account.
///
/// Verifies that the second insert loses on the unique (user, scope) index instead of
/// creating a duplicate row.
///
/// Expected: Ok(true) for the first writer, Ok(false) for the second
#[tokio::test]
async fn second_insert_loses() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AuraAccountRepository::new(db);
    let scope = Scope::Global;

    let first = repo.find_or_default(42, &scope).await?;
    let second = repo.find_or_default(42, &scope).await?;

    assert!(repo.save(42, &scope, &first).await?);
    assert!(!repo.save(42, &scope, &second).await?);

    let rows = entity::prelude::AuraAccount::find().all(db).await?;
    assert_eq!(rows.len(), 1);

    Ok(())
}

/// Tests updating a stored account.
///
/// Verifies that the update applies the new blob and bumps the version.
///
/// Expected: Ok(true) with version 1
#[tokio::test]
async fn updates_and_bumps_version() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_aura_account_with_amount(db, 42, 7, 500).await?;

    let repo = AuraAccountRepository::new(db);
    let scope = Scope::Guild(7);

    let mut stored = repo.find(42, &scope).await?.unwrap();
    stored.account.apply_delta(-200)?;

    assert!(repo.save(42, &scope, &stored).await?);

    let reloaded = repo.find(42, &scope).await?.unwrap();
    assert_eq!(reloaded.version, 1);
    assert_eq!(reloaded.account.amount, 300);

    Ok(())
}

/// Tests writing back a stale read.
///
/// Verifies that an update based on an outdated version is rejected and leaves the newer
/// write in place.
///
/// Expected: Ok(false) and the first writer's balance survives
#[tokio::test]
async fn rejects_stale_version() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_aura_account_with_amount(db, 42, 7, 500).await?;

    let repo = AuraAccountRepository::new(db);
    let scope = Scope::Guild(7);

    let mut winner = repo.find(42, &scope).await?.unwrap();
    let mut loser = winner.clone();

    winner.account.apply_delta(100)?;
    loser.account.apply_delta(-100)?;

    assert!(repo.save(42, &scope, &winner).await?);
    assert!(!repo.save(42, &scope, &loser).await?);

    let reloaded = repo.find(42, &scope).await?.unwrap();
    assert_eq!(reloaded.version, 1);
    assert_eq!(reloaded.account.amount, 600);

    Ok(())
}

/// Tests that every field of the account survives a write.
///
/// Expected: Ok with the reloaded account equal to the one written
#[tokio::test]
async fn preserves_all_fields() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AuraAccountRepository::new(db);
    let scope = Scope::Guild(3);
    let now = chrono::Utc::now();

    let mut stored = repo.find_or_default(9, &scope).await?;
    stored.account = AuraAccount {
        amount: -40,
        daily_last: Some(now),
        multiplier_expires: Some(now + chrono::Duration::hours(12)),
        items: vec![crate::model::aura::ShopItem::Bomb],
        ..Default::default()
    };
    stored
        .account
        .cooldowns
        .insert("slots".to_string(), now);

    assert!(repo.save(9, &scope, &stored).await?);

    let reloaded = repo.find(9, &scope).await?.unwrap();
    assert_eq!(reloaded.account, stored.account);

    Ok(())
}
