use super::*;

/// Tests detonating a bomb on a shielded target.
///
/// Verifies that the full damage lands regardless of the shield, that the damage is not
/// credited to the attacker and that one bomb is consumed.
///
/// Expected: Ok with the target at -1000 and one bomb left
#[tokio::test]
async fn ignores_shield_and_consumes_bomb() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = AccountLocks::new();

    factory::aura_account::AuraAccountFactory::new(db)
        .user_id(1)
        .guild(GUILD)
        .amount(300)
        .item("bomb")
        .item("bomb")
        .build()
        .await?;
    factory::aura_account::AuraAccountFactory::new(db)
        .user_id(2)
        .guild(GUILD)
        .amount(1_000)
        .shield_expires(Utc::now() + Duration::hours(12))
        .build()
        .await?;

    let service = AuraService::new(db, &locks);
    let outcome = service
        .detonate_bomb(Player::new(1), Player::new(2), scope())
        .await?;

    assert_eq!(outcome.damage, 2_000);
    assert_eq!(outcome.target_balance, -1_000);
    assert_eq!(outcome.bombs_left, 1);

    let attacker = service.account(1, scope()).await?;
    assert_eq!(attacker.amount, 300);
    assert_eq!(attacker.bomb_count(), 1);

    Ok(())
}

/// Tests detonating without owning a bomb.
///
/// Expected: Err(NoBomb) and the target untouched
#[tokio::test]
async fn requires_owned_bomb() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = AccountLocks::new();

    factory::create_aura_account_with_amount(db, 2, GUILD, 1_000).await?;

    let service = AuraService::new(db, &locks);
    let result = service
        .detonate_bomb(Player::new(1), Player::new(2), scope())
        .await;

    assert!(matches!(result, Err(AppError::AuraErr(AuraError::NoBomb))));
    assert_eq!(service.account(2, scope()).await?.amount, 1_000);

    Ok(())
}

/// Tests bombing yourself.
///
/// Expected: Err(SelfTarget) and the bomb kept
#[tokio::test]
async fn rejects_self_target() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = AccountLocks::new();

    factory::aura_account::AuraAccountFactory::new(db)
        .user_id(1)
        .guild(GUILD)
        .item("bomb")
        .build()
        .await?;

    let service = AuraService::new(db, &locks);
    let result = service
        .detonate_bomb(Player::new(1), Player::new(1), scope())
        .await;

    assert!(matches!(result, Err(AppError::AuraErr(AuraError::SelfTarget))));
    assert_eq!(service.account(1, scope()).await?.bomb_count(), 1);

    Ok(())
}
