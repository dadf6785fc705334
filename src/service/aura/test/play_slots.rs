use super::*;

/// Tests a winning spin.
///
/// Verifies that three fire symbols pay ten times the bet, the net gain is credited and the
/// slots cooldown is recorded.
///
/// Expected: Ok with net +450 and balance 550
#[tokio::test]
async fn pays_out_fire_triple() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = AccountLocks::new();
    let now = Utc::now();

    let service = AuraService::new(db, &locks);
    let outcome = service
        .play_slots(42, scope(), 50, now, &mut FixedRng::lowest())
        .await?;

    assert_eq!(outcome.symbols, ["🔥", "🔥", "🔥"]);
    assert_eq!(outcome.result, WagerResult::Win);
    assert_eq!(outcome.settlement.net, 450);
    assert_eq!(outcome.settlement.balance, 550);

    let account = service.account(42, scope()).await?;
    assert_eq!(account.amount, 550);
    assert_eq!(account.cooldowns.get("slots"), Some(&now));
    assert_eq!(account.stats.biggest_win, 450);

    Ok(())
}

/// Tests that an active multiplier doubles a slots win.
///
/// Expected: Ok with 900 credited on a 450 net win
#[tokio::test]
async fn multiplier_doubles_win() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = AccountLocks::new();
    let now = Utc::now();

    factory::aura_account::AuraAccountFactory::new(db)
        .user_id(42)
        .guild(GUILD)
        .multiplier_expires(now + Duration::hours(2))
        .build()
        .await?;

    let service = AuraService::new(db, &locks);
    let outcome = service
        .play_slots(42, scope(), 50, now, &mut FixedRng::lowest())
        .await?;

    assert_eq!(outcome.settlement.net, 450);
    assert_eq!(outcome.settlement.credited, 900);
    assert!(outcome.settlement.boosted());
    assert_eq!(outcome.settlement.balance, 1_000);

    Ok(())
}

/// Tests that random spins always settle consistently.
///
/// Expected: Ok with balance equal to 100 plus the credited amount
#[tokio::test]
async fn balance_matches_settlement() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = AccountLocks::new();
    let mut rng = StdRng::seed_from_u64(99);

    let service = AuraService::new(db, &locks);
    let outcome = service
        .play_slots(42, scope(), 20, Utc::now(), &mut rng)
        .await?;

    let account = service.account(42, scope()).await?;
    assert_eq!(account.amount, 100 + outcome.settlement.credited);

    Ok(())
}

/// Tests spinning again within the cooldown window.
///
/// Expected: Err(CooldownActive) and the balance from the first spin is kept
#[tokio::test]
async fn rejects_spin_during_cooldown() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = AccountLocks::new();
    let now = Utc::now();

    let service = AuraService::new(db, &locks);
    service
        .play_slots(42, scope(), 50, now, &mut FixedRng::lowest())
        .await?;

    let result = service
        .play_slots(42, scope(), 50, now + Duration::seconds(10), &mut FixedRng::lowest())
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuraErr(AuraError::CooldownActive { .. }))
    ));
    assert_eq!(service.account(42, scope()).await?.amount, 550);

    Ok(())
}

/// Tests that rejected bets leave the stored row untouched.
///
/// Verifies that a bet below the minimum and a bet above the balance are both rejected
/// without writing, so the row version stays at 0.
///
/// Expected: Err(BelowMinimum), Err(InsufficientFunds), version unchanged
#[tokio::test]
async fn rejected_bets_do_not_write() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = AccountLocks::new();
    let now = Utc::now();

    factory::create_aura_account_with_amount(db, 42, GUILD, 100).await?;

    let service = AuraService::new(db, &locks);

    let too_small = service
        .play_slots(42, scope(), 5, now, &mut FixedRng::lowest())
        .await;
    assert!(matches!(
        too_small,
        Err(AppError::AuraErr(AuraError::BelowMinimum { min: 10, amount: 5 }))
    ));

    let too_big = service
        .play_slots(42, scope(), 500, now, &mut FixedRng::lowest())
        .await;
    assert!(matches!(
        too_big,
        Err(AppError::AuraErr(AuraError::InsufficientFunds {
            required: 500,
            available: 100
        }))
    ));

    let row = crate::data::aura_account::AuraAccountRepository::new(db)
        .find(42, &scope())
        .await?
        .unwrap();
    assert_eq!(row.version, 0);
    assert!(row.account.cooldowns.is_empty());

    Ok(())
}

/// Tests a jackpot too large to represent.
///
/// Verifies that a payout overflowing the balance type is rejected and the stored account,
/// including its slots cooldown, is left untouched.
///
/// Expected: Err(AmountOverflow) with balance and cooldowns unchanged
#[tokio::test]
async fn rejects_overflowing_payout() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let locks = AccountLocks::new();
    let now = Utc::now();

    factory::create_aura_account_with_amount(db, 42, GUILD, i64::MAX / 4).await?;

    let service = AuraService::new(db, &locks);
    let result = service
        .play_slots(42, scope(), i64::MAX / 8, now, &mut FixedRng::lowest())
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuraErr(AuraError::AmountOverflow))
    ));

    let account = service.account(42, scope()).await?;
    assert_eq!(account.amount, i64::MAX / 4);
    assert!(account.cooldowns.is_empty());

    Ok(())
}
