use super::*;

/// Tests scanning a scope.
///
/// Verifies that only accounts of the requested scope are returned, in the order they were
/// first written.
///
/// Expected: Ok with the two accounts of guild 7 in insertion order
#[tokio::test]
async fn returns_scope_accounts_in_insertion_order() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_aura_account_with_amount(db, 30, 7, 500).await?;
    factory::create_aura_account_with_amount(db, 10, 7, 1_500).await?;
    factory::create_aura_account_with_amount(db, 20, 8, 9_000).await?;

    let repo = AuraAccountRepository::new(db);
    let accounts = repo.get_all_by_scope(&Scope::Guild(7)).await?;

    let summary: Vec<(u64, i64)> = accounts
        .iter()
        .map(|(user_id, account)| (*user_id, account.amount))
        .collect();
    assert_eq!(summary, vec![(30, 500), (10, 1_500)]);

    Ok(())
}

/// Tests scanning an empty scope.
///
/// Expected: Ok with no accounts
#[tokio::test]
async fn returns_empty_for_unused_scope() -> Result<(), AppError> {
    let test = TestBuilder::new().with_aura_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_aura_account(db).await?;

    let repo = AuraAccountRepository::new(db);
    let accounts: Vec<(u64, AuraAccount)> = repo.get_all_by_scope(&Scope::Global).await?;

    assert!(accounts.is_empty());

    Ok(())
}
