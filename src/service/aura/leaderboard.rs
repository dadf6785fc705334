//! Ranked view of every account in a scope.

use crate::{
    model::{aura::AuraAccount, outcome::LeaderboardEntry},
    service::aura::title::resolve_title,
};

/// Number of entries shown by the leaderboard command.
pub const LEADERBOARD_SIZE: usize = 20;

/// Ranks accounts by balance, highest first.
///
/// Accounts whose user `is_member` rejects are skipped. Ties keep the order in which the
/// accounts were fetched.
///
/// # Arguments
/// - `accounts` - Accounts of one scope in fetch order
/// - `is_member` - Whether the user can still be resolved by the caller
pub fn rank(
    accounts: Vec<(u64, AuraAccount)>,
    is_member: impl Fn(u64) -> bool,
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = accounts
        .into_iter()
        .filter(|(user_id, _)| is_member(*user_id))
        .map(|(user_id, account)| LeaderboardEntry {
            user_id,
            amount: account.amount,
            title: resolve_title(account.amount),
        })
        .collect();

    entries.sort_by(|a, b| b.amount.cmp(&a.amount));
    entries
}
