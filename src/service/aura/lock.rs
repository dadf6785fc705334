//! Per-account mutual exclusion.
//!
//! Every read-modify-write of an account runs while holding that account's lock, so two
//! commands from the same process never interleave on one balance. Writers in other processes
//! are caught by the version check in the repository instead.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::model::aura::Scope;

type AccountKey = (u64, Scope);

/// Registry of per-(user, scope) async locks.
///
/// Cheap to clone; clones share the same registry.
#[derive(Clone, Default)]
pub struct AccountLocks {
    locks: Arc<Mutex<HashMap<AccountKey, Arc<Mutex<()>>>>>,
}

impl AccountLocks {
    pub fn new() -> Self {
        Self::default()
    }

    async fn lock_for(&self, key: AccountKey) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(key).or_default().clone()
    }

    /// Waits for exclusive access to one account.
    ///
    /// # Returns
    /// - Guard releasing the account when dropped
    pub async fn acquire(&self, user_id: u64, scope: Scope) -> OwnedMutexGuard<()> {
        self.lock_for((user_id, scope)).await.lock_owned().await
    }

    /// Waits for exclusive access to two accounts of the same scope.
    ///
    /// Locks are always taken in ascending user order so two opposite transfers between the
    /// same pair cannot deadlock. Passing the same user twice takes a single lock.
    ///
    /// # Returns
    /// - Guards releasing both accounts when dropped
    pub async fn acquire_pair(
        &self,
        first: u64,
        second: u64,
        scope: Scope,
    ) -> Vec<OwnedMutexGuard<()>> {
        let mut users = [first, second];
        users.sort_unstable();

        let mut guards = Vec::with_capacity(2);
        guards.push(self.acquire(users[0], scope).await);
        if users[1] != users[0] {
            guards.push(self.acquire(users[1], scope).await);
        }
        guards
    }

    /// Drops locks nobody currently holds or waits on.
    ///
    /// # Returns
    /// - Number of entries removed
    pub async fn prune_idle(&self) -> usize {
        let mut locks = self.locks.lock().await;
        let before = locks.len();
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        before - locks.len()
    }

    /// Number of accounts with a registered lock.
    pub async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
