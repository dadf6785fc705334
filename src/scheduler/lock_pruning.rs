use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::AppError, service::aura::lock::AccountLocks};

/// Starts the lock pruning scheduler
///
/// Every 10 minutes, drops the lock entries of accounts no command currently holds.
///
/// # Arguments
/// - `locks`: Account lock registry shared with the bot
pub async fn start_scheduler(locks: AccountLocks) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_locks = locks.clone();

    let job = Job::new_async("0 */10 * * * *", move |_uuid, _lock| {
        let locks = job_locks.clone();

        Box::pin(async move {
            prune_locks(&locks).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Lock pruning scheduler started");

    Ok(())
}

/// Prunes idle locks once.
///
/// # Returns
/// - Number of entries removed
async fn prune_locks(locks: &AccountLocks) -> usize {
    let pruned = locks.prune_idle().await;
    let remaining = locks.len().await;
    tracing::debug!(pruned, remaining, "Pruned idle account locks");

    pruned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::aura::Scope;

    fn assert_send<T: Send>(_: &T) {}

    /// The job body must be `Send` to be scheduled.
    #[test]
    fn prune_future_is_send() {
        let locks = AccountLocks::new();
        let future = prune_locks(&locks);
        assert_send(&future);
    }

    #[tokio::test]
    async fn prunes_only_idle_locks() {
        let locks = AccountLocks::new();

        drop(locks.acquire(1, Scope::Guild(7)).await);
        let _held = locks.acquire(2, Scope::Guild(7)).await;

        assert_eq!(prune_locks(&locks).await, 1);
        assert_eq!(locks.len().await, 1);
    }
}
