//! Per-user, per-action cooldown windows.
//!
//! Last-use timestamps live on the account itself, so consuming a cooldown is part of the
//! same atomic account update as the action it gates.

use chrono::{DateTime, Duration, Utc};

use crate::{
    error::aura::AuraError,
    model::aura::{AuraAccount, CooldownAction},
};

/// Window between two daily claims.
pub const DAILY_WINDOW: Duration = Duration::hours(20);

/// Window enforced between two uses of the action.
pub fn window(action: CooldownAction) -> Duration {
    match action {
        CooldownAction::Slots => Duration::seconds(30),
        CooldownAction::Flip => Duration::seconds(15),
        CooldownAction::Roll => Duration::seconds(20),
        CooldownAction::Drain => Duration::minutes(5),
    }
}

/// Time until `action` may be used again, or `None` when it is available now.
pub fn remaining(
    account: &AuraAccount,
    action: CooldownAction,
    now: DateTime<Utc>,
    window: Duration,
) -> Option<std::time::Duration> {
    let last_used = account.cooldowns.get(action.key())?;
    let ready_at = *last_used + window;

    if now < ready_at {
        (ready_at - now).to_std().ok()
    } else {
        None
    }
}

/// Records a use of `action` at `now` if its window has elapsed.
///
/// # Returns
/// - `true` - The action was available; `now` is recorded as its last use
/// - `false` - The action is still cooling down; the account is untouched
pub fn check_and_consume(
    account: &mut AuraAccount,
    action: CooldownAction,
    now: DateTime<Utc>,
    window: Duration,
) -> bool {
    if remaining(account, action, now, window).is_some() {
        return false;
    }

    account.cooldowns.insert(action.key().to_string(), now);
    true
}

/// Consumes the action's standard window or reports how long is left.
pub fn consume(
    account: &mut AuraAccount,
    action: CooldownAction,
    now: DateTime<Utc>,
) -> Result<(), AuraError> {
    let window = window(action);

    if check_and_consume(account, action, now, window) {
        return Ok(());
    }

    Err(AuraError::CooldownActive {
        action,
        remaining: remaining(account, action, now, window).unwrap_or_default(),
    })
}
