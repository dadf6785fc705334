//! Timed effects (shield, multiplier) attached to an account.
//!
//! An effect is active while `now < expires`. Expired and absent effects are treated the
//! same everywhere.

use chrono::{DateTime, Duration, Utc};

use crate::{
    error::aura::AuraError,
    model::aura::{AuraAccount, EffectKind},
};

/// Whether an effect with the given expiry is active at `now`.
pub fn is_active(expires: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    matches!(expires, Some(expires) if now < expires)
}

/// Time left on an effect, or `None` when it is not active.
pub fn remaining(expires: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<std::time::Duration> {
    match expires {
        Some(expires) if now < expires => (expires - now).to_std().ok(),
        _ => None,
    }
}

/// Expiry currently recorded for an effect kind.
pub fn expiry(account: &AuraAccount, kind: EffectKind) -> Option<DateTime<Utc>> {
    match kind {
        EffectKind::Shield => account.shield_expires,
        EffectKind::Multiplier => account.multiplier_expires,
    }
}

/// Whether the account's effect of the given kind is active at `now`.
pub fn has_effect(account: &AuraAccount, kind: EffectKind, now: DateTime<Utc>) -> bool {
    is_active(expiry(account, kind), now)
}

/// Doubles a gain when the account's multiplier is active.
///
/// Losses and zero amounts pass through unchanged.
///
/// # Returns
/// - `Ok(i64)` - The amount to credit
/// - `Err(AuraError::AmountOverflow)` - The doubled gain does not fit
pub fn apply_multiplier(
    amount: i64,
    account: &AuraAccount,
    now: DateTime<Utc>,
) -> Result<i64, AuraError> {
    if amount > 0 && has_effect(account, EffectKind::Multiplier, now) {
        amount.checked_mul(2).ok_or(AuraError::AmountOverflow)
    } else {
        Ok(amount)
    }
}

/// Starts an effect lasting `duration` from `now`.
///
/// Any remaining time on an active effect of the same kind is discarded; effects never
/// stack.
///
/// # Returns
/// - The new expiry timestamp
pub fn grant_effect(
    account: &mut AuraAccount,
    kind: EffectKind,
    duration: Duration,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    let expires = now + duration;

    match kind {
        EffectKind::Shield => account.shield_expires = Some(expires),
        EffectKind::Multiplier => account.multiplier_expires = Some(expires),
    }

    expires
}
