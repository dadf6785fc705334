//! Aura economy service.
//!
//! `AuraService` runs every aura operation as an atomic read-modify-write: it takes the
//! per-account lock, reads the account through the repository, applies the operation to a
//! working copy and writes it back with a version check. A write that loses to a concurrent
//! writer is retried against a fresh read. Operations touching two accounts read and write
//! both inside one transaction.
//!
//! The rules themselves live in the submodules as plain functions over `AuraAccount`.

pub mod cooldown;
pub mod drain;
pub mod effect;
pub mod leaderboard;
pub mod lock;
pub mod shop;
pub mod title;
pub mod wager;

#[cfg(test)]
mod test;

use chrono::{DateTime, Utc};
use rand::Rng;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    data::aura_account::AuraAccountRepository,
    error::{aura::AuraError, AppError},
    model::{
        aura::{AuraAccount, CooldownAction, EffectKind, Player, Scope, ShopItem},
        outcome::{
            AdjustOutcome, BombOutcome, CoinSide, DailyOutcome, DonateOutcome, DrainOutcome,
            FlipOutcome, LeaderboardEntry, PurchaseOutcome, RollOutcome, SlotsOutcome,
        },
    },
};

use self::lock::AccountLocks;

/// Attempts made at an account write before giving up on a contended account.
pub const MAX_UPDATE_ATTEMPTS: u32 = 5;

/// Smallest amount that can be donated.
pub const MIN_DONATION: i64 = 10;

/// Service running aura operations against the balance store.
pub struct AuraService<'a> {
    db: &'a DatabaseConnection,
    locks: &'a AccountLocks,
}

impl<'a> AuraService<'a> {
    /// Creates a new AuraService instance
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `locks` - Per-account lock registry shared by every service instance
    ///
    /// # Returns
    /// - `AuraService` - new service instance
    pub fn new(db: &'a DatabaseConnection, locks: &'a AccountLocks) -> Self {
        Self { db, locks }
    }

    /// Gets a user's account, or the default account if they never played.
    pub async fn account(&self, user_id: u64, scope: Scope) -> Result<AuraAccount, AppError> {
        let repo = AuraAccountRepository::new(self.db);
        Ok(repo.find_or_default(user_id, &scope).await?.account)
    }

    /// Plays one spin of the slot machine.
    ///
    /// # Arguments
    /// - `user_id` - Player placing the bet
    /// - `scope` - Scope of the player's balance
    /// - `bet` - Stake, at least [`wager::MIN_SLOTS_BET`]
    /// - `now` - Current time, used for cooldown and multiplier checks
    /// - `rng` - Source of the reel draws
    ///
    /// # Returns
    /// - `Ok(SlotsOutcome)` - Symbols drawn, payout tier and settlement
    /// - `Err(AppError::AuraErr)` - Bet too small, insufficient funds or cooldown active
    /// - `Err(AppError)` - Database error or persistent write contention
    pub async fn play_slots<R: Rng + ?Sized>(
        &self,
        user_id: u64,
        scope: Scope,
        bet: i64,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<SlotsOutcome, AppError> {
        wager::validate_bet(bet, wager::MIN_SLOTS_BET)?;

        self.update(user_id, scope, "slots", |account| {
            wager::ensure_funds(account, bet)?;
            cooldown::consume(account, CooldownAction::Slots, now)?;

            let symbols = wager::spin(&mut *rng);
            let payout = wager::slots_payout(symbols);
            let (net, result) = wager::slots_net(bet, payout)?;
            let settlement = wager::settle(account, net, now)?;

            Ok(SlotsOutcome {
                symbols,
                payout,
                result,
                settlement,
            })
        })
        .await
    }

    /// Flips a coin against the player's call.
    ///
    /// # Returns
    /// - `Ok(FlipOutcome)` - Side landed and settlement
    /// - `Err(AppError::AuraErr)` - Bet too small, insufficient funds or cooldown active
    pub async fn play_flip<R: Rng + ?Sized>(
        &self,
        user_id: u64,
        scope: Scope,
        bet: i64,
        choice: CoinSide,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<FlipOutcome, AppError> {
        wager::validate_bet(bet, wager::MIN_FLIP_BET)?;

        self.update(user_id, scope, "flip", |account| {
            wager::ensure_funds(account, bet)?;
            cooldown::consume(account, CooldownAction::Flip, now)?;

            let result = wager::toss(&mut *rng);
            let net = wager::flip_net(choice, result, bet);
            let settlement = wager::settle(account, net, now)?;

            Ok(FlipOutcome {
                choice,
                result,
                settlement,
            })
        })
        .await
    }

    /// Rolls a die against the player's target face.
    ///
    /// # Returns
    /// - `Ok(RollOutcome)` - Face rolled, how close it was and settlement
    /// - `Err(AppError::AuraErr)` - Bet too small, target off the die, insufficient funds or
    ///   cooldown active
    pub async fn play_roll<R: Rng + ?Sized>(
        &self,
        user_id: u64,
        scope: Scope,
        bet: i64,
        target: i64,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<RollOutcome, AppError> {
        wager::validate_bet(bet, wager::MIN_ROLL_BET)?;
        let target = wager::validate_target(target)?;

        self.update(user_id, scope, "roll", |account| {
            wager::ensure_funds(account, bet)?;
            cooldown::consume(account, CooldownAction::Roll, now)?;

            let roll = wager::roll_die(&mut *rng);
            let hit = wager::roll_hit(roll, target);
            let net = wager::roll_net(hit, bet)?;
            let settlement = wager::settle(account, net, now)?;

            Ok(RollOutcome {
                roll,
                target,
                hit,
                settlement,
            })
        })
        .await
    }

    /// Claims the daily reward.
    ///
    /// # Returns
    /// - `Ok(DailyOutcome)` - Reward drawn, bonus hit if any and amount credited
    /// - `Err(AppError::AuraErr(DailyAlreadyClaimed))` - Claimed within the last 20 hours
    pub async fn claim_daily<R: Rng + ?Sized>(
        &self,
        user_id: u64,
        scope: Scope,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<DailyOutcome, AppError> {
        self.update(user_id, scope, "daily", |account| {
            wager::ensure_daily_ready(account, now)?;

            let draw = wager::draw_daily(&mut *rng);
            let reward = draw.reward();
            let settlement = wager::settle(account, reward, now)?;
            account.daily_last = Some(now);

            Ok(DailyOutcome {
                reward,
                bonus: draw.bonus,
                message: draw.message,
                credited: settlement.credited,
                balance: settlement.balance,
            })
        })
        .await
    }

    /// Moves aura from one player to another.
    ///
    /// Donations are never boosted by a multiplier, so the total held by both players is
    /// unchanged.
    ///
    /// # Returns
    /// - `Ok(DonateOutcome)` - Amount moved and both new balances
    /// - `Err(AppError::AuraErr)` - Bot or self recipient, amount below [`MIN_DONATION`] or
    ///   insufficient funds
    pub async fn donate(
        &self,
        sender: Player,
        recipient: Player,
        scope: Scope,
        amount: i64,
    ) -> Result<DonateOutcome, AppError> {
        validate_target(sender, recipient)?;
        wager::validate_bet(amount, MIN_DONATION)?;

        self.update_pair(sender.id, recipient.id, scope, "donation", |from, to| {
            wager::ensure_funds(from, amount)?;

            from.apply_delta(-amount)?;
            to.apply_delta(amount)?;

            Ok(DonateOutcome {
                amount,
                sender_balance: from.amount,
                recipient_balance: to.amount,
            })
        })
        .await
    }

    /// Attempts to steal aura from another player.
    ///
    /// Odds depend on the wealth gap and the target's shield. A failed attempt costs the
    /// attacker a penalty; either way the attacker's drain cooldown is consumed.
    ///
    /// # Returns
    /// - `Ok(DrainOutcome::Drained)` - Amount moved from target to attacker
    /// - `Ok(DrainOutcome::Backfired)` - Penalty paid by the attacker
    /// - `Err(AppError::AuraErr)` - Bot or self target, or cooldown active
    pub async fn drain<R: Rng + ?Sized>(
        &self,
        attacker: Player,
        target: Player,
        scope: Scope,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<DrainOutcome, AppError> {
        validate_target(attacker, target)?;

        self.update_pair(attacker.id, target.id, scope, "drain", |attacker, target| {
            cooldown::consume(attacker, CooldownAction::Drain, now)?;

            let shielded = effect::has_effect(target, EffectKind::Shield, now);
            let chance = drain::success_probability(attacker.amount, target.amount, shielded);

            if drain::roll_success(&mut *rng, chance) {
                let amount = drain::draw_amount(&mut *rng, target.amount, shielded);
                target.apply_delta(-amount)?;
                attacker.apply_delta(amount)?;

                Ok(DrainOutcome::Drained {
                    amount,
                    shielded,
                    attacker_balance: attacker.amount,
                    target_balance: target.amount,
                })
            } else {
                let penalty = drain::draw_backfire(&mut *rng);
                attacker.apply_delta(-penalty)?;

                Ok(DrainOutcome::Backfired {
                    penalty,
                    attacker_balance: attacker.amount,
                })
            }
        })
        .await
    }

    /// Buys an item from the shop.
    ///
    /// Shields and multipliers start immediately and replace any active effect of the same
    /// kind; bombs go into the inventory.
    ///
    /// # Arguments
    /// - `item_id` - Shop identifier as typed by the player
    ///
    /// # Returns
    /// - `Ok(PurchaseOutcome)` - Item bought, cost, new balance and effect expiry if timed
    /// - `Err(AppError::AuraErr)` - Unknown item or insufficient funds
    pub async fn purchase(
        &self,
        user_id: u64,
        scope: Scope,
        item_id: &str,
        now: DateTime<Utc>,
    ) -> Result<PurchaseOutcome, AppError> {
        let item = ShopItem::from_id(item_id)
            .ok_or_else(|| AuraError::UnknownItem(item_id.to_string()))?;
        let listing = shop::listing(item);

        self.update(user_id, scope, "shop_purchase", |account| {
            wager::ensure_funds(account, listing.cost)?;

            account.apply_delta(-listing.cost)?;
            let expires = match shop::effect(item) {
                Some((kind, duration)) => {
                    Some(effect::grant_effect(account, kind, duration, now))
                }
                None => {
                    account.items.push(item);
                    None
                }
            };

            Ok(PurchaseOutcome {
                item,
                cost: listing.cost,
                balance: account.amount,
                expires,
            })
        })
        .await
    }

    /// Detonates one owned bomb on another player.
    ///
    /// Bomb damage ignores shields and is destroyed rather than transferred.
    ///
    /// # Returns
    /// - `Ok(BombOutcome)` - Damage dealt, target's new balance and bombs left
    /// - `Err(AppError::AuraErr)` - Bot or self target, or no bomb owned
    pub async fn detonate_bomb(
        &self,
        attacker: Player,
        target: Player,
        scope: Scope,
    ) -> Result<BombOutcome, AppError> {
        validate_target(attacker, target)?;

        self.update_pair(attacker.id, target.id, scope, "bomb", |attacker, target| {
            if !attacker.take_item(ShopItem::Bomb) {
                return Err(AuraError::NoBomb);
            }

            target.apply_delta(-shop::BOMB_DAMAGE)?;

            Ok(BombOutcome {
                damage: shop::BOMB_DAMAGE,
                target_balance: target.amount,
                bombs_left: attacker.bomb_count(),
            })
        })
        .await
    }

    /// Applies an administrative adjustment to a balance.
    ///
    /// Positive deltas are boosted by an active multiplier like any other gain.
    ///
    /// # Arguments
    /// - `delta` - Signed whole amount to apply
    /// - `reason` - Free-form reason recorded in the log
    pub async fn adjust(
        &self,
        user_id: u64,
        scope: Scope,
        delta: i64,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<AdjustOutcome, AppError> {
        self.update(user_id, scope, reason, |account| {
            let old_amount = account.amount;
            let settlement = wager::settle(account, delta, now)?;

            Ok(AdjustOutcome {
                old_amount,
                credited: settlement.credited,
                balance: settlement.balance,
            })
        })
        .await
    }

    /// Ranks every account of a scope by balance.
    ///
    /// # Arguments
    /// - `is_member` - Whether a user can still be resolved; others are left out
    pub async fn leaderboard(
        &self,
        scope: Scope,
        is_member: impl Fn(u64) -> bool,
    ) -> Result<Vec<LeaderboardEntry>, AppError> {
        let repo = AuraAccountRepository::new(self.db);
        let accounts = repo.get_all_by_scope(&scope).await?;

        Ok(leaderboard::rank(accounts, is_member))
    }

    /// Runs `apply` against one account as an atomic update.
    ///
    /// A rejection from `apply` aborts without writing. A write that loses to a concurrent
    /// writer is retried with a fresh read, up to [`MAX_UPDATE_ATTEMPTS`] attempts.
    async fn update<T>(
        &self,
        user_id: u64,
        scope: Scope,
        reason: &str,
        mut apply: impl FnMut(&mut AuraAccount) -> Result<T, AuraError>,
    ) -> Result<T, AppError> {
        let _guard = self.locks.acquire(user_id, scope).await;
        let repo = AuraAccountRepository::new(self.db);

        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let mut stored = repo.find_or_default(user_id, &scope).await?;
            let old_amount = stored.account.amount;

            let value = apply(&mut stored.account)?;

            if repo.save(user_id, &scope, &stored).await? {
                tracing::info!(
                    user_id,
                    %scope,
                    old_amount,
                    new_amount = stored.account.amount,
                    reason,
                    "Aura updated"
                );
                return Ok(value);
            }

            tracing::debug!(user_id, %scope, attempt, "Account changed during update, retrying");
        }

        tracing::warn!(user_id, %scope, reason, "Giving up on contended account");
        Err(AuraError::ConcurrencyConflict {
            attempts: MAX_UPDATE_ATTEMPTS,
        }
        .into())
    }

    /// Runs `apply` against two distinct accounts as one atomic update.
    ///
    /// Both accounts are read and written inside one transaction, so either both halves
    /// are stored or neither is.
    async fn update_pair<T>(
        &self,
        first_id: u64,
        second_id: u64,
        scope: Scope,
        reason: &str,
        mut apply: impl FnMut(&mut AuraAccount, &mut AuraAccount) -> Result<T, AuraError>,
    ) -> Result<T, AppError> {
        let _guards = self.locks.acquire_pair(first_id, second_id, scope).await;

        for attempt in 1..=MAX_UPDATE_ATTEMPTS {
            let txn = self.db.begin().await?;
            let repo = AuraAccountRepository::new(&txn);

            let mut first = repo.find_or_default(first_id, &scope).await?;
            let mut second = repo.find_or_default(second_id, &scope).await?;
            let (first_old, second_old) = (first.account.amount, second.account.amount);

            let value = match apply(&mut first.account, &mut second.account) {
                Ok(value) => value,
                Err(err) => {
                    txn.rollback().await?;
                    return Err(err.into());
                }
            };

            if repo.save(first_id, &scope, &first).await?
                && repo.save(second_id, &scope, &second).await?
            {
                txn.commit().await?;

                tracing::info!(
                    user_id = first_id,
                    %scope,
                    old_amount = first_old,
                    new_amount = first.account.amount,
                    reason,
                    "Aura updated"
                );
                tracing::info!(
                    user_id = second_id,
                    %scope,
                    old_amount = second_old,
                    new_amount = second.account.amount,
                    reason,
                    "Aura updated"
                );
                return Ok(value);
            }

            txn.rollback().await?;
            tracing::debug!(
                first_id,
                second_id,
                %scope,
                attempt,
                "Accounts changed during update, retrying"
            );
        }

        tracing::warn!(first_id, second_id, %scope, reason, "Giving up on contended accounts");
        Err(AuraError::ConcurrencyConflict {
            attempts: MAX_UPDATE_ATTEMPTS,
        }
        .into())
    }
}

/// Rejects targets that cannot take part in a two-player operation.
fn validate_target(actor: Player, target: Player) -> Result<(), AuraError> {
    if target.is_bot {
        return Err(AuraError::NonPlayerTarget);
    }
    if target.id == actor.id {
        return Err(AuraError::SelfTarget);
    }
    Ok(())
}
