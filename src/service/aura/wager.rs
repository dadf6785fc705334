//! Mini-game rules: randomized draws and payout calculation.
//!
//! Draws and payouts are separate functions so every payout rule can be checked against a
//! fixed draw. `AuraService` strings them together inside an atomic account update.

use chrono::{DateTime, Utc};
use rand::{seq::IndexedRandom, Rng};

use crate::{
    error::aura::AuraError,
    model::{
        aura::AuraAccount,
        outcome::{CoinSide, DailyBonus, RollHit, Settlement, SlotsPayout, WagerResult},
    },
    service::aura::{cooldown::DAILY_WINDOW, effect},
};

pub const MIN_SLOTS_BET: i64 = 10;
pub const MIN_FLIP_BET: i64 = 5;
pub const MIN_ROLL_BET: i64 = 10;

/// Slot reel alphabet; every symbol is equally likely.
pub const SLOT_SYMBOLS: [&str; 10] = [
    "🔥", "⚡", "💎", "🌟", "👑", "🎯", "🚀", "💀", "🌙", "☄️",
];

const DIAMOND: &str = "💎";
const CROWN: &str = "👑";
const FIRE: &str = "🔥";

/// Daily bonus events in priority order with their chance of triggering.
///
/// Evaluated in order with an independent draw each; the first hit wins and the rest are
/// skipped, so at most one bonus applies.
pub const DAILY_BONUSES: [(f64, DailyBonus); 3] = [
    (0.05, DailyBonus::CosmicAlignment),
    (0.10, DailyBonus::LightningStrike),
    (0.15, DailyBonus::CosmicCarnival),
];

pub const DAILY_MESSAGES: [&str; 10] = [
    "✨ The universe smiles upon you!",
    "🌟 Your aura radiates with cosmic energy!",
    "💫 Fortune favors the bold!",
    "🔮 The stars align in your favor!",
    "⚡ Lightning strikes your soul with power!",
    "🌈 You've been blessed by the rainbow gods!",
    "🎭 The cosmic theater applauds your presence!",
    "🎪 The carnival of destiny rewards you!",
    "🎨 Your aura paints the sky with brilliance!",
    "🎯 Bullseye! Cosmic accuracy achieved!",
];

/// Rejects bets below the game's minimum.
pub fn validate_bet(bet: i64, min: i64) -> Result<(), AuraError> {
    if bet < min {
        return Err(AuraError::BelowMinimum { min, amount: bet });
    }
    Ok(())
}

/// Rejects the operation when the balance cannot cover `required`.
pub fn ensure_funds(account: &AuraAccount, required: i64) -> Result<(), AuraError> {
    if account.amount < required {
        return Err(AuraError::InsufficientFunds {
            required,
            available: account.amount,
        });
    }
    Ok(())
}

/// Applies a game payout to the account.
///
/// Gains are doubled by an active multiplier before being credited; losses never are. The
/// credited amount is recorded in the account stats.
pub fn settle(
    account: &mut AuraAccount,
    net: i64,
    now: DateTime<Utc>,
) -> Result<Settlement, AuraError> {
    let credited = effect::apply_multiplier(net, account, now)?;
    account.apply_delta(credited)?;

    Ok(Settlement {
        net,
        credited,
        balance: account.amount,
    })
}

/// Draws three reel symbols independently.
pub fn spin<R: Rng + ?Sized>(rng: &mut R) -> [&'static str; 3] {
    std::array::from_fn(|_| *SLOT_SYMBOLS.choose(rng).unwrap_or(&SLOT_SYMBOLS[0]))
}

/// Classifies a spin into its payout tier.
pub fn slots_payout(symbols: [&str; 3]) -> SlotsPayout {
    let [a, b, c] = symbols;

    if a == b && b == c {
        match a {
            DIAMOND => SlotsPayout::DiamondJackpot,
            CROWN => SlotsPayout::CrownTriple,
            FIRE => SlotsPayout::FireTriple,
            _ => SlotsPayout::Triple,
        }
    } else if a == b || b == c || a == c {
        SlotsPayout::Double
    } else {
        SlotsPayout::NoMatch
    }
}

/// Net payout of a spin: the bet times the tier multiplier, minus the stake.
pub fn slots_net(bet: i64, payout: SlotsPayout) -> Result<(i64, WagerResult), AuraError> {
    match payout {
        SlotsPayout::NoMatch => Ok((-bet, WagerResult::Loss)),
        tier => {
            let net = bet
                .checked_mul(tier.multiplier())
                .and_then(|gross| gross.checked_sub(bet))
                .ok_or(AuraError::AmountOverflow)?;
            Ok((net, WagerResult::from_net(net)))
        }
    }
}

/// Tosses a fair coin.
pub fn toss<R: Rng + ?Sized>(rng: &mut R) -> CoinSide {
    if rng.random_bool(0.5) {
        CoinSide::Heads
    } else {
        CoinSide::Tails
    }
}

/// Even-money payout for a coin flip.
pub fn flip_net(choice: CoinSide, result: CoinSide, bet: i64) -> i64 {
    if choice == result {
        bet
    } else {
        -bet
    }
}

/// Validates a dice target, which must be a face of the die.
pub fn validate_target(target: i64) -> Result<u8, AuraError> {
    match u8::try_from(target) {
        Ok(face @ 1..=6) => Ok(face),
        _ => Err(AuraError::InvalidTarget(target)),
    }
}

/// Rolls a six-sided die.
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.random_range(1..=6)
}

/// Classifies a roll by its distance from the target face.
pub fn roll_hit(roll: u8, target: u8) -> RollHit {
    match roll.abs_diff(target) {
        0 => RollHit::Exact,
        1 => RollHit::Close,
        _ => RollHit::Miss,
    }
}

/// Net payout of a dice roll.
///
/// An exact hit returns five times the stake, a near miss returns half of it, anything else
/// loses it.
pub fn roll_net(hit: RollHit, bet: i64) -> Result<i64, AuraError> {
    match hit {
        RollHit::Exact => bet.checked_mul(4).ok_or(AuraError::AmountOverflow),
        RollHit::Close => Ok(bet.div_euclid(2) - bet),
        RollHit::Miss => Ok(-bet),
    }
}

/// Rejects a daily claim made within the daily window of the previous one.
pub fn ensure_daily_ready(account: &AuraAccount, now: DateTime<Utc>) -> Result<(), AuraError> {
    if let Some(last) = account.daily_last {
        let ready_at = last + DAILY_WINDOW;
        if now < ready_at {
            return Err(AuraError::DailyAlreadyClaimed {
                remaining: (ready_at - now).to_std().unwrap_or_default(),
            });
        }
    }
    Ok(())
}

/// Picks at most one bonus, consulting `draw` once per event in priority order.
pub fn select_bonus(mut draw: impl FnMut() -> f64) -> Option<DailyBonus> {
    DAILY_BONUSES
        .iter()
        .find(|(chance, _)| draw() < *chance)
        .map(|(_, bonus)| *bonus)
}

/// Random components of a daily claim.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyDraw {
    /// Base reward, 50..=150.
    pub base: i64,
    /// Extra reward, 0..=50.
    pub streak: i64,
    pub bonus: Option<DailyBonus>,
    pub message: &'static str,
}

impl DailyDraw {
    /// Total reward before any multiplier.
    pub fn reward(&self) -> i64 {
        self.base + self.streak + self.bonus.map_or(0, |bonus| bonus.amount())
    }
}

pub fn draw_daily<R: Rng + ?Sized>(rng: &mut R) -> DailyDraw {
    let base = rng.random_range(50..=150);
    let streak = rng.random_range(0..=50);
    let bonus = select_bonus(|| rng.random::<f64>());
    let message = *DAILY_MESSAGES.choose(rng).unwrap_or(&DAILY_MESSAGES[0]);

    DailyDraw {
        base,
        streak,
        bonus,
        message,
    }
}
