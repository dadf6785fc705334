//! Structured results returned by aura operations.
//!
//! Outcomes carry semantic values only (amounts, outcome kinds, balances). Turning them into
//! Discord embeds is the bot layer's job.

use chrono::{DateTime, Utc};
use std::{cmp::Ordering, str::FromStr};

use crate::{error::aura::AuraError, model::aura::ShopItem};

/// How a balance change was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    /// Signed payout computed by the game rules.
    pub net: i64,
    /// Amount actually applied to the balance (doubled when a multiplier boosted a gain).
    pub credited: i64,
    /// Balance after the change.
    pub balance: i64,
}

impl Settlement {
    /// Whether an active multiplier boosted this settlement.
    pub fn boosted(&self) -> bool {
        self.credited != self.net
    }
}

/// Coarse result of a wager, used for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WagerResult {
    Win,
    Loss,
    /// The bet came back untouched.
    NoWinNoLoss,
}

impl WagerResult {
    /// Classifies a net payout.
    pub fn from_net(net: i64) -> Self {
        match net.cmp(&0) {
            Ordering::Greater => Self::Win,
            Ordering::Less => Self::Loss,
            Ordering::Equal => Self::NoWinNoLoss,
        }
    }
}

/// Slot machine payout tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotsPayout {
    /// Three diamonds, 50x.
    DiamondJackpot,
    /// Three crowns, 25x.
    CrownTriple,
    /// Three fires, 10x.
    FireTriple,
    /// Any other triple, 5x.
    Triple,
    /// Exactly two matching symbols, 2x.
    Double,
    /// No matching symbols, bet lost.
    NoMatch,
}

impl SlotsPayout {
    /// Payout multiplier applied to the bet.
    pub fn multiplier(&self) -> i64 {
        match self {
            Self::DiamondJackpot => 50,
            Self::CrownTriple => 25,
            Self::FireTriple => 10,
            Self::Triple => 5,
            Self::Double => 2,
            Self::NoMatch => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotsOutcome {
    pub symbols: [&'static str; 3],
    pub payout: SlotsPayout,
    pub result: WagerResult,
    pub settlement: Settlement,
}

/// Side of a coin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoinSide {
    Heads,
    Tails,
}

impl CoinSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heads => "heads",
            Self::Tails => "tails",
        }
    }
}

impl FromStr for CoinSide {
    type Err = AuraError;

    /// Accepts `heads`, `tails`, `h` or `t` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "heads" | "h" => Ok(Self::Heads),
            "tails" | "t" => Ok(Self::Tails),
            _ => Err(AuraError::InvalidChoice(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlipOutcome {
    pub choice: CoinSide,
    pub result: CoinSide,
    pub settlement: Settlement,
}

/// How close a dice roll landed to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollHit {
    /// Roll equals the target.
    Exact,
    /// Roll is one away from the target; half the bet comes back.
    Close,
    Miss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    pub roll: u8,
    pub target: u8,
    pub hit: RollHit,
    pub settlement: Settlement,
}

/// Mutually exclusive bonus events that can add to a daily reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyBonus {
    CosmicAlignment,
    LightningStrike,
    CosmicCarnival,
}

impl DailyBonus {
    /// Bonus aura added to the reward.
    pub fn amount(&self) -> i64 {
        match self {
            Self::CosmicAlignment => 500,
            Self::LightningStrike => 200,
            Self::CosmicCarnival => 100,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CosmicAlignment => "🌟 COSMIC ALIGNMENT! Bonus aura rain!",
            Self::LightningStrike => "⚡ Lightning struck your aura!",
            Self::CosmicCarnival => "🎪 The cosmic carnival visited you!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyOutcome {
    /// Reward before any multiplier, bonus included.
    pub reward: i64,
    pub bonus: Option<DailyBonus>,
    /// Flavor line drawn for this claim.
    pub message: &'static str,
    pub credited: i64,
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonateOutcome {
    pub amount: i64,
    pub sender_balance: i64,
    pub recipient_balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Aura moved from the target to the attacker.
    Drained {
        amount: i64,
        /// The target's shield halved the amount.
        shielded: bool,
        attacker_balance: i64,
        target_balance: i64,
    },
    /// The attempt failed and cost the attacker a penalty.
    Backfired { penalty: i64, attacker_balance: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOutcome {
    pub item: ShopItem,
    pub cost: i64,
    pub balance: i64,
    /// When the granted effect ends, for timed items.
    pub expires: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BombOutcome {
    pub damage: i64,
    pub target_balance: i64,
    pub bombs_left: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustOutcome {
    pub old_amount: i64,
    pub credited: i64,
    pub balance: i64,
}

/// A row of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub user_id: u64,
    pub amount: i64,
    pub title: &'static str,
}
