use std::time::Duration;
use thiserror::Error;

use crate::model::aura::CooldownAction;

/// Rejections reported by the aura engine.
///
/// Every variant is raised before any state is persisted; the account is left exactly as it
/// was. Messages are written to be shown to the player as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuraError {
    /// Bet or transfer amount is below the operation's minimum.
    #[error("Minimum is {min} aura, got {amount}")]
    BelowMinimum {
        /// Smallest accepted amount
        min: i64,
        /// Amount supplied
        amount: i64,
    },

    /// Coin flip choice was not heads/tails.
    #[error("Choose 'heads' or 'tails', not '{0}'")]
    InvalidChoice(String),

    /// Dice target outside 1..=6.
    #[error("Target must be between 1-6, got {0}")]
    InvalidTarget(i64),

    /// Amount could not be parsed as a whole number.
    #[error("'{0}' is not a whole number of aura")]
    InvalidAmount(String),

    /// Amount had a fractional part; balances are whole numbers only.
    #[error("Aura only moves in whole amounts, '{0}' has a fractional part")]
    FractionalAmount(String),

    /// Operation targeted the acting player.
    #[error("You cannot target yourself")]
    SelfTarget,

    /// Operation targeted a bot or another non-player entity.
    #[error("Bots don't have aura")]
    NonPlayerTarget,

    /// Shop item id not in the catalog.
    #[error("Item '{0}' not found in the shop")]
    UnknownItem(String),

    /// Bomb detonation without an owned bomb.
    #[error("You don't own an aura bomb")]
    NoBomb,

    /// Balance is below what the operation needs.
    #[error("Insufficient aura: need {required}, have {available}")]
    InsufficientFunds {
        /// Amount the operation requires
        required: i64,
        /// Current balance
        available: i64,
    },

    /// Action is still on cooldown.
    #[error("{} is on cooldown for another {}s", .action, .remaining.as_secs())]
    CooldownActive {
        /// Gated action
        action: CooldownAction,
        /// Time left until the action is available again
        remaining: Duration,
    },

    /// Daily reward was claimed less than 20 hours ago.
    #[error("Daily already claimed, try again in {}h {}m", .remaining.as_secs() / 3600, (.remaining.as_secs() % 3600) / 60)]
    DailyAlreadyClaimed {
        /// Time left until the next claim
        remaining: Duration,
    },

    /// The resulting balance or payout does not fit in an aura amount.
    #[error("That much aura is beyond what the universe can hold")]
    AmountOverflow,

    /// Optimistic update kept losing races with concurrent writers.
    #[error("Your aura is busy, please try again (gave up after {attempts} attempts)")]
    ConcurrencyConflict {
        /// Number of attempts made
        attempts: u32,
    },
}
