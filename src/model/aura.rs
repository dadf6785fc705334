//! Aura account model and its supporting value types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

use crate::error::{aura::AuraError, internal::InternalError, AppError};

/// Balance every account starts with before its first write.
pub const STARTING_AURA: i64 = 100;

/// Scope key used when balances are shared across every guild.
pub const GLOBAL_SCOPE_KEY: &str = "global";

/// Namespace within which balances and leaderboards are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// Balances belong to a single guild.
    Guild(u64),
    /// One balance per user across every guild.
    Global,
}

impl Scope {
    /// Returns the key the scope is stored under.
    pub fn key(&self) -> String {
        match self {
            Self::Guild(guild_id) => guild_id.to_string(),
            Self::Global => GLOBAL_SCOPE_KEY.to_string(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Guild(guild_id) => write!(f, "guild {}", guild_id),
            Self::Global => f.write_str(GLOBAL_SCOPE_KEY),
        }
    }
}

/// Participant in a two-party operation as reported by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    /// Discord user ID.
    pub id: u64,
    /// Whether the user is a bot; bots never hold aura.
    pub is_bot: bool,
}

impl Player {
    pub fn new(id: u64) -> Self {
        Self { id, is_bot: false }
    }

    pub fn bot(id: u64) -> Self {
        Self { id, is_bot: true }
    }
}

/// Aggregate counters kept on every account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuraStats {
    pub duels_won: u64,
    pub duels_lost: u64,
    pub total_gained: i64,
    pub total_lost: i64,
    pub biggest_win: i64,
    pub biggest_loss: i64,
}

/// Purchasable shop items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShopItem {
    Shield,
    Multiplier,
    Bomb,
}

impl ShopItem {
    /// All catalog items in display order.
    pub const ALL: [ShopItem; 3] = [Self::Shield, Self::Multiplier, Self::Bomb];

    /// Identifier players type to buy the item.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Shield => "shield",
            Self::Multiplier => "multiplier",
            Self::Bomb => "bomb",
        }
    }

    /// Looks up an item by its identifier, case-insensitively.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|item| item.id().eq_ignore_ascii_case(id.trim()))
    }
}

/// Time-bounded buffs attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Halves incoming drain damage and cuts drain odds.
    Shield,
    /// Doubles positive aura gains.
    Multiplier,
}

/// Actions gated by a per-user cooldown window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CooldownAction {
    Slots,
    Flip,
    Roll,
    Drain,
}

impl CooldownAction {
    /// Key under which the last use is recorded in `AuraAccount::cooldowns`.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Slots => "slots",
            Self::Flip => "flip",
            Self::Roll => "roll",
            Self::Drain => "drain",
        }
    }
}

impl fmt::Display for CooldownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-user, per-scope aura record.
///
/// Serialized as a JSON blob; unknown fields are ignored and missing fields fall back to
/// their defaults so older blobs keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuraAccount {
    /// Balance. No floor or ceiling; may go negative.
    pub amount: i64,
    /// When the daily reward was last claimed.
    pub daily_last: Option<DateTime<Utc>>,
    pub shield_expires: Option<DateTime<Utc>>,
    pub multiplier_expires: Option<DateTime<Utc>>,
    /// Owned one-shot items.
    pub items: Vec<ShopItem>,
    /// Last use of each gated action, keyed by `CooldownAction::key`.
    pub cooldowns: BTreeMap<String, DateTime<Utc>>,
    pub stats: AuraStats,
}

impl Default for AuraAccount {
    fn default() -> Self {
        Self {
            amount: STARTING_AURA,
            daily_last: None,
            shield_expires: None,
            multiplier_expires: None,
            items: Vec::new(),
            cooldowns: BTreeMap::new(),
            stats: AuraStats::default(),
        }
    }
}

impl AuraAccount {
    /// Applies a signed delta to the balance and records it in the stats.
    ///
    /// Gains add to `total_gained` and may raise `biggest_win`; losses add their magnitude
    /// to `total_lost` and may raise `biggest_loss`. A zero delta changes nothing. Stat
    /// counters saturate at `i64::MAX`.
    ///
    /// # Returns
    /// - `Ok(())` - The balance and stats were updated
    /// - `Err(AuraError::AmountOverflow)` - The new balance does not fit; nothing changed
    pub fn apply_delta(&mut self, delta: i64) -> Result<(), AuraError> {
        self.amount = self
            .amount
            .checked_add(delta)
            .ok_or(AuraError::AmountOverflow)?;

        if delta > 0 {
            self.stats.total_gained = self.stats.total_gained.saturating_add(delta);
            self.stats.biggest_win = self.stats.biggest_win.max(delta);
        } else if delta < 0 {
            let loss = i64::try_from(delta.unsigned_abs()).unwrap_or(i64::MAX);
            self.stats.total_lost = self.stats.total_lost.saturating_add(loss);
            self.stats.biggest_loss = self.stats.biggest_loss.max(loss);
        }

        Ok(())
    }

    /// Number of bombs the account currently owns.
    pub fn bomb_count(&self) -> usize {
        self.items
            .iter()
            .filter(|item| **item == ShopItem::Bomb)
            .count()
    }

    /// Removes one owned item, returning whether one was present.
    pub fn take_item(&mut self, item: ShopItem) -> bool {
        match self.items.iter().position(|owned| *owned == item) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Account as read from the store, with the bookkeeping needed to write it back.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAccount {
    /// Row ID, or `None` when the account has never been written (implicit default).
    pub id: Option<i32>,
    /// Version the account was read at.
    pub version: i64,
    pub account: AuraAccount,
}

impl StoredAccount {
    /// Converts a stored row into the account it holds.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(StoredAccount)` - The decoded account with its row id and version
    /// - `Err(AppError::InternalErr(CorruptAccount))` - The stored blob could not be decoded
    pub fn from_entity(entity: entity::aura_account::Model) -> Result<Self, AppError> {
        let account = serde_json::from_value(entity.data).map_err(|e| {
            InternalError::CorruptAccount {
                user_id: entity.user_id,
                scope: entity.scope,
                source: e,
            }
        })?;

        Ok(Self {
            id: Some(entity.id),
            version: entity.version,
            account,
        })
    }

    /// The implicit default account for a user who has never been written.
    pub fn implicit() -> Self {
        Self {
            id: None,
            version: 0,
            account: AuraAccount::default(),
        }
    }
}
