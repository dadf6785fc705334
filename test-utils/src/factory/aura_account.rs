//! Aura account factory for seeding stored account rows.
//!
//! Writes the JSON blob layout the bot persists, so rows created here load through the
//! repository exactly like rows the bot wrote itself.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use serde_json::json;

use crate::factory::helpers::next_id;

/// Scope key used for the global scope.
pub const GLOBAL_SCOPE: &str = "global";

/// Factory for creating stored aura accounts with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let account = AuraAccountFactory::new(&db)
///     .user_id(42)
///     .guild(7)
///     .amount(500)
///     .shield_expires(Utc::now() + Duration::hours(1))
///     .build()
///     .await?;
/// ```
pub struct AuraAccountFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: u64,
    scope: String,
    amount: i64,
    shield_expires: Option<DateTime<Utc>>,
    multiplier_expires: Option<DateTime<Utc>>,
    daily_last: Option<DateTime<Utc>>,
    items: Vec<String>,
}

impl<'a> AuraAccountFactory<'a> {
    /// Creates a new AuraAccountFactory with default values.
    ///
    /// Defaults:
    /// - user_id: auto-incremented unique ID
    /// - scope: a unique guild ID
    /// - amount: `100`
    /// - no effects, no items
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the row
    ///
    /// # Returns
    /// - `AuraAccountFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            user_id: next_id(),
            scope: next_id().to_string(),
            amount: 100,
            shield_expires: None,
            multiplier_expires: None,
            daily_last: None,
            items: Vec::new(),
        }
    }

    pub fn user_id(mut self, user_id: u64) -> Self {
        self.user_id = user_id;
        self
    }

    /// Places the account in the given guild's scope.
    pub fn guild(mut self, guild_id: u64) -> Self {
        self.scope = guild_id.to_string();
        self
    }

    /// Places the account in the global scope.
    pub fn global(mut self) -> Self {
        self.scope = GLOBAL_SCOPE.to_string();
        self
    }

    pub fn amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    pub fn shield_expires(mut self, expires: DateTime<Utc>) -> Self {
        self.shield_expires = Some(expires);
        self
    }

    pub fn multiplier_expires(mut self, expires: DateTime<Utc>) -> Self {
        self.multiplier_expires = Some(expires);
        self
    }

    pub fn daily_last(mut self, claimed_at: DateTime<Utc>) -> Self {
        self.daily_last = Some(claimed_at);
        self
    }

    /// Adds an owned one-shot item (e.g. `"bomb"`).
    pub fn item(mut self, item: &str) -> Self {
        self.items.push(item.to_string());
        self
    }

    /// Builds and inserts the aura account row into the database.
    ///
    /// # Returns
    /// - `Ok(Model)` - The created aura account row at version 0
    /// - `Err(DbErr)` - Database error during insertion
    pub async fn build(self) -> Result<entity::aura_account::Model, DbErr> {
        let now = Utc::now();

        let data = json!({
            "amount": self.amount,
            "daily_last": self.daily_last,
            "shield_expires": self.shield_expires,
            "multiplier_expires": self.multiplier_expires,
            "items": self.items,
            "cooldowns": {},
            "stats": {
                "duels_won": 0,
                "duels_lost": 0,
                "total_gained": 0,
                "total_lost": 0,
                "biggest_win": 0,
                "biggest_loss": 0,
            },
        });

        entity::aura_account::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(self.user_id.to_string()),
            scope: ActiveValue::Set(self.scope),
            data: ActiveValue::Set(data),
            version: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an aura account with default values.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(Model)` - The created aura account row
/// - `Err(DbErr)` - Database error during insertion
pub async fn create_aura_account(
    db: &DatabaseConnection,
) -> Result<entity::aura_account::Model, DbErr> {
    AuraAccountFactory::new(db).build().await
}

/// Creates an aura account for a user in a guild with a specific amount.
///
/// # Arguments
/// - `db` - Database connection
/// - `user_id` - Discord user ID
/// - `guild_id` - Guild the account is scoped to
/// - `amount` - Starting aura balance
///
/// # Returns
/// - `Ok(Model)` - The created aura account row
/// - `Err(DbErr)` - Database error during insertion
pub async fn create_aura_account_with_amount(
    db: &DatabaseConnection,
    user_id: u64,
    guild_id: u64,
    amount: i64,
) -> Result<entity::aura_account::Model, DbErr> {
    AuraAccountFactory::new(db)
        .user_id(user_id)
        .guild(guild_id)
        .amount(amount)
        .build()
        .await
}
