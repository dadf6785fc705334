//! Stored aura account, one row per (user, scope).

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "aura_account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Discord user ID stored as a string.
    pub user_id: String,
    /// Guild ID as a string, or `"global"` for the global scope.
    pub scope: String,
    /// Serialized account blob (amount, effects, items, cooldowns, stats).
    pub data: Json,
    /// Optimistic concurrency counter, bumped on every write.
    pub version: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
