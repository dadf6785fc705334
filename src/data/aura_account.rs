//! Aura account data repository.
//!
//! Provides the `AuraAccountRepository`, the balance store behind every aura operation. An
//! account is stored as one JSON blob per (user, scope) pair together with a version counter;
//! writes are compare-and-swap on that counter so concurrent writers never overwrite each
//! other silently.

use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, SqlErr,
};

use crate::{
    error::{internal::InternalError, AppError},
    model::aura::{AuraAccount, Scope, StoredAccount},
    util::parse::parse_u64_from_string,
};

/// Repository providing access to stored aura accounts.
///
/// Generic over the connection so the same queries run against the pool or inside a
/// transaction spanning two accounts.
pub struct AuraAccountRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AuraAccountRepository<'a, C> {
    /// Creates a new AuraAccountRepository instance
    ///
    /// # Arguments
    /// - `db` - Reference to a database connection or open transaction
    ///
    /// # Returns
    /// - `AuraAccountRepository` - new repository instance
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Finds the stored account of a user within a scope.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the account owner
    /// - `scope` - Scope the balance belongs to
    ///
    /// # Returns
    /// - `Ok(Some(StoredAccount))` - The account with its row id and version
    /// - `Ok(None)` - The user has never been written in this scope
    /// - `Err(AppError::DbErr)` - Database error during query
    /// - `Err(AppError::InternalErr(CorruptAccount))` - The stored blob could not be decoded
    pub async fn find(
        &self,
        user_id: u64,
        scope: &Scope,
    ) -> Result<Option<StoredAccount>, AppError> {
        let entity = entity::prelude::AuraAccount::find()
            .filter(entity::aura_account::Column::UserId.eq(user_id.to_string()))
            .filter(entity::aura_account::Column::Scope.eq(scope.key()))
            .one(self.db)
            .await?;

        entity.map(StoredAccount::from_entity).transpose()
    }

    /// Finds the stored account of a user, falling back to the implicit default.
    ///
    /// Reading never inserts; the default account is materialized by the first `save`.
    pub async fn find_or_default(
        &self,
        user_id: u64,
        scope: &Scope,
    ) -> Result<StoredAccount, AppError> {
        Ok(self
            .find(user_id, scope)
            .await?
            .unwrap_or_else(StoredAccount::implicit))
    }

    /// Writes an account back if nobody else wrote it since it was read.
    ///
    /// Accounts that were never stored are inserted; the unique (user, scope) index makes a
    /// concurrent first insert lose. Stored accounts are updated only while their version
    /// still matches `stored.version`, and the version is bumped on success.
    ///
    /// # Arguments
    /// - `user_id` - Discord ID of the account owner
    /// - `scope` - Scope the balance belongs to
    /// - `stored` - The account as read, with its modifications applied
    ///
    /// # Returns
    /// - `Ok(true)` - The write was applied
    /// - `Ok(false)` - Another writer got there first; re-read and retry
    /// - `Err(AppError)` - Database or encoding error
    pub async fn save(
        &self,
        user_id: u64,
        scope: &Scope,
        stored: &StoredAccount,
    ) -> Result<bool, AppError> {
        let data = serde_json::to_value(&stored.account).map_err(|e| {
            InternalError::CorruptAccount {
                user_id: user_id.to_string(),
                scope: scope.key(),
                source: e,
            }
        })?;
        let now = Utc::now();

        let Some(id) = stored.id else {
            let result = entity::prelude::AuraAccount::insert(entity::aura_account::ActiveModel {
                user_id: ActiveValue::Set(user_id.to_string()),
                scope: ActiveValue::Set(scope.key()),
                data: ActiveValue::Set(data),
                version: ActiveValue::Set(0),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec(self.db)
            .await;

            return match result {
                Ok(_) => Ok(true),
                Err(err) if is_unique_violation(&err) => Ok(false),
                Err(err) => Err(err.into()),
            };
        };

        let result = entity::prelude::AuraAccount::update_many()
            .set(entity::aura_account::ActiveModel {
                data: ActiveValue::Set(data),
                version: ActiveValue::Set(stored.version + 1),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .filter(entity::aura_account::Column::Id.eq(id))
            .filter(entity::aura_account::Column::Version.eq(stored.version))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Gets every account stored within a scope in insertion order.
    ///
    /// # Arguments
    /// - `scope` - Scope to scan
    ///
    /// # Returns
    /// - `Ok(Vec<(u64, AuraAccount)>)` - Owner IDs paired with their accounts
    /// - `Err(AppError)` - Database error, unparsable user ID or corrupt blob
    pub async fn get_all_by_scope(
        &self,
        scope: &Scope,
    ) -> Result<Vec<(u64, AuraAccount)>, AppError> {
        let entities = entity::prelude::AuraAccount::find()
            .filter(entity::aura_account::Column::Scope.eq(scope.key()))
            .order_by_asc(entity::aura_account::Column::Id)
            .all(self.db)
            .await?;

        entities
            .into_iter()
            .map(|entity| {
                let user_id = parse_u64_from_string(entity.user_id.clone())?;
                let stored = StoredAccount::from_entity(entity)?;
                Ok((user_id, stored.account))
            })
            .collect()
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
