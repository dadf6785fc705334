//! Error types for the aura bot.
//!
//! `AppError` is the top-level error type that wraps domain-specific errors. `AuraError`
//! carries every rejection the aura engine can report to a player; everything else is an
//! opaque failure that the front-end logs and renders generically.

pub mod aura;
pub mod command;
pub mod config;
pub mod internal;

use thiserror::Error;

use crate::error::{aura::AuraError, config::ConfigError, internal::InternalError};

/// Top-level application error type.
///
/// Most variants use `#[from]` for automatic error conversion so `?` works across the
/// service, data and bot layers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// A player-facing rejection from the aura engine.
    ///
    /// Never logged as an error; the front-end shows the message to the player.
    #[error(transparent)]
    AuraErr(#[from] AuraError),

    /// Internal issue indicating unexpected data or a possible bug.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
