use sea_orm::DatabaseConnection;
use serenity::all::{Context, EventHandler, Message, Ready};
use serenity::async_trait;

use crate::{config::Config, config::ScopeMode, service::aura::lock::AccountLocks};

pub mod message;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub db: DatabaseConnection,
    pub locks: AccountLocks,
    pub command_prefix: String,
    /// User allowed to run `grant`, if any.
    pub bot_owner_id: Option<u64>,
    pub scope_mode: ScopeMode,
}

impl Handler {
    pub fn new(db: DatabaseConnection, locks: AccountLocks, config: &Config) -> Self {
        Self {
            db,
            locks,
            command_prefix: config.command_prefix.clone(),
            bot_owner_id: config.bot_owner_id,
            scope_mode: config.scope_mode,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready, self.scope_mode).await;
    }

    /// Called when a message is sent in a channel the bot can see
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(self, ctx, message).await;
    }
}
