//! Ready event handler.
//!
//! Fired once the bot has authenticated and completed the gateway handshake. Only logs
//! connection details; no state needs warming before commands are served.

use serenity::all::{Context, Ready};

use crate::config::ScopeMode;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `ctx` - Discord context
/// - `ready` - Ready event data containing bot user information
/// - `scope_mode` - Where balances are kept, logged for operators
pub async fn handle_ready(_ctx: Context, ready: Ready, scope_mode: ScopeMode) {
    tracing::info!(
        guilds = ready.guilds.len(),
        ?scope_mode,
        "{} is connected to Discord",
        ready.user.name
    );
}
