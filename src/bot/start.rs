use sea_orm::DatabaseConnection;
use serenity::all::{Client, GatewayIntents};

use crate::{
    bot::handler::Handler, config::Config, error::AppError, service::aura::lock::AccountLocks,
};

/// Builds the Discord client without connecting it.
///
/// # Arguments
/// - `config` - Application configuration providing the token and command settings
/// - `db` - Database connection used by the command handler
/// - `locks` - Account lock registry shared with the lock pruning scheduler
///
/// # Returns
/// - `Ok(Client)` - Client ready to be started
/// - `Err(AppError::DiscordErr)` - Client could not be built (e.g. malformed token)
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
    locks: AccountLocks,
) -> Result<Client, AppError> {
    // MESSAGE_CONTENT and GUILD_MEMBERS are privileged intents
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS;

    let handler = Handler::new(db, locks, config);

    let client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Connects the bot to Discord and processes events until shutdown.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
