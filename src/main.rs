mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod util;

use crate::{
    bot::start::{init_bot, start_bot},
    config::Config,
    error::AppError,
    scheduler::lock_pruning,
    service::aura::lock::AccountLocks,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    let locks = AccountLocks::new();

    lock_pruning::start_scheduler(locks.clone()).await?;

    tracing::info!(
        scope_mode = ?config.scope_mode,
        prefix = %config.command_prefix,
        "Starting aura bot"
    );

    let client = init_bot(&config, db, locks).await?;
    start_bot(client).await
}
