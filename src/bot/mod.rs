//! Discord front-end for the aura engine.
//!
//! The bot listens for `aura` prefix commands, hands them to [`crate::service::aura`] and
//! replies with an embed. It holds no game rules of its own: parsing lives in [`command`],
//! rendering in [`embed`] and event dispatch in [`handler`].
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild availability, used to resolve the scope of a command
//! - `GUILD_MESSAGES` / `DIRECT_MESSAGES` - Receive prefix commands
//! - `MESSAGE_CONTENT` - Read the command text (privileged intent)
//! - `GUILD_MEMBERS` - List guild members for the leaderboard (privileged intent)
//!
//! Both privileged intents must be enabled in the Discord Developer Portal for the bot
//! application.

pub mod command;
pub mod embed;
pub mod handler;
pub mod start;
