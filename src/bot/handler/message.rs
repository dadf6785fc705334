//! Message handler running `aura` prefix commands.

use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use serenity::all::{Context, CreateEmbed, CreateMessage, GuildId, Message, User, UserId};
use std::collections::HashSet;

use crate::{
    bot::{
        command::aura::{self, AuraCommand},
        embed,
        handler::Handler,
    },
    error::AppError,
    model::aura::{Player, Scope},
    service::aura::AuraService,
};

/// Page size used when listing guild members.
const MEMBER_PAGE_SIZE: u64 = 1000;

/// Handles a message, running it as an aura command when it is one.
///
/// Messages from bots, messages without the command prefix and, when balances are kept per
/// guild, direct messages are ignored. Every command gets exactly one embed reply.
pub async fn handle_message(handler: &Handler, ctx: Context, message: Message) {
    if message.author.bot {
        return;
    }

    let Some(args) = aura::strip_invocation(&message.content, &handler.command_prefix) else {
        return;
    };

    let Some(scope) = handler
        .scope_mode
        .resolve(message.guild_id.map(|guild_id| guild_id.get()))
    else {
        return;
    };

    let reply = match aura::parse(args) {
        Ok(command) => {
            tracing::debug!(
                user_id = message.author.id.get(),
                %scope,
                ?command,
                "Running aura command"
            );

            match run_command(handler, &ctx, &message, scope, command).await {
                Ok(reply) => reply,
                Err(AppError::AuraErr(e)) => embed::error_embed(&e.to_string()),
                Err(e) => {
                    tracing::error!(
                        "Failed to run aura command for user {}: {}",
                        message.author.id,
                        e
                    );
                    embed::error_embed("Something went wrong, please try again later.")
                }
            }
        }
        Err(e) => embed::error_embed(&e.to_string()),
    };

    if let Err(e) = message
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new().embed(reply).reference_message(&message),
        )
        .await
    {
        tracing::error!(
            "Failed to reply to aura command in channel {}: {}",
            message.channel_id,
            e
        );
    }
}

/// Runs a parsed command and renders its outcome.
async fn run_command(
    handler: &Handler,
    ctx: &Context,
    message: &Message,
    scope: Scope,
    command: AuraCommand,
) -> Result<CreateEmbed, AppError> {
    let service = AuraService::new(&handler.db, &handler.locks);
    let author = Player::new(message.author.id.get());
    let now = Utc::now();
    let mut rng = StdRng::from_os_rng();

    let reply = match command {
        AuraCommand::Check { target } => {
            let user = match target {
                Some(user_id) => resolve_user(ctx, message, user_id).await?,
                None => message.author.clone(),
            };
            let account = service.account(user.id.get(), scope).await?;

            embed::account_embed(user.display_name(), user.avatar_url(), &account, now)
        }
        AuraCommand::Slots { bet } => {
            let outcome = service
                .play_slots(author.id, scope, bet, now, &mut rng)
                .await?;
            embed::slots_embed(&outcome)
        }
        AuraCommand::Flip { bet, choice } => {
            let outcome = service
                .play_flip(author.id, scope, bet, choice, now, &mut rng)
                .await?;
            embed::flip_embed(&outcome)
        }
        AuraCommand::Roll { bet, target } => {
            let outcome = service
                .play_roll(author.id, scope, bet, target, now, &mut rng)
                .await?;
            embed::roll_embed(&outcome)
        }
        AuraCommand::Daily => {
            let outcome = service.claim_daily(author.id, scope, now, &mut rng).await?;
            embed::daily_embed(&outcome)
        }
        AuraCommand::Donate { target, amount } => {
            let recipient = resolve_player(ctx, message, target).await?;
            let outcome = service.donate(author, recipient, scope, amount).await?;
            embed::donate_embed(author.id, recipient.id, &outcome)
        }
        AuraCommand::Drain { target } => {
            let target = resolve_player(ctx, message, target).await?;
            let outcome = service
                .drain(author, target, scope, now, &mut rng)
                .await?;
            embed::drain_embed(target.id, &outcome)
        }
        AuraCommand::Leaderboard => {
            let entries = match scope {
                Scope::Guild(guild_id) => {
                    let members = guild_member_ids(ctx, GuildId::new(guild_id)).await?;
                    service
                        .leaderboard(scope, |user_id| members.contains(&user_id))
                        .await?
                }
                Scope::Global => service.leaderboard(scope, |_| true).await?,
            };
            embed::leaderboard_embed(&entries)
        }
        AuraCommand::Titles => embed::titles_embed(),
        AuraCommand::Shop { item: None } => embed::shop_embed(&handler.command_prefix),
        AuraCommand::Shop { item: Some(item) } => {
            let outcome = service.purchase(author.id, scope, &item, now).await?;
            embed::purchase_embed(&outcome)
        }
        AuraCommand::Bomb { target } => {
            let target = resolve_player(ctx, message, target).await?;
            let outcome = service.detonate_bomb(author, target, scope).await?;
            embed::bomb_embed(target.id, &outcome)
        }
        AuraCommand::Grant { target, amount } => {
            if handler.bot_owner_id != Some(author.id) {
                tracing::warn!(
                    user_id = author.id,
                    "Rejected grant from a user who is not the bot owner"
                );
                return Ok(embed::error_embed("Only the bot owner can grant aura."));
            }

            let reason = format!("grant by {}", author.id);
            let outcome = service.adjust(target, scope, amount, &reason, now).await?;
            embed::grant_embed(target, &outcome)
        }
    };

    Ok(reply)
}

/// Looks up a user, preferring the copy Discord attached to the message's mentions.
async fn resolve_user(ctx: &Context, message: &Message, user_id: u64) -> Result<User, AppError> {
    if let Some(user) = message.mentions.iter().find(|user| user.id.get() == user_id) {
        return Ok(user.clone());
    }

    Ok(UserId::new(user_id).to_user(ctx).await?)
}

async fn resolve_player(ctx: &Context, message: &Message, user_id: u64) -> Result<Player, AppError> {
    let user = resolve_user(ctx, message, user_id).await?;

    Ok(Player {
        id: user_id,
        is_bot: user.bot,
    })
}

/// Fetches the IDs of every current member of a guild, one page at a time.
///
/// Requires the GUILD_MEMBERS privileged intent.
async fn guild_member_ids(ctx: &Context, guild_id: GuildId) -> Result<HashSet<u64>, AppError> {
    let mut ids = HashSet::new();
    let mut after = None;

    loop {
        let page = ctx
            .http
            .get_guild_members(guild_id, Some(MEMBER_PAGE_SIZE), after)
            .await?;

        let page_len = page.len() as u64;
        after = page.last().map(|member| member.user.id.get());
        ids.extend(page.iter().map(|member| member.user.id.get()));

        if page_len < MEMBER_PAGE_SIZE {
            break;
        }
    }

    tracing::debug!(
        "Fetched {} members from Discord API for guild {}",
        ids.len(),
        guild_id
    );

    Ok(ids)
}
