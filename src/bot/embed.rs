//! Rendering of aura outcomes as Discord embeds.

use chrono::{DateTime, Utc};
use serenity::all::CreateEmbed;

use crate::{
    model::{
        aura::{AuraAccount, EffectKind},
        outcome::{
            AdjustOutcome, BombOutcome, DailyOutcome, DonateOutcome, DrainOutcome, FlipOutcome,
            LeaderboardEntry, PurchaseOutcome, RollHit, RollOutcome, SlotsOutcome, SlotsPayout,
            WagerResult,
        },
    },
    service::aura::{
        effect,
        leaderboard::LEADERBOARD_SIZE,
        shop,
        title::{ascension_titles, descent_titles, resolve_title},
    },
};

const GOLD: u32 = 0xF1C40F;
const PURPLE: u32 = 0x9B59B6;
const BLUE: u32 = 0x3498DB;
const GREEN: u32 = 0x2ECC71;
const RED: u32 = 0xE74C3C;

/// Embed colour reflecting how much aura an account holds.
pub fn aura_color(amount: i64) -> u32 {
    match amount {
        100_000.. => GOLD,
        10_000.. => PURPLE,
        1_000.. => BLUE,
        0.. => GREEN,
        _ => RED,
    }
}

/// Formats an amount with thousands separators.
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if amount < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Formats a duration as `Hh Mm`.
pub fn format_remaining(remaining: std::time::Duration) -> String {
    let secs = remaining.as_secs();
    format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
}

fn signed(amount: i64) -> String {
    if amount >= 0 {
        format!("+{}", format_amount(amount))
    } else {
        format_amount(amount)
    }
}

fn multiplier_note(boosted: bool) -> &'static str {
    if boosted {
        " ⚡ (2x multiplier)"
    } else {
        ""
    }
}

pub fn error_embed(message: &str) -> CreateEmbed {
    CreateEmbed::new()
        .title("❌ Error")
        .description(message)
        .color(RED)
}

pub fn account_embed(
    name: &str,
    avatar_url: Option<String>,
    account: &AuraAccount,
    now: DateTime<Utc>,
) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(format!("✨ {}'s Aura", name))
        .color(aura_color(account.amount))
        .field(
            "💫 Aura Amount",
            format!("```{} ✨```", format_amount(account.amount)),
            true,
        )
        .field(
            "👑 Title",
            format!("**{}**", resolve_title(account.amount)),
            true,
        );

    let mut effects = Vec::new();
    if let Some(left) = effect::remaining(effect::expiry(account, EffectKind::Shield), now) {
        effects.push(format!("🛡️ Shield ({})", format_remaining(left)));
    }
    if let Some(left) = effect::remaining(effect::expiry(account, EffectKind::Multiplier), now) {
        effects.push(format!("⚡ 2x Multiplier ({})", format_remaining(left)));
    }
    if account.bomb_count() > 0 {
        effects.push(format!("💣 Bombs: {}", account.bomb_count()));
    }
    if !effects.is_empty() {
        embed = embed.field("🌟 Active Effects", effects.join("\n"), false);
    }

    let stats = &account.stats;
    embed = embed.field(
        "📈 Statistics",
        format!(
            "**Duels:** {}W / {}L\n**Biggest Win:** {} ✨\n**Biggest Loss:** {} ✨",
            stats.duels_won,
            stats.duels_lost,
            format_amount(stats.biggest_win),
            format_amount(stats.biggest_loss)
        ),
        true,
    );

    match avatar_url {
        Some(url) => embed.thumbnail(url),
        None => embed,
    }
}

pub fn slots_embed(outcome: &SlotsOutcome) -> CreateEmbed {
    let headline = match outcome.payout {
        SlotsPayout::DiamondJackpot => "💎 DIAMOND JACKPOT! 💎",
        SlotsPayout::CrownTriple => "👑 ROYAL FLUSH! 👑",
        SlotsPayout::FireTriple => "🔥 FIRE STORM! 🔥",
        SlotsPayout::Triple => "🎉 TRIPLE MATCH! 🎉",
        SlotsPayout::Double => "✨ Double Match! ✨",
        SlotsPayout::NoMatch => "💸 No match...",
    };
    let settlement = outcome.settlement;

    let result = match outcome.result {
        WagerResult::Win => format!(
            "**{}** You won **{}** aura!{}",
            headline,
            format_amount(settlement.credited),
            multiplier_note(settlement.boosted())
        ),
        WagerResult::Loss => format!(
            "**{}** You lost **{}** aura.",
            headline,
            format_amount(-settlement.credited)
        ),
        WagerResult::NoWinNoLoss => format!("**{}** No win, no loss.", headline),
    };

    CreateEmbed::new()
        .title("🎰 Aura Slots")
        .description(format!(
            "{}\n\n{}\n\nBalance: **{}** ✨",
            outcome.symbols.join(" | "),
            result,
            format_amount(settlement.balance)
        ))
        .color(if settlement.net > 0 { GOLD } else { RED })
}

pub fn flip_embed(outcome: &FlipOutcome) -> CreateEmbed {
    let settlement = outcome.settlement;
    let won = settlement.net > 0;

    let result = if won {
        format!(
            "You won **{}** aura!{}",
            format_amount(settlement.credited),
            multiplier_note(settlement.boosted())
        )
    } else {
        format!("You lost **{}** aura.", format_amount(-settlement.credited))
    };

    CreateEmbed::new()
        .title("🪙 Coin Flip")
        .description(format!(
            "You called **{}**, the coin landed on **{}**.\n\n{}\n\nBalance: **{}** ✨",
            outcome.choice.as_str(),
            outcome.result.as_str(),
            result,
            format_amount(settlement.balance)
        ))
        .color(if won { GREEN } else { RED })
}

pub fn roll_embed(outcome: &RollOutcome) -> CreateEmbed {
    let settlement = outcome.settlement;

    let result = match outcome.hit {
        RollHit::Exact => format!(
            "🎯 **PERFECT!** You won **{}** aura!{}",
            format_amount(settlement.credited),
            multiplier_note(settlement.boosted())
        ),
        RollHit::Close => format!(
            "😬 So close! You got half your bet back and lost **{}** aura.",
            format_amount(-settlement.credited)
        ),
        RollHit::Miss => format!("💸 Missed! You lost **{}** aura.", format_amount(-settlement.credited)),
    };

    CreateEmbed::new()
        .title("🎲 Dice Roll")
        .description(format!(
            "Target: **{}** | Rolled: **{}**\n\n{}\n\nBalance: **{}** ✨",
            outcome.target,
            outcome.roll,
            result,
            format_amount(settlement.balance)
        ))
        .color(if outcome.hit == RollHit::Exact { GOLD } else { RED })
}

pub fn daily_embed(outcome: &DailyOutcome) -> CreateEmbed {
    let mut description = format!(
        "{}\n\nYou received **{}** aura!{}",
        outcome.message,
        format_amount(outcome.credited),
        multiplier_note(outcome.credited != outcome.reward)
    );
    if let Some(bonus) = outcome.bonus {
        description.push_str(&format!(
            "\n{} (+{} included)",
            bonus.label(),
            format_amount(bonus.amount())
        ));
    }
    description.push_str(&format!(
        "\n\nBalance: **{}** ✨",
        format_amount(outcome.balance)
    ));

    CreateEmbed::new()
        .title("🌅 Daily Aura")
        .description(description)
        .color(GOLD)
}

pub fn donate_embed(sender_id: u64, recipient_id: u64, outcome: &DonateOutcome) -> CreateEmbed {
    CreateEmbed::new()
        .title("💝 Aura Donation")
        .description(format!(
            "<@{}> donated **{} aura** to <@{}>!\n\n✨ *The universe smiles upon your generosity*",
            sender_id,
            format_amount(outcome.amount),
            recipient_id
        ))
        .color(GREEN)
}

pub fn drain_embed(target_id: u64, outcome: &DrainOutcome) -> CreateEmbed {
    match outcome {
        DrainOutcome::Drained {
            amount, shielded, ..
        } => CreateEmbed::new()
            .title("🌪️ Drain Successful!")
            .description(format!(
                "You drained **{} aura** from <@{}>!{}",
                format_amount(*amount),
                target_id,
                if *shielded { " 🛡️ (Reduced by shield)" } else { "" }
            ))
            .color(GREEN),
        DrainOutcome::Backfired { penalty, .. } => CreateEmbed::new()
            .title("💥 Drain Backfired!")
            .description(format!(
                "Your drain attempt failed and you lost **{} aura**!",
                format_amount(*penalty)
            ))
            .color(RED),
    }
}

pub fn leaderboard_embed(entries: &[LeaderboardEntry]) -> CreateEmbed {
    if entries.is_empty() {
        return error_embed("No users found with aura data!");
    }

    let lines: Vec<String> = entries
        .iter()
        .take(LEADERBOARD_SIZE)
        .enumerate()
        .map(|(rank, entry)| {
            format!(
                "**{}.** <@{}>: {} ✨ ({})",
                rank + 1,
                entry.user_id,
                format_amount(entry.amount),
                entry.title
            )
        })
        .collect();

    CreateEmbed::new()
        .title("🏆 Aura Leaderboard")
        .description(lines.join("\n"))
        .color(GOLD)
}

fn title_lines(titles: impl Iterator<Item = (i64, &'static str)>) -> String {
    titles
        .map(|(threshold, title)| format!("**{} ✨** - {}", format_amount(threshold), title))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn titles_embed() -> CreateEmbed {
    CreateEmbed::new()
        .title("👑 Aura Titles")
        .description("Achieve these aura amounts to unlock titles!")
        .field("✨ Ascension Titles", title_lines(ascension_titles()), true)
        .field("💀 Descent Titles", title_lines(descent_titles()), true)
        .color(PURPLE)
}

pub fn shop_embed(prefix: &str) -> CreateEmbed {
    let embed = CreateEmbed::new()
        .title("🏪 Aura Shop")
        .description("Purchase powerful items with your aura!")
        .color(BLUE);

    shop::catalog()
        .fold(embed, |embed, listing| {
            embed.field(
                format!("{} - {} ✨", listing.name, format_amount(listing.cost)),
                format!("{}\n`{}aura shop {}`", listing.description, prefix, listing.item.id()),
                false,
            )
        })
}

pub fn purchase_embed(outcome: &PurchaseOutcome) -> CreateEmbed {
    let listing = shop::listing(outcome.item);
    let mut description = format!(
        "You bought {} for {} aura!",
        listing.name,
        format_amount(outcome.cost)
    );
    if let Some(expires) = outcome.expires {
        description.push_str(&format!("\nActive until <t:{}:f>", expires.timestamp()));
    }

    CreateEmbed::new()
        .title("🛒 Purchase Successful!")
        .description(description)
        .color(GREEN)
}

pub fn bomb_embed(target_id: u64, outcome: &BombOutcome) -> CreateEmbed {
    CreateEmbed::new()
        .title("💣 Aura Bomb!")
        .description(format!(
            "<@{}> took **{}** damage and now has **{}** ✨.\nBombs left: {}",
            target_id,
            format_amount(outcome.damage),
            format_amount(outcome.target_balance),
            outcome.bombs_left
        ))
        .color(RED)
}

pub fn grant_embed(target_id: u64, outcome: &AdjustOutcome) -> CreateEmbed {
    CreateEmbed::new()
        .title("🛠️ Aura Adjusted")
        .description(format!(
            "<@{}>: {} → {} ({})",
            target_id,
            format_amount(outcome.old_amount),
            format_amount(outcome.balance),
            signed(outcome.credited)
        ))
        .color(BLUE)
}
