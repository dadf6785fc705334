//! Parsing of `aura` prefix commands into typed arguments.
//!
//! Parsing never touches the database; everything that depends on account state is left to
//! the service.

use crate::{
    error::command::CommandError,
    model::outcome::CoinSide,
    util::parse::{parse_aura_amount, parse_user_mention},
};

pub const DEFAULT_SLOTS_BET: i64 = 50;
pub const DEFAULT_FLIP_BET: i64 = 25;
pub const DEFAULT_ROLL_BET: i64 = 30;
pub const DEFAULT_ROLL_TARGET: i64 = 6;

const DONATE_USAGE: &str = "aura donate @user <amount>";
const DRAIN_USAGE: &str = "aura drain @user";
const BOMB_USAGE: &str = "aura bomb @user";
const GRANT_USAGE: &str = "aura grant @user <amount>";

/// A parsed `aura` subcommand.
#[derive(Debug, Clone, PartialEq)]
pub enum AuraCommand {
    /// Show an account; the author's own when no target is given.
    Check { target: Option<u64> },
    Slots { bet: i64 },
    Flip { bet: i64, choice: CoinSide },
    Roll { bet: i64, target: i64 },
    Daily,
    Donate { target: u64, amount: i64 },
    Drain { target: u64 },
    Leaderboard,
    Titles,
    /// Browse the catalog, or buy `item` when given.
    Shop { item: Option<String> },
    Bomb { target: u64 },
    /// Owner-only balance adjustment.
    Grant { target: u64, amount: i64 },
}

/// Returns the arguments following `<prefix>aura`, or `None` if the message is not an aura
/// command.
pub fn strip_invocation<'a>(content: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = content.trim_start().strip_prefix(prefix)?;
    let rest = rest.strip_prefix("aura")?;

    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

/// Parses the arguments of an aura command.
pub fn parse(args: &str) -> Result<AuraCommand, CommandError> {
    let mut words = args.split_whitespace();

    let Some(subcommand) = words.next() else {
        return Ok(AuraCommand::Check { target: None });
    };

    let command = match subcommand.to_ascii_lowercase().as_str() {
        "check" => AuraCommand::Check {
            target: words.next().map(mention).transpose()?,
        },
        "slots" => AuraCommand::Slots {
            bet: amount_or(words.next(), DEFAULT_SLOTS_BET)?,
        },
        "flip" => AuraCommand::Flip {
            bet: amount_or(words.next(), DEFAULT_FLIP_BET)?,
            choice: words
                .next()
                .map(str::parse::<CoinSide>)
                .transpose()?
                .unwrap_or(CoinSide::Heads),
        },
        "roll" => AuraCommand::Roll {
            bet: amount_or(words.next(), DEFAULT_ROLL_BET)?,
            target: match words.next() {
                Some(value) => value
                    .parse::<i64>()
                    .map_err(|_| CommandError::InvalidNumber(value.to_string()))?,
                None => DEFAULT_ROLL_TARGET,
            },
        },
        "daily" => AuraCommand::Daily,
        "donate" => {
            let target = required_mention(words.next(), DONATE_USAGE)?;
            let amount = required_amount(words.next(), DONATE_USAGE)?;
            AuraCommand::Donate { target, amount }
        }
        "drain" => AuraCommand::Drain {
            target: required_mention(words.next(), DRAIN_USAGE)?,
        },
        "leaderboard" | "lb" | "top" => AuraCommand::Leaderboard,
        "titles" => AuraCommand::Titles,
        "shop" => AuraCommand::Shop {
            item: words.next().map(str::to_ascii_lowercase),
        },
        "bomb" => AuraCommand::Bomb {
            target: required_mention(words.next(), BOMB_USAGE)?,
        },
        "grant" => {
            let target = required_mention(words.next(), GRANT_USAGE)?;
            let amount = required_amount(words.next(), GRANT_USAGE)?;
            AuraCommand::Grant { target, amount }
        }
        other => return Err(CommandError::UnknownSubcommand(other.to_string())),
    };

    Ok(command)
}

fn mention(value: &str) -> Result<u64, CommandError> {
    parse_user_mention(value).ok_or_else(|| CommandError::InvalidMention(value.to_string()))
}

fn required_mention(value: Option<&str>, usage: &'static str) -> Result<u64, CommandError> {
    value.map(mention).unwrap_or(Err(CommandError::Usage(usage)))
}

fn required_amount(value: Option<&str>, usage: &'static str) -> Result<i64, CommandError> {
    match value {
        Some(value) => Ok(parse_aura_amount(value)?),
        None => Err(CommandError::Usage(usage)),
    }
}

fn amount_or(value: Option<&str>, default: i64) -> Result<i64, CommandError> {
    match value {
        Some(value) => Ok(parse_aura_amount(value)?),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::aura::AuraError;

    #[test]
    fn strips_prefix_and_command_name() {
        assert_eq!(strip_invocation("!aura slots 20", "!"), Some("slots 20"));
        assert_eq!(strip_invocation("!aura", "!"), Some(""));
        assert_eq!(strip_invocation("?aura daily", "?"), Some("daily"));
        assert_eq!(strip_invocation("!auras", "!"), None);
        assert_eq!(strip_invocation("!help", "!"), None);
        assert_eq!(strip_invocation("aura daily", "!"), None);
    }

    #[test]
    fn bare_command_checks_self() {
        assert_eq!(parse(""), Ok(AuraCommand::Check { target: None }));
        assert_eq!(
            parse("check <@42>"),
            Ok(AuraCommand::Check { target: Some(42) })
        );
    }

    #[test]
    fn games_use_defaults() {
        assert_eq!(parse("slots"), Ok(AuraCommand::Slots { bet: 50 }));
        assert_eq!(
            parse("flip"),
            Ok(AuraCommand::Flip {
                bet: 25,
                choice: CoinSide::Heads
            })
        );
        assert_eq!(parse("roll"), Ok(AuraCommand::Roll { bet: 30, target: 6 }));
    }

    #[test]
    fn games_accept_arguments() {
        assert_eq!(parse("SLOTS 1,000"), Ok(AuraCommand::Slots { bet: 1000 }));
        assert_eq!(
            parse("flip 40 t"),
            Ok(AuraCommand::Flip {
                bet: 40,
                choice: CoinSide::Tails
            })
        );
        assert_eq!(parse("roll 15 2"), Ok(AuraCommand::Roll { bet: 15, target: 2 }));
    }

    #[test]
    fn two_player_commands_need_a_mention() {
        assert_eq!(
            parse("donate <@!7> 100"),
            Ok(AuraCommand::Donate {
                target: 7,
                amount: 100
            })
        );
        assert_eq!(parse("donate"), Err(CommandError::Usage(DONATE_USAGE)));
        assert_eq!(parse("donate <@7>"), Err(CommandError::Usage(DONATE_USAGE)));
        assert_eq!(
            parse("drain everyone"),
            Err(CommandError::InvalidMention("everyone".to_string()))
        );
        assert_eq!(parse("bomb <@9>"), Ok(AuraCommand::Bomb { target: 9 }));
    }

    #[test]
    fn fractional_amounts_are_rejected() {
        assert_eq!(
            parse("donate <@7> 10.5"),
            Err(CommandError::Aura(AuraError::FractionalAmount(
                "10.5".to_string()
            )))
        );
        assert_eq!(
            parse("grant <@7> -0.1"),
            Err(CommandError::Aura(AuraError::FractionalAmount(
                "-0.1".to_string()
            )))
        );
    }

    #[test]
    fn leaderboard_aliases() {
        for alias in ["leaderboard", "lb", "top"] {
            assert_eq!(parse(alias), Ok(AuraCommand::Leaderboard));
        }
    }

    #[test]
    fn shop_and_misc() {
        assert_eq!(parse("shop"), Ok(AuraCommand::Shop { item: None }));
        assert_eq!(
            parse("shop Shield"),
            Ok(AuraCommand::Shop {
                item: Some("shield".to_string())
            })
        );
        assert_eq!(parse("titles"), Ok(AuraCommand::Titles));
        assert_eq!(parse("daily"), Ok(AuraCommand::Daily));
        assert_eq!(
            parse("duel <@7>"),
            Err(CommandError::UnknownSubcommand("duel".to_string()))
        );
    }

    #[test]
    fn invalid_choice_and_target() {
        assert_eq!(
            parse("flip 10 edge"),
            Err(CommandError::Aura(AuraError::InvalidChoice("edge".to_string())))
        );
        assert_eq!(
            parse("roll 10 six"),
            Err(CommandError::InvalidNumber("six".to_string()))
        );
    }
}
