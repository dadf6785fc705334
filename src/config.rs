use std::str::FromStr;

use crate::{
    error::{config::ConfigError, AppError},
    model::aura::Scope,
};

/// Database used when `DATABASE_URL` is not set.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://aura.db?mode=rwc";
pub const DEFAULT_COMMAND_PREFIX: &str = "!";

/// Discord bot tokens are well over this length; anything shorter is almost certainly a
/// copy-paste mistake.
const MIN_EXPECTED_TOKEN_LEN: usize = 50;

/// Where balances live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeMode {
    /// Every guild keeps its own balances.
    Guild,
    /// One balance per user shared by every guild.
    Global,
}

impl ScopeMode {
    /// Scope a command should run in, or `None` when it cannot run in this context (a DM
    /// while balances are per guild).
    pub fn resolve(&self, guild_id: Option<u64>) -> Option<Scope> {
        match self {
            Self::Guild => guild_id.map(Scope::Guild),
            Self::Global => Some(Scope::Global),
        }
    }
}

impl FromStr for ScopeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guild" => Ok(Self::Guild),
            "global" => Ok(Self::Global),
            other => Err(ConfigError::InvalidEnvVar {
                name: "AURA_SCOPE".to_string(),
                reason: format!("expected 'guild' or 'global', got '{}'", other),
            }),
        }
    }
}

pub struct Config {
    pub discord_token: String,
    pub database_url: String,
    pub command_prefix: String,
    /// Only this user may run `grant`; unset disables the command.
    pub bot_owner_id: Option<u64>,
    pub scope_mode: ScopeMode,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from a variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let discord_token = var("DISCORD_TOKEN")
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_TOKEN".to_string()))?;
        if discord_token.len() < MIN_EXPECTED_TOKEN_LEN {
            tracing::warn!("DISCORD_TOKEN looks too short to be a valid bot token");
        }

        let database_url = var("DATABASE_URL").unwrap_or_else(|| {
            tracing::warn!(
                "DATABASE_URL not set, falling back to {}",
                DEFAULT_DATABASE_URL
            );
            DEFAULT_DATABASE_URL.to_string()
        });

        let command_prefix =
            var("COMMAND_PREFIX").unwrap_or_else(|| DEFAULT_COMMAND_PREFIX.to_string());

        let bot_owner_id = var("BOT_OWNER_ID")
            .map(|value| {
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidEnvVar {
                        name: "BOT_OWNER_ID".to_string(),
                        reason: e.to_string(),
                    })
            })
            .transpose()?;

        let scope_mode = var("AURA_SCOPE")
            .map(|value| value.parse::<ScopeMode>())
            .transpose()?
            .unwrap_or(ScopeMode::Guild);

        Ok(Self {
            discord_token,
            database_url,
            command_prefix,
            bot_owner_id,
            scope_mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn applies_defaults() {
        let config = Config::from_lookup(lookup(&[("DISCORD_TOKEN", "token")])).unwrap();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.command_prefix, "!");
        assert_eq!(config.bot_owner_id, None);
        assert_eq!(config.scope_mode, ScopeMode::Guild);
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "token"),
            ("DATABASE_URL", "postgres://aura@localhost/aura"),
            ("COMMAND_PREFIX", "?"),
            ("BOT_OWNER_ID", "1234"),
            ("AURA_SCOPE", "Global"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://aura@localhost/aura");
        assert_eq!(config.command_prefix, "?");
        assert_eq!(config.bot_owner_id, Some(1234));
        assert_eq!(config.scope_mode, ScopeMode::Global);
    }

    #[test]
    fn requires_token() {
        let result = Config::from_lookup(lookup(&[("DISCORD_TOKEN", "  ")]));
        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(ref name))) if name == "DISCORD_TOKEN"
        ));
    }

    #[test]
    fn rejects_invalid_values() {
        let owner = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "token"),
            ("BOT_OWNER_ID", "owner"),
        ]));
        assert!(matches!(
            owner,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { .. }))
        ));

        let scope = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "token"),
            ("AURA_SCOPE", "channel"),
        ]));
        assert!(matches!(
            scope,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { .. }))
        ));
    }

    #[test]
    fn scope_mode_resolution() {
        assert_eq!(ScopeMode::Guild.resolve(Some(5)), Some(Scope::Guild(5)));
        assert_eq!(ScopeMode::Guild.resolve(None), None);
        assert_eq!(ScopeMode::Global.resolve(Some(5)), Some(Scope::Global));
        assert_eq!(ScopeMode::Global.resolve(None), Some(Scope::Global));
    }
}
