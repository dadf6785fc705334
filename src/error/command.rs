use thiserror::Error;

use crate::error::aura::AuraError;

/// A prefix command that could not be turned into an aura operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("Unknown aura command '{0}'")]
    UnknownSubcommand(String),

    /// Required argument missing; carries the usage line.
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("'{0}' is not a user mention")]
    InvalidMention(String),

    #[error("'{0}' is not a whole number")]
    InvalidNumber(String),

    #[error(transparent)]
    Aura(#[from] AuraError),
}
