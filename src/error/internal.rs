use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Stored Discord IDs are strings; a row whose ID no longer parses was written by
    /// something other than this bot.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// Stored account blob could not be decoded or encoded.
    #[error("Corrupt aura account for user {user_id} in scope '{scope}': {source}")]
    CorruptAccount {
        /// Owner of the account
        user_id: String,
        /// Scope key of the account
        scope: String,
        /// The underlying serde error
        #[source]
        source: serde_json::Error,
    },
}
