//! Unified error type for the bot, the commerce client and the webhook receiver.

use thiserror::Error;

/// All errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed configuration (environment, TOML, stored values)
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Any `SeaORM` failure while reading or writing the local store
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem failures (buyer totals file, policy file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable is missing
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// The commerce API answered with a non-success status.
    ///
    /// Rendered as `"<status> | <message>"` so it can be shown verbatim to users.
    #[error("{status} | {message}")]
    Commerce {
        /// HTTP status code returned by the API
        status: u16,
        /// Response body (JSON text or raw text)
        message: String,
    },

    /// Transport-level failure talking to an HTTP API
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `write!`/`writeln!` into a `String` failed
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// A vouch rating outside of 1..=5
    #[error("Vouch rating must be between 1 and 5, got {stars}")]
    InvalidRating {
        /// The rejected rating
        stars: i32,
    },

    /// A vouch with no text
    #[error("Vouch content cannot be empty")]
    EmptyVouch,

    /// A guild-scoped command was invoked outside of a guild
    #[error("This command can only be used in a server")]
    GuildOnly,

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl Error {
    /// Shorthand for building a [`Error::Config`].
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commerce_error_renders_status_and_message() {
        let err = Error::Commerce {
            status: 404,
            message: r#"{"message":"Not found"}"#.to_string(),
        };
        assert_eq!(err.to_string(), r#"404 | {"message":"Not found"}"#);
    }

    #[test]
    fn test_config_shorthand() {
        let err = Error::config("OWNER_ID is required");
        assert!(matches!(err, Error::Config { ref message } if message == "OWNER_ID is required"));
    }
}
