//! Application settings loaded from environment variables.
//!
//! The bot and the sales webhook read different subsets of the environment, so each
//! has its own settings struct. Both are built from a key lookup closure, which keeps
//! them testable without touching the process environment.

use crate::{
    commerce::client::DEFAULT_BASE_URL,
    config::database::DEFAULT_DATABASE_URL,
    core::guild_config::ChannelSet,
    errors::{Error, Result},
};
use std::path::PathBuf;

/// Default name shown in embeds when `SHOP_NAME` is not set
pub const DEFAULT_SHOP_NAME: &str = "NuvixMarket";

/// Default listening port for the webhook receiver
pub const DEFAULT_WEBHOOK_PORT: u16 = 10000;

/// Credentials for the `SellAuth` commerce API
#[derive(Debug, Clone)]
pub struct SellAuthSettings {
    /// API base URL, without a trailing slash
    pub base_url: String,
    /// Shop identifier
    pub shop_id: String,
    /// Bearer token
    pub api_key: String,
}

/// Settings for the Discord bot process
#[derive(Debug, Clone)]
pub struct BotSettings {
    /// Default channels, overridable per guild
    pub channels: ChannelSet,
    /// Commerce API credentials (may be empty; commands then report API errors)
    pub sellauth: SellAuthSettings,
    /// `SeaORM` connection URL
    pub database_url: String,
    /// Location of the command policy table
    pub policy_path: PathBuf,
}

/// Settings for the sales webhook process
#[derive(Debug, Clone)]
pub struct WebhookSettings {
    /// Bot token used to post announcements over the REST API
    pub discord_token: String,
    /// Channel receiving purchase announcements
    pub channel_id: u64,
    /// Commerce API credentials used to fetch invoices
    pub sellauth: SellAuthSettings,
    /// Shop name shown in announcements
    pub shop_name: String,
    /// Listening port
    pub port: u16,
    /// JSON file holding cumulative spend per buyer
    pub buyers_file: PathBuf,
}

fn optional_id<F>(lookup: &F, key: &str) -> Result<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::config(format!("{key} is not a valid Discord ID: {e}"))),
        _ => Ok(None),
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::config(format!("{key} is not set")))
}

fn sellauth_settings<F>(lookup: &F, require_credentials: bool) -> Result<SellAuthSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let (shop_id, api_key) = if require_credentials {
        (
            required(lookup, "SELLAUTH_SHOP_ID")?,
            required(lookup, "SELLAUTH_API_KEY")?,
        )
    } else {
        (
            lookup("SELLAUTH_SHOP_ID").unwrap_or_default(),
            lookup("SELLAUTH_API_KEY").unwrap_or_default(),
        )
    };

    let base_url = lookup("SELLAUTH_BASE_URL")
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
        .trim_end_matches('/')
        .to_string();

    Ok(SellAuthSettings {
        base_url,
        shop_id,
        api_key,
    })
}

impl BotSettings {
    /// Builds bot settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let channels = ChannelSet {
            sell: optional_id(&lookup, "SELL_CHANNEL_ID")?,
            feedback: optional_id(&lookup, "FEEDBACK_CHANNEL_ID")?,
            log: optional_id(&lookup, "LOG_CHANNEL_ID")?,
            announce: optional_id(&lookup, "ANNOUNCE_CHANNEL_ID")?,
        };

        Ok(Self {
            channels,
            sellauth: sellauth_settings(&lookup, false)?,
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            policy_path: lookup("POLICY_PATH")
                .map_or_else(|| PathBuf::from("policy.toml"), PathBuf::from),
        })
    }

    /// Builds bot settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

impl WebhookSettings {
    /// Builds webhook settings from an arbitrary key lookup.
    ///
    /// The Discord token, announcement channel and commerce credentials are required.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = required(&lookup, "DISCORD_TOKEN")?;
        let channel_id = optional_id(&lookup, "DISCORD_CHANNEL_ID")?
            .ok_or_else(|| Error::config("DISCORD_CHANNEL_ID is not set"))?;

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|e| Error::config(format!("PORT is not a valid port: {e}")))?,
            None => DEFAULT_WEBHOOK_PORT,
        };

        Ok(Self {
            discord_token,
            channel_id,
            sellauth: sellauth_settings(&lookup, true)?,
            shop_name: lookup("SHOP_NAME").unwrap_or_else(|| DEFAULT_SHOP_NAME.to_string()),
            port,
            buyers_file: lookup("BUYERS_FILE")
                .map_or_else(|| PathBuf::from("buyers_totals.json"), PathBuf::from),
        })
    }

    /// Builds webhook settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}
