//! Guild channel configuration - per-guild overrides on top of the environment defaults.

use crate::{
    entities::{GuildConfig, guild_config},
    errors::Result,
};
use sea_orm::{Set, prelude::*};
use std::fmt;

/// Channels the bot posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Product listings
    Sell,
    /// Vouches
    Feedback,
    /// Moderation and ticket logs
    Log,
    /// Announcements and flash sales
    Announce,
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sell => write!(f, "sell"),
            Self::Feedback => write!(f, "feedback"),
            Self::Log => write!(f, "log"),
            Self::Announce => write!(f, "announce"),
        }
    }
}

/// A set of channel IDs, any of which may be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelSet {
    /// Product listings channel
    pub sell: Option<u64>,
    /// Vouch channel
    pub feedback: Option<u64>,
    /// Log channel
    pub log: Option<u64>,
    /// Announcement channel
    pub announce: Option<u64>,
}

impl ChannelSet {
    /// The channel configured for `kind`.
    #[must_use]
    pub const fn get(&self, kind: ChannelKind) -> Option<u64> {
        match kind {
            ChannelKind::Sell => self.sell,
            ChannelKind::Feedback => self.feedback,
            ChannelKind::Log => self.log,
            ChannelKind::Announce => self.announce,
        }
    }

    /// Fills every unset channel from `fallback`.
    #[must_use]
    pub const fn or(self, fallback: Self) -> Self {
        Self {
            sell: if self.sell.is_some() { self.sell } else { fallback.sell },
            feedback: if self.feedback.is_some() {
                self.feedback
            } else {
                fallback.feedback
            },
            log: if self.log.is_some() { self.log } else { fallback.log },
            announce: if self.announce.is_some() {
                self.announce
            } else {
                fallback.announce
            },
        }
    }
}

fn parse_channel(value: Option<&String>) -> Option<u64> {
    value.and_then(|v| v.parse().ok())
}

impl From<&guild_config::Model> for ChannelSet {
    fn from(model: &guild_config::Model) -> Self {
        Self {
            sell: parse_channel(model.sell_channel_id.as_ref()),
            feedback: parse_channel(model.feedback_channel_id.as_ref()),
            log: parse_channel(model.log_channel_id.as_ref()),
            announce: parse_channel(model.announce_channel_id.as_ref()),
        }
    }
}

/// Stored overrides for a guild, if any.
pub async fn get_guild_config(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<Option<guild_config::Model>> {
    GuildConfig::find_by_id(guild_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Effective channels for a guild: stored overrides first, `defaults` second.
pub async fn resolve_channels(
    db: &DatabaseConnection,
    guild_id: &str,
    defaults: ChannelSet,
) -> Result<ChannelSet> {
    let stored = get_guild_config(db, guild_id).await?;
    Ok(stored.map_or(defaults, |model| ChannelSet::from(&model).or(defaults)))
}

/// Stores `channel_id` as the guild's channel of `kind`, creating the row if needed.
pub async fn set_channel(
    db: &DatabaseConnection,
    guild_id: &str,
    kind: ChannelKind,
    channel_id: u64,
) -> Result<guild_config::Model> {
    let value = Set(Some(channel_id.to_string()));

    match get_guild_config(db, guild_id).await? {
        Some(existing) => {
            let mut active_model: guild_config::ActiveModel = existing.into();
            match kind {
                ChannelKind::Sell => active_model.sell_channel_id = value,
                ChannelKind::Feedback => active_model.feedback_channel_id = value,
                ChannelKind::Log => active_model.log_channel_id = value,
                ChannelKind::Announce => active_model.announce_channel_id = value,
            }
            active_model.update(db).await.map_err(Into::into)
        }
        None => {
            let mut active_model = guild_config::ActiveModel {
                guild_id: Set(guild_id.to_string()),
                sell_channel_id: Set(None),
                feedback_channel_id: Set(None),
                log_channel_id: Set(None),
                announce_channel_id: Set(None),
            };
            match kind {
                ChannelKind::Sell => active_model.sell_channel_id = value,
                ChannelKind::Feedback => active_model.feedback_channel_id = value,
                ChannelKind::Log => active_model.log_channel_id = value,
                ChannelKind::Announce => active_model.announce_channel_id = value,
            }
            active_model.insert(db).await.map_err(Into::into)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    const DEFAULTS: ChannelSet = ChannelSet {
        sell: Some(1),
        feedback: Some(2),
        log: Some(3),
        announce: None,
    };

    #[tokio::test]
    async fn test_defaults_without_row() -> Result<()> {
        let db = setup_test_db().await?;
        assert_eq!(resolve_channels(&db, GUILD, DEFAULTS).await?, DEFAULTS);
        Ok(())
    }

    #[tokio::test]
    async fn test_override_wins_and_rest_falls_back() -> Result<()> {
        let db = setup_test_db().await?;
        set_channel(&db, GUILD, ChannelKind::Log, 30).await?;
        set_channel(&db, GUILD, ChannelKind::Announce, 40).await?;
        set_channel(&db, GUILD, ChannelKind::Log, 31).await?;

        let channels = resolve_channels(&db, GUILD, DEFAULTS).await?;
        assert_eq!(channels.get(ChannelKind::Log), Some(31));
        assert_eq!(channels.get(ChannelKind::Announce), Some(40));
        assert_eq!(channels.get(ChannelKind::Feedback), Some(2));

        // Other guilds are untouched
        assert_eq!(resolve_channels(&db, OTHER_GUILD, DEFAULTS).await?, DEFAULTS);
        Ok(())
    }

    #[tokio::test]
    async fn test_lookup_error_is_reported() -> Result<()> {
        let db = sea_orm::Database::connect("sqlite::memory:").await?;
        assert!(matches!(
            resolve_channels(&db, GUILD, DEFAULTS).await,
            Err(crate::errors::Error::Database(_))
        ));
        Ok(())
    }
}
