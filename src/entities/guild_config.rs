//! Guild configuration entity - Per-guild channel overrides.
//!
//! Every column is optional; a missing value falls back to the channel
//! configured through the environment.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Guild configuration database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "guild_config")]
pub struct Model {
    /// Discord guild ID
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
    /// Channel where products are advertised
    pub sell_channel_id: Option<String>,
    /// Channel where vouches are posted
    pub feedback_channel_id: Option<String>,
    /// Channel receiving moderation and ticket logs
    pub log_channel_id: Option<String>,
    /// Channel receiving announcements and flash sales
    pub announce_channel_id: Option<String>,
}

/// `GuildConfig` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
