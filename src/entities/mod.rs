//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables used by the command handlers.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod blacklist;
pub mod guild_config;
pub mod ticket_ban;
pub mod vouch;
pub mod warning;

// Re-export specific types to avoid conflicts
pub use blacklist::{Column as BlacklistColumn, Entity as Blacklist, Model as BlacklistModel};
pub use guild_config::{
    Column as GuildConfigColumn, Entity as GuildConfig, Model as GuildConfigModel,
};
pub use ticket_ban::{Column as TicketBanColumn, Entity as TicketBan, Model as TicketBanModel};
pub use vouch::{Column as VouchColumn, Entity as Vouch, Model as VouchModel};
pub use warning::{Column as WarningColumn, Entity as Warning, Model as WarningModel};
