//! Core logic - framework-agnostic authorization, moderation and persistence operations.
//!
//! Nothing in here talks to Discord. The bot layer resolves principals from platform
//! events, asks these modules for decisions and performs the side effects.

/// Blacklist storage
pub mod blacklist;
/// Cumulative spend per buyer
pub mod buyers;
/// Per-guild channel overrides
pub mod guild_config;
/// Invite filter and remediation
pub mod moderation;
/// Command access policy
pub mod policy;
/// Authorization classifier
pub mod privilege;
/// Buyer rank thresholds
pub mod rank;
/// Ticket bans
pub mod ticket_ban;
/// Vouch storage and formatting
pub mod vouch;
/// Moderator warnings
pub mod warning;
