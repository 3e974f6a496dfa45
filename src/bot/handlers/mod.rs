//! Discord interaction handlers
//!
//! Non-command entry points: the global permission gate that runs before every slash
//! command, and the gateway event handler.

/// Invite-link moderation for guild messages
pub mod moderation;
/// Global command check (classifier plus access policy)
pub mod permission;

use crate::{bot::BotData, errors::Result};
use poise::serenity_prelude as serenity;

/// Dispatches gateway events the bot cares about.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    data: &BotData,
) -> Result<()> {
    if let serenity::FullEvent::Message { new_message } = event {
        moderation::handle_message(ctx, data, new_message).await?;
    }
    Ok(())
}
