//! Ticket Discord commands - requests and ticket bans.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{guild_key, reply_ephemeral},
        },
        core::{guild_config::resolve_channels, ticket_ban},
        errors::{Error, Result},
    };
    use poise::serenity_prelude::{self as serenity, Mentionable};
    use tracing::warn;

    /// Open a support ticket.
    #[poise::command(slash_command, guild_only)]
    pub async fn ticket(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "What do you need help with?"] reason: String,
    ) -> Result<()> {
        let data = ctx.data();
        let guild_id = guild_key(ctx)?;
        let author = ctx.author();

        if let Some(ban) =
            ticket_ban::get_ban(&data.database, &guild_id, &author.id.to_string()).await?
        {
            reply_ephemeral(
                ctx,
                format!("🚫 You are banned from opening tickets. Reason: {}", ban.reason),
            )
            .await?;
            return Ok(());
        }

        let channels = resolve_channels(&data.database, &guild_id, data.settings.channels).await?;
        if let Some(log) = channels.log {
            let line = format!("🎫 Ticket opened by {}: `{reason}`", author.mention());
            if let Err(e) = serenity::ChannelId::new(log)
                .say(ctx.serenity_context(), line)
                .await
            {
                warn!(channel = log, "Failed to log ticket: {e}");
            }
        }

        reply_ephemeral(
            ctx,
            format!("🎫 Ticket created. Reason: `{reason}`\nA staff member will be with you shortly."),
        )
        .await
    }

    /// Ban a user from opening tickets.
    #[poise::command(slash_command, guild_only)]
    pub async fn ticketban(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "User to ban from tickets"] user: serenity::User,
        #[description = "Reason"] reason: String,
    ) -> Result<()> {
        let guild_id = guild_key(ctx)?;
        ticket_ban::ban_user(
            &ctx.data().database,
            &guild_id,
            &user.id.to_string(),
            reason.clone(),
        )
        .await?;

        reply_ephemeral(
            ctx,
            format!("⛔ {} can no longer open tickets. Reason: {reason}", user.mention()),
        )
        .await
    }

    /// Lift a ticket ban.
    #[poise::command(slash_command, guild_only)]
    pub async fn ticketunban(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "User to unban"] user: serenity::User,
    ) -> Result<()> {
        let guild_id = guild_key(ctx)?;
        if ticket_ban::unban_user(&ctx.data().database, &guild_id, &user.id.to_string()).await? {
            reply_ephemeral(ctx, format!("✅ {} can open tickets again.", user.mention())).await
        } else {
            reply_ephemeral(ctx, "❌ That user was not ticket-banned.").await
        }
    }
}

// Re-export all commands
pub use inner::*;
