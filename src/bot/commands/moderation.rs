//! Moderation Discord commands - warnings and case history.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{fit_message, guild_key, reply_ephemeral},
        },
        core::{guild_config::resolve_channels, warning},
        errors::{Error, Result},
    };
    use poise::serenity_prelude::{self as serenity, Mentionable};
    use std::fmt::Write;
    use tracing::warn;

    /// Warn a user.
    #[poise::command(slash_command, guild_only)]
    pub async fn warn(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "User to warn"] user: serenity::User,
        #[description = "Reason"] reason: String,
    ) -> Result<()> {
        let data = ctx.data();
        let guild_id = guild_key(ctx)?;
        let created = warning::create_warning(
            &data.database,
            &guild_id,
            &user.id.to_string(),
            &ctx.author().id.to_string(),
            reason.clone(),
        )
        .await?;

        let line = format!(
            "⚠️ {} was warned by {} (case #{}): {reason}",
            user.mention(),
            ctx.author().mention(),
            created.id
        );
        let channels = resolve_channels(&data.database, &guild_id, data.settings.channels).await?;
        if let Some(log) = channels.log {
            if let Err(e) = serenity::ChannelId::new(log)
                .say(ctx.serenity_context(), &line)
                .await
            {
                warn!(channel = log, "Failed to log warning: {e}");
            }
        }

        reply_ephemeral(ctx, line).await
    }

    /// Show a user's warning history.
    #[poise::command(slash_command, guild_only)]
    pub async fn case(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "User to look up"] user: serenity::User,
    ) -> Result<()> {
        let guild_id = guild_key(ctx)?;
        let warnings =
            warning::get_warnings_for_user(&ctx.data().database, &guild_id, &user.id.to_string())
                .await?;

        if warnings.is_empty() {
            reply_ephemeral(ctx, format!("📂 {} has no warnings.", user.mention())).await?;
            return Ok(());
        }

        let mut text = format!(
            "📂 **Case history for {}** ({} warnings)\n",
            user.mention(),
            warnings.len()
        );
        for w in &warnings {
            writeln!(
                &mut text,
                "`#{}` {} by <@{}> ({})",
                w.id,
                w.reason,
                w.moderator_id,
                w.created_at.format("%Y-%m-%d %H:%M:%S")
            )?;
        }
        reply_ephemeral(ctx, fit_message(text)).await
    }
}

// Re-export all commands
pub use inner::*;
