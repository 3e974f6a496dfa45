//! Blacklist Discord commands.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{fit_message, guild_key, reply_ephemeral},
        },
        core::blacklist,
        errors::{Error, Result},
    };
    use poise::serenity_prelude::{self as serenity, Mentionable};
    use std::fmt::Write;
    use tracing::info;

    /// Add a user to the blacklist.
    #[poise::command(slash_command, guild_only)]
    pub async fn blacklist(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "User to blacklist"] user: serenity::User,
        #[description = "Reason"] reason: String,
    ) -> Result<()> {
        let guild_id = guild_key(ctx)?;
        blacklist::add_to_blacklist(
            &ctx.data().database,
            &guild_id,
            &user.id.to_string(),
            reason.clone(),
        )
        .await?;
        info!(user = %user.id, by = %ctx.author().id, "User blacklisted");

        reply_ephemeral(
            ctx,
            format!("🚫 {} added to the blacklist. Reason: {reason}", user.mention()),
        )
        .await
    }

    /// Remove a user from the blacklist.
    #[poise::command(slash_command, guild_only)]
    pub async fn unblacklist(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "User to remove"] user: serenity::User,
    ) -> Result<()> {
        let guild_id = guild_key(ctx)?;
        let removed =
            blacklist::remove_from_blacklist(&ctx.data().database, &guild_id, &user.id.to_string())
                .await?;

        if removed > 0 {
            reply_ephemeral(ctx, format!("✅ {} removed from the blacklist.", user.mention())).await
        } else {
            reply_ephemeral(ctx, "❌ That user was not blacklisted.").await
        }
    }

    /// List blacklisted users.
    #[poise::command(slash_command, guild_only)]
    pub async fn blacklistlist(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let guild_id = guild_key(ctx)?;
        let entries = blacklist::get_blacklist(&ctx.data().database, &guild_id).await?;

        if entries.is_empty() {
            reply_ephemeral(ctx, "No users are blacklisted.").await?;
            return Ok(());
        }

        let mut text = String::from("🚫 **Blacklist:**\n");
        for entry in &entries {
            writeln!(
                &mut text,
                "- <@{}> — {} ({})",
                entry.user_id,
                entry.reason,
                entry.created_at.format("%Y-%m-%d %H:%M:%S")
            )?;
        }
        reply_ephemeral(ctx, fit_message(text)).await
    }
}

// Re-export all commands
pub use inner::*;
