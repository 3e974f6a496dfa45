//! Owner control commands - command re-registration, shutdown and restart.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::reply_ephemeral},
        errors::{Error, Result},
    };
    use std::sync::atomic::Ordering;
    use tracing::info;

    /// Re-register slash commands with Discord.
    #[poise::command(slash_command)]
    pub async fn reloadcmds(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let framework = ctx.framework();
        let commands = &framework.options().commands;
        poise::builtins::register_globally(ctx.serenity_context(), commands).await?;
        info!(count = commands.len(), "Slash commands re-registered");
        reply_ephemeral(ctx, "✅ Slash commands reloaded.").await
    }

    /// Shut the bot down.
    #[poise::command(slash_command)]
    pub async fn shutdown(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        reply_ephemeral(ctx, "🛑 Shutting down...").await?;
        info!(by = %ctx.author().id, "Shutdown requested");
        ctx.framework().shard_manager().shutdown_all().await;
        Ok(())
    }

    /// Restart the bot.
    #[poise::command(slash_command)]
    pub async fn restart(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        reply_ephemeral(ctx, "🔁 Restarting...").await?;
        info!(by = %ctx.author().id, "Restart requested");
        ctx.data().restart_requested.store(true, Ordering::SeqCst);
        ctx.framework().shard_manager().shutdown_all().await;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
