//! General Discord commands - ping, about and status.
//! These commands don't require database operations.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Shows the gateway latency.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let latency = ctx.ping().await;
        ctx.say(format!("🏓 Pong! `{} ms`", latency.as_millis()))
            .await?;
        Ok(())
    }

    /// Information about the bot.
    #[poise::command(slash_command)]
    pub async fn about(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("🤖 NuvixMarket x SellAuth • Advanced bot for your shop.")
            .await?;
        Ok(())
    }

    /// Bot status.
    #[poise::command(slash_command)]
    pub async fn status(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("🟢 Bot online. If something fails, check the API key / shop ID.")
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
