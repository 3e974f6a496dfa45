//! Announcement commands - owner-only embeds posted to the announcement channel.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{guild_key, reply_ephemeral},
        },
        core::guild_config::resolve_channels,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    async fn post_announcement(
        ctx: poise::Context<'_, BotData, Error>,
        embed: serenity::CreateEmbed,
    ) -> Result<bool> {
        let data = ctx.data();
        let guild_id = guild_key(ctx)?;
        let channels = resolve_channels(&data.database, &guild_id, data.settings.channels).await?;
        let Some(announce) = channels.announce else {
            return Ok(false);
        };
        serenity::ChannelId::new(announce)
            .send_message(ctx.serenity_context(), serenity::CreateMessage::new().embed(embed))
            .await?;
        Ok(true)
    }

    /// Post an announcement.
    #[poise::command(slash_command, guild_only)]
    pub async fn announce(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Title"] title: String,
        #[description = "Message"] message: String,
    ) -> Result<()> {
        let embed = super::announcement_embed(title, message);

        if post_announcement(ctx, embed).await? {
            reply_ephemeral(ctx, "✅ Announcement sent.").await
        } else {
            reply_ephemeral(ctx, "❌ Announcement channel is not configured.").await
        }
    }

    /// Announce a flash sale.
    #[poise::command(slash_command, guild_only)]
    pub async fn flashsale(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product name"] product_name: String,
        #[description = "Discount percentage"]
        #[min = 1]
        #[max = 100]
        discount_percent: u32,
        #[description = "Duration in minutes"]
        #[min = 1]
        duration_minutes: u32,
    ) -> Result<()> {
        let embed = super::flash_sale_embed(&product_name, discount_percent, duration_minutes);

        if post_announcement(ctx, embed).await? {
            reply_ephemeral(ctx, "✅ Flash sale announced.").await
        } else {
            reply_ephemeral(ctx, "❌ Announcement channel is not configured.").await
        }
    }
}

// Re-export all commands
pub use inner::*;

use poise::serenity_prelude as serenity;

fn announcement_embed(title: String, message: String) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title)
        .description(message)
        .colour(serenity::Colour::BLURPLE)
        .footer(serenity::CreateEmbedFooter::new("NuvixMarket • Announce"))
}

fn flash_sale_embed(
    product_name: &str,
    discount_percent: u32,
    duration_minutes: u32,
) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("🔥 FLASH SALE")
        .description(format!(
            "Product: **{product_name}**\nDiscount: **{discount_percent}%**\nDuration: **{duration_minutes} min**"
        ))
        .colour(serenity::Colour::RED)
        .footer(serenity::CreateEmbedFooter::new("NuvixMarket • Flash Sale"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Result;
    use serde_json::json;

    #[test]
    fn test_announcement_embed() -> Result<()> {
        let embed = serde_json::to_value(announcement_embed(
            "Restock".to_string(),
            "New keys are in".to_string(),
        ))?;
        assert_eq!(embed["title"], json!("Restock"));
        assert_eq!(embed["description"], json!("New keys are in"));
        assert_eq!(embed["footer"]["text"], json!("NuvixMarket • Announce"));
        Ok(())
    }

    #[test]
    fn test_flash_sale_embed() -> Result<()> {
        let embed = serde_json::to_value(flash_sale_embed("Nitro", 25, 30))?;
        assert_eq!(embed["title"], json!("🔥 FLASH SALE"));
        assert_eq!(
            embed["description"],
            json!("Product: **Nitro**\nDiscount: **25%**\nDuration: **30 min**")
        );
        assert_eq!(embed["footer"]["text"], json!("NuvixMarket • Flash Sale"));
        Ok(())
    }
}
