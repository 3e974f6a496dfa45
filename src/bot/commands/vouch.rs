//! Vouch Discord commands - leaving, listing and deleting testimonials.
//!
//! `/vouch` is the one command open to every member. Listing is for staff and
//! deletion for admins; the permission gate enforces that before these run.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{fit_message, guild_key, reply_ephemeral},
        },
        core::{
            blacklist,
            guild_config::resolve_channels,
            vouch::{self, DEFAULT_STARS, RECENT_VOUCH_LIMIT, format_stars, format_vouch_line},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude::{self as serenity, Mentionable};
    use std::fmt::Write;

    /// Leave a vouch for something you bought.
    #[poise::command(slash_command, guild_only)]
    pub async fn vouch(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "What you are reviewing (e.g. Netflix 4K)"] product: String,
        #[description = "From 1 to 5 stars"]
        #[min = 1]
        #[max = 5]
        stars: Option<i32>,
    ) -> Result<()> {
        let data = ctx.data();
        let db = &data.database;
        let guild_id = guild_key(ctx)?;
        let author = ctx.author();

        if blacklist::is_blacklisted(db, &guild_id, &author.id.to_string()).await? {
            reply_ephemeral(ctx, "🚫 You are blacklisted and cannot leave vouches.").await?;
            return Ok(());
        }

        let created = vouch::create_vouch(
            db,
            &guild_id,
            &author.id.to_string(),
            product,
            stars.unwrap_or(DEFAULT_STARS),
        )
        .await?;

        let embed = serenity::CreateEmbed::new()
            .title("New vouch created!")
            .description(format_stars(created.stars))
            .colour(serenity::Colour::BLUE)
            .field("Vouch:", created.content.clone(), false)
            .field("Vouch Nº:", format!("#{}", created.id), false)
            .field("Vouched by:", author.mention().to_string(), false)
            .field(
                "Vouched at:",
                created.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                false,
            )
            .thumbnail(author.face())
            .footer(serenity::CreateEmbedFooter::new("Nuvix Market Vouches System"));

        let channels = resolve_channels(db, &guild_id, data.settings.channels).await?;
        if let Some(feedback) = channels.feedback {
            serenity::ChannelId::new(feedback)
                .send_message(ctx.serenity_context(), serenity::CreateMessage::new().embed(embed))
                .await?;
            reply_ephemeral(ctx, "✅ Vouch sent. Thanks for trusting NuvixMarket!").await?;
        } else {
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
        }
        Ok(())
    }

    /// Show the latest vouches in this server.
    #[poise::command(slash_command, guild_only)]
    pub async fn vouchlist(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let guild_id = guild_key(ctx)?;
        let vouches =
            vouch::get_recent_vouches(&ctx.data().database, &guild_id, RECENT_VOUCH_LIMIT).await?;

        if vouches.is_empty() {
            reply_ephemeral(ctx, "No vouches yet.").await?;
            return Ok(());
        }

        let mut text = String::from("📝 **Latest vouches:**\n");
        for v in &vouches {
            writeln!(&mut text, "{}", format_vouch_line(v, true))?;
        }
        reply_ephemeral(ctx, fit_message(text)).await
    }

    /// Show the vouches you have left.
    #[poise::command(slash_command, guild_only)]
    pub async fn myvouches(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let guild_id = guild_key(ctx)?;
        let vouches = vouch::get_user_vouches(
            &ctx.data().database,
            &guild_id,
            &ctx.author().id.to_string(),
        )
        .await?;

        if vouches.is_empty() {
            reply_ephemeral(ctx, "You haven't left any vouches yet.").await?;
            return Ok(());
        }

        let mut text = String::from("📝 **Your vouches:**\n");
        for v in &vouches {
            writeln!(&mut text, "{}", format_vouch_line(v, false))?;
        }
        reply_ephemeral(ctx, fit_message(text)).await
    }

    /// Delete a vouch by its number.
    #[poise::command(slash_command, guild_only)]
    pub async fn vouchdelete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Vouch number"] vouch_id: i64,
    ) -> Result<()> {
        let guild_id = guild_key(ctx)?;
        if vouch::delete_vouch(&ctx.data().database, &guild_id, vouch_id).await? {
            reply_ephemeral(ctx, "🗑 Vouch deleted.").await
        } else {
            reply_ephemeral(ctx, "❌ Vouch not found.").await
        }
    }
}

// Re-export all commands
pub use inner::*;
