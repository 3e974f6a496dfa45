//! Per-guild channel overrides.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::{guild_key, reply_ephemeral},
        },
        core::guild_config::{ChannelKind, set_channel},
        errors::{Error, Result},
    };
    use poise::serenity_prelude::{self as serenity, Mentionable};
    use tracing::info;

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum ChannelChoice {
        #[name = "sell"]
        Sell,
        #[name = "feedback"]
        Feedback,
        #[name = "log"]
        Log,
        #[name = "announce"]
        Announce,
    }

    impl From<ChannelChoice> for ChannelKind {
        fn from(choice: ChannelChoice) -> Self {
            match choice {
                ChannelChoice::Sell => Self::Sell,
                ChannelChoice::Feedback => Self::Feedback,
                ChannelChoice::Log => Self::Log,
                ChannelChoice::Announce => Self::Announce,
            }
        }
    }

    /// Set the channel used for sales, feedback, logs or announcements in this server.
    #[poise::command(slash_command, guild_only)]
    pub async fn setchannel(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Which channel to set"] kind: ChannelChoice,
        #[description = "Channel to use"]
        #[channel_types("Text", "News")]
        channel: serenity::GuildChannel,
    ) -> Result<()> {
        let guild_id = guild_key(ctx)?;
        let kind = ChannelKind::from(kind);
        set_channel(&ctx.data().database, &guild_id, kind, channel.id.get()).await?;
        info!(%guild_id, %kind, channel = %channel.id, "Channel override stored");

        reply_ephemeral(
            ctx,
            format!("✅ The {kind} channel is now {}.", channel.mention()),
        )
        .await
    }
}

// Re-export all commands
pub use inner::*;
