//! Invite-link moderation on guild messages.

use crate::{
    bot::{BotData, handlers::permission::principal_from},
    core::{
        guild_config::{ChannelSet, resolve_channels},
        moderation::{ModerationAction, RemediationTarget, remediate, should_moderate},
        privilege::classify,
    },
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use poise::serenity_prelude::{self as serenity, Mentionable};
use sea_orm::DatabaseConnection;
use tracing::{debug, info, warn};

/// Remediation steps carried out against the Discord API.
///
/// The log channel is resolved inside the log step, so a failed lookup only
/// fails that step.
struct DiscordTarget<'a> {
    http: &'a serenity::Http,
    database: &'a DatabaseConnection,
    message: &'a serenity::Message,
    guild_id: serenity::GuildId,
    default_channels: ChannelSet,
}

impl RemediationTarget for DiscordTarget<'_> {
    async fn delete_message(&self) -> Result<()> {
        self.message.delete(self.http).await?;
        Ok(())
    }

    async fn restrict_sender(&self, until: DateTime<Utc>, reason: &str) -> Result<()> {
        let until = serenity::Timestamp::from_unix_timestamp(until.timestamp())
            .map_err(|e| Error::config(format!("Invalid restriction end: {e}")))?;
        let builder = serenity::EditMember::new()
            .disable_communication_until_datetime(until)
            .audit_log_reason(reason);
        self.guild_id
            .edit_member(self.http, self.message.author.id, builder)
            .await?;
        Ok(())
    }

    async fn send_log(&self, text: &str) -> Result<bool> {
        let channels = resolve_channels(
            self.database,
            &self.guild_id.to_string(),
            self.default_channels,
        )
        .await?;
        let Some(channel) = channels.log else {
            return Ok(false);
        };
        serenity::ChannelId::new(channel).say(self.http, text).await?;
        Ok(true)
    }

    fn sender_mention(&self) -> String {
        self.message.author.mention().to_string()
    }
}

/// Roles of the message author, from the gateway payload or a member lookup.
async fn author_roles(
    ctx: &serenity::Context,
    guild_id: serenity::GuildId,
    message: &serenity::Message,
) -> Option<Vec<serenity::RoleId>> {
    if let Some(member) = &message.member {
        return Some(member.roles.clone());
    }
    match guild_id.member(ctx, message.author.id).await {
        Ok(member) => Some(member.roles),
        Err(e) => {
            debug!(user = %message.author.id, "Could not fetch member: {e}");
            None
        }
    }
}

/// Checks a message for invite links and remediates when needed.
///
/// Bot messages and direct messages are ignored. Owners and admins are exempt.
pub async fn handle_message(
    ctx: &serenity::Context,
    data: &BotData,
    message: &serenity::Message,
) -> Result<()> {
    if message.author.bot {
        return Ok(());
    }
    let Some(guild_id) = message.guild_id else {
        return Ok(());
    };

    let roles = author_roles(ctx, guild_id, message).await;
    let principal = principal_from(message.author.id, roles.as_deref());
    let tier = classify(&principal, &data.roles);

    let ModerationAction::Remediate(remediation) =
        should_moderate(&data.invite_filter, &message.content, tier)
    else {
        return Ok(());
    };

    info!(user = %message.author.id, %guild_id, %tier, "Invite link detected");

    let target = DiscordTarget {
        http: &ctx.http,
        database: &data.database,
        message,
        guild_id,
        default_channels: data.settings.channels,
    };

    let report = remediate(&target, &remediation, Utc::now()).await;
    if report.is_clean() {
        debug!(
            deleted = %report.deleted,
            restricted = %report.restricted,
            logged = %report.logged,
            "Remediation complete"
        );
    } else {
        warn!(
            user = %message.author.id,
            deleted = %report.deleted,
            restricted = %report.restricted,
            logged = %report.logged,
            "Remediation partially failed"
        );
    }
    Ok(())
}
