//! Global permission gate.
//!
//! Runs before every slash command. The caller is classified into a privilege tier
//! from their guild roles, the access policy is consulted, and denied callers get an
//! ephemeral explanation. Returning `false` makes poise raise `CommandCheckFailed`,
//! which the framework error hook swallows.

use crate::{
    bot::BotData,
    core::{
        policy::AccessDecision,
        privilege::{Principal, classify},
    },
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use tracing::{debug, info};

/// Builds the principal for a user and the roles they hold (if any).
#[must_use]
pub fn principal_from(user_id: serenity::UserId, roles: Option<&[serenity::RoleId]>) -> Principal {
    Principal::new(
        user_id.get(),
        roles.unwrap_or_default().iter().map(|role| role.get()),
    )
}

/// Resolves the invoking principal. Outside guilds the caller has no roles.
pub async fn resolve_principal(ctx: poise::Context<'_, BotData, Error>) -> Principal {
    let user_id = ctx.author().id;
    match ctx.author_member().await {
        Some(member) => principal_from(user_id, Some(member.roles.as_slice())),
        None => principal_from(user_id, None),
    }
}

/// The `command_check` hook.
pub async fn global_permission_check(ctx: poise::Context<'_, BotData, Error>) -> Result<bool> {
    let data = ctx.data();
    let command = ctx.command().qualified_name.as_str();
    let principal = resolve_principal(ctx).await;
    let tier = classify(&principal, &data.roles);

    match data.policy.evaluate(tier, command) {
        AccessDecision::Allowed => {
            debug!(user = principal.user_id, %tier, command, "Command allowed");
            Ok(true)
        }
        AccessDecision::Denied(reason) => {
            info!(user = principal.user_id, %tier, command, ?reason, "Command denied");
            let reply = poise::CreateReply::default()
                .content(data.policy.denial_message(reason))
                .ephemeral(true);
            ctx.send(reply).await?;
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_from_roles() {
        let roles = [serenity::RoleId::new(10), serenity::RoleId::new(20)];
        let principal = principal_from(serenity::UserId::new(5), Some(&roles));
        assert_eq!(principal, Principal::new(5, [10, 20]));
    }

    #[test]
    fn test_principal_outside_guild_has_no_roles() {
        let principal = principal_from(serenity::UserId::new(5), None);
        assert_eq!(principal, Principal::without_roles(5));
    }
}
