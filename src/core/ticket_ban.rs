//! Ticket ban business logic - who may not open support tickets.

use crate::{
    entities::{TicketBan, ticket_ban},
    errors::Result,
};
use sea_orm::{Set, prelude::*};

/// Bans a user from opening tickets. Banning an already banned user replaces the reason.
pub async fn ban_user(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
    reason: String,
) -> Result<ticket_ban::Model> {
    let existing = TicketBan::find_by_id((guild_id.to_string(), user_id.to_string()))
        .one(db)
        .await?;

    if let Some(ban) = existing {
        let mut active_model: ticket_ban::ActiveModel = ban.into();
        active_model.reason = Set(reason);
        return active_model.update(db).await.map_err(Into::into);
    }

    let ban = ticket_ban::ActiveModel {
        guild_id: Set(guild_id.to_string()),
        user_id: Set(user_id.to_string()),
        reason: Set(reason),
    };
    ban.insert(db).await.map_err(Into::into)
}

/// Lifts a ticket ban. Returns whether the user was banned.
pub async fn unban_user(db: &DatabaseConnection, guild_id: &str, user_id: &str) -> Result<bool> {
    let result = TicketBan::delete_by_id((guild_id.to_string(), user_id.to_string()))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// The ban on record for a user, if any.
pub async fn get_ban(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
) -> Result<Option<ticket_ban::Model>> {
    TicketBan::find_by_id((guild_id.to_string(), user_id.to_string()))
        .one(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_ban_and_unban() -> Result<()> {
        let db = setup_test_db().await?;

        assert!(get_ban(&db, GUILD, "4").await?.is_none());
        ban_user(&db, GUILD, "4", "spam".to_string()).await?;

        let ban = get_ban(&db, GUILD, "4").await?.unwrap();
        assert_eq!(ban.reason, "spam");
        assert!(get_ban(&db, OTHER_GUILD, "4").await?.is_none());

        assert!(unban_user(&db, GUILD, "4").await?);
        assert!(!unban_user(&db, GUILD, "4").await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_rebanning_updates_reason() -> Result<()> {
        let db = setup_test_db().await?;
        ban_user(&db, GUILD, "4", "spam".to_string()).await?;
        ban_user(&db, GUILD, "4", "abuse".to_string()).await?;

        assert_eq!(TicketBan::find().all(&db).await?.len(), 1);
        assert_eq!(get_ban(&db, GUILD, "4").await?.unwrap().reason, "abuse");
        Ok(())
    }
}
