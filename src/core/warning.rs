//! Warning business logic - issuing warnings and reading a user's case history.

use crate::{
    entities::{Warning, warning},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Records a warning issued by `moderator_id` against `user_id`.
pub async fn create_warning(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
    moderator_id: &str,
    reason: String,
) -> Result<warning::Model> {
    let model = warning::ActiveModel {
        guild_id: Set(guild_id.to_string()),
        user_id: Set(user_id.to_string()),
        moderator_id: Set(moderator_id.to_string()),
        reason: Set(reason),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// A user's warnings in a guild, oldest first.
pub async fn get_warnings_for_user(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
) -> Result<Vec<warning::Model>> {
    Warning::find()
        .filter(warning::Column::GuildId.eq(guild_id))
        .filter(warning::Column::UserId.eq(user_id))
        .order_by_asc(warning::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_case_history() -> Result<()> {
        let db = setup_test_db().await?;
        create_warning(&db, GUILD, "8", "1", "spam".to_string()).await?;
        create_warning(&db, GUILD, "8", "2", "rude".to_string()).await?;
        create_warning(&db, GUILD, "9", "1", "other user".to_string()).await?;
        create_warning(&db, OTHER_GUILD, "8", "1", "other guild".to_string()).await?;

        let history = get_warnings_for_user(&db, GUILD, "8").await?;
        let reasons: Vec<_> = history.iter().map(|w| w.reason.as_str()).collect();
        assert_eq!(reasons, vec!["spam", "rude"]);
        assert_eq!(history[1].moderator_id, "2");
        Ok(())
    }
}
