//! Vouch business logic - recording, listing and deleting testimonials.
//!
//! All queries are scoped to a guild so vouches from different servers never mix.

use crate::{
    entities::{Vouch, vouch},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};

/// Rating used when the author gives none.
pub const DEFAULT_STARS: i32 = 5;

/// Number of vouches shown by `/vouchlist`.
pub const RECENT_VOUCH_LIMIT: u64 = 20;

/// Records a new vouch and returns it with its assigned id.
///
/// The rating must be within 1..=5.
pub async fn create_vouch(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
    content: String,
    stars: i32,
) -> Result<vouch::Model> {
    if !(1..=5).contains(&stars) {
        return Err(Error::InvalidRating { stars });
    }
    if content.trim().is_empty() {
        return Err(Error::EmptyVouch);
    }

    let model = vouch::ActiveModel {
        guild_id: Set(guild_id.to_string()),
        user_id: Set(user_id.to_string()),
        content: Set(content.trim().to_string()),
        stars: Set(stars),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Most recent vouches in a guild, newest first.
pub async fn get_recent_vouches(
    db: &DatabaseConnection,
    guild_id: &str,
    limit: u64,
) -> Result<Vec<vouch::Model>> {
    Vouch::find()
        .filter(vouch::Column::GuildId.eq(guild_id))
        .order_by_desc(vouch::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Every vouch a user left in a guild, newest first.
pub async fn get_user_vouches(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
) -> Result<Vec<vouch::Model>> {
    Vouch::find()
        .filter(vouch::Column::GuildId.eq(guild_id))
        .filter(vouch::Column::UserId.eq(user_id))
        .order_by_desc(vouch::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes vouch `vouch_id` if it belongs to `guild_id`. Returns whether a row was removed.
pub async fn delete_vouch(db: &DatabaseConnection, guild_id: &str, vouch_id: i64) -> Result<bool> {
    let result = Vouch::delete_many()
        .filter(vouch::Column::Id.eq(vouch_id))
        .filter(vouch::Column::GuildId.eq(guild_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}

/// Renders a rating as a row of star emoji. Out-of-range values are clamped.
#[must_use]
pub fn format_stars(stars: i32) -> String {
    let count = usize::try_from(stars.clamp(1, 5)).unwrap_or(5);
    "⭐".repeat(count)
}

/// One line of a vouch listing: ``#id`` stars, optional author, content and date.
#[must_use]
pub fn format_vouch_line(vouch: &vouch::Model, include_author: bool) -> String {
    let date = vouch.created_at.format("%Y-%m-%d %H:%M:%S");
    let stars = format_stars(vouch.stars);
    if include_author {
        format!(
            "`#{}` {stars} <@{}> — {} ({date})",
            vouch.id, vouch.user_id, vouch.content
        )
    } else {
        format!("`#{}` {stars} — {} ({date})", vouch.id, vouch.content)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_first_vouch_gets_id_one() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_vouch(&db, GUILD, "7", "Netflix 4K".to_string(), 5).await?;
        let second = create_vouch(&db, GUILD, "7", "Spotify".to_string(), 4).await?;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.content, "Netflix 4K");
        assert_eq!(second.stars, 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_rating_validation() -> Result<()> {
        let db = setup_test_db().await?;
        for stars in [0, 6, -1] {
            let result = create_vouch(&db, GUILD, "7", "x".to_string(), stars).await;
            assert!(matches!(result, Err(Error::InvalidRating { .. })));
        }
        let result = create_vouch(&db, GUILD, "7", "   ".to_string(), 5).await;
        assert!(matches!(result, Err(Error::EmptyVouch)));
        assert!(get_recent_vouches(&db, GUILD, 20).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_recent_vouches_newest_first_and_scoped() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_vouch(&db, GUILD, "1", "first").await?;
        create_test_vouch(&db, GUILD, "2", "second").await?;
        create_test_vouch(&db, OTHER_GUILD, "3", "elsewhere").await?;

        let recent = get_recent_vouches(&db, GUILD, RECENT_VOUCH_LIMIT).await?;
        let contents: Vec<_> = recent.iter().map(|v| v.content.as_str()).collect();
        assert_eq!(contents, vec!["second", "first"]);

        let limited = get_recent_vouches(&db, GUILD, 1).await?;
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].content, "second");
        Ok(())
    }

    #[tokio::test]
    async fn test_user_vouches() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_vouch(&db, GUILD, "1", "mine").await?;
        create_test_vouch(&db, GUILD, "2", "theirs").await?;
        create_test_vouch(&db, GUILD, "1", "mine again").await?;

        let mine = get_user_vouches(&db, GUILD, "1").await?;
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].content, "mine again");
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_is_guild_scoped() -> Result<()> {
        let db = setup_test_db().await?;
        let vouch = create_test_vouch(&db, GUILD, "1", "keep me").await?;

        assert!(!delete_vouch(&db, OTHER_GUILD, vouch.id).await?);
        assert!(delete_vouch(&db, GUILD, vouch.id).await?);
        assert!(!delete_vouch(&db, GUILD, vouch.id).await?);
        Ok(())
    }

    #[test]
    fn test_format_stars() {
        assert_eq!(format_stars(3), "⭐⭐⭐");
        assert_eq!(format_stars(0), "⭐");
        assert_eq!(format_stars(9), "⭐⭐⭐⭐⭐");
    }
}
