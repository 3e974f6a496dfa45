//! Blacklist business logic.
//!
//! Provides functions for adding, removing and listing blacklisted users per guild.

use crate::{
    entities::{Blacklist, blacklist},
    errors::Result,
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};

/// Adds a user to the guild blacklist.
pub async fn add_to_blacklist(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
    reason: String,
) -> Result<blacklist::Model> {
    let entry = blacklist::ActiveModel {
        guild_id: Set(guild_id.to_string()),
        user_id: Set(user_id.to_string()),
        reason: Set(reason),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    entry.insert(db).await.map_err(Into::into)
}

/// Removes every blacklist row for the user. Returns the number of rows deleted.
pub async fn remove_from_blacklist(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
) -> Result<u64> {
    let result = Blacklist::delete_many()
        .filter(blacklist::Column::GuildId.eq(guild_id))
        .filter(blacklist::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// All blacklist entries in a guild, oldest first.
pub async fn get_blacklist(db: &DatabaseConnection, guild_id: &str) -> Result<Vec<blacklist::Model>> {
    Blacklist::find()
        .filter(blacklist::Column::GuildId.eq(guild_id))
        .order_by_asc(blacklist::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// `true` if the user has at least one blacklist entry in the guild.
pub async fn is_blacklisted(db: &DatabaseConnection, guild_id: &str, user_id: &str) -> Result<bool> {
    let count = Blacklist::find()
        .filter(blacklist::Column::GuildId.eq(guild_id))
        .filter(blacklist::Column::UserId.eq(user_id))
        .count(db)
        .await?;
    Ok(count > 0)
}
