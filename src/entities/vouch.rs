//! Vouch entity - A testimonial left by a guild member.
//!
//! Each vouch has a free-text `content` (what is being reviewed), a star rating
//! from 1 to 5 and the time it was recorded. Ids are assigned by `SQLite` and start at 1.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vouch database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vouches")]
pub struct Model {
    /// Auto-incrementing vouch number shown to users as `#id`
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord guild ID the vouch was left in
    pub guild_id: String,
    /// Discord user ID of the author
    pub user_id: String,
    /// What the user is vouching for (e.g., "Netflix 4K")
    pub content: String,
    /// Star rating, 1..=5
    #[sea_orm(default_value = 5)]
    pub stars: i32,
    /// When the vouch was recorded
    pub created_at: DateTimeUtc,
}

/// Vouches have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
