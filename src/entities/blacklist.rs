//! Blacklist entity - Users barred from the shop in a guild.
//!
//! A user may appear more than once (one row per blacklisting); removing a user
//! deletes every row for that guild/user pair.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Blacklist database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blacklist")]
pub struct Model {
    /// Surrogate key
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord guild ID
    pub guild_id: String,
    /// Discord user ID of the blacklisted user
    pub user_id: String,
    /// Why the user was blacklisted
    pub reason: String,
    /// When the entry was created
    pub created_at: DateTimeUtc,
}

/// `Blacklist` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
