//! Ticket ban entity - Users who may not open support tickets.
//! Keyed by (`guild_id`, `user_id`), so a user is banned at most once per guild.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ticket ban database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ticket_bans")]
pub struct Model {
    /// Discord guild ID
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: String,
    /// Discord user ID of the banned user
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    /// Why the ban was issued
    pub reason: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
