//! Warning entity - Moderator warnings issued through `/warn`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Warning database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "warnings")]
pub struct Model {
    /// Case number
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord guild ID
    pub guild_id: String,
    /// Discord user ID of the warned user
    pub user_id: String,
    /// Discord user ID of the staff member who issued the warning
    pub moderator_id: String,
    /// Reason given by the moderator
    pub reason: String,
    /// When the warning was issued
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
