//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test rows with sensible defaults.

use crate::{core::vouch, entities, errors::Result};
use sea_orm::DatabaseConnection;

/// Guild used by most tests.
pub const GUILD: &str = "1000";

/// A second guild, for checking that queries stay guild-scoped.
pub const OTHER_GUILD: &str = "2000";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a five-star vouch with the given content.
pub async fn create_test_vouch(
    db: &DatabaseConnection,
    guild_id: &str,
    user_id: &str,
    content: &str,
) -> Result<entities::vouch::Model> {
    vouch::create_vouch(db, guild_id, user_id, content.to_string(), vouch::DEFAULT_STARS).await
}
