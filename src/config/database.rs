//! Database configuration module.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. Creation is idempotent (`IF NOT EXISTS`),
//! which lets the bot bootstrap the same file on every start.

use crate::entities::{Blacklist, GuildConfig, TicketBan, Vouch, Warning};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::info;

/// Default database location, created on first start.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/nuvix_market.sqlite?mode=rwc";

/// Establishes a connection to the `SQLite` database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates every table the command handlers use, skipping tables that already exist.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table(db, Vouch).await?;
    create_table(db, Blacklist).await?;
    create_table(db, TicketBan).await?;
    create_table(db, GuildConfig).await?;
    create_table(db, Warning).await?;
    Ok(())
}

async fn create_table<E>(db: &DatabaseConnection, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Connects to `database_url` and makes sure all tables exist.
pub async fn init_database(database_url: &str) -> Result<DatabaseConnection> {
    let db = create_connection(database_url).await?;
    create_tables(&db).await?;
    info!("Database ready at {database_url}");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        BlacklistModel, GuildConfigModel, TicketBanModel, VouchModel, WarningModel,
    };
    use sea_orm::QuerySelect;

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<VouchModel> = Vouch::find().limit(1).all(&db).await?;
        let _: Vec<BlacklistModel> = Blacklist::find().limit(1).all(&db).await?;
        let _: Vec<TicketBanModel> = TicketBan::find().limit(1).all(&db).await?;
        let _: Vec<GuildConfigModel> = GuildConfig::find().limit(1).all(&db).await?;
        let _: Vec<WarningModel> = Warning::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
