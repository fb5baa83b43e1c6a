use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::config::AppSettings;
use crate::errors::InternalError;

/// Initialize the database connection
///
/// Connects and returns the connection. Does NOT run migrations - call
/// migrate_database() separately.
pub async fn init_database(settings: &AppSettings) -> Result<DatabaseConnection, InternalError> {
    let db = Database::connect(&settings.database_url)
        .await
        .map_err(|e| InternalError::database("connect_database", e))?;

    tracing::debug!("Connected to database: {}", settings.database_url);

    Ok(db)
}

/// Run all pending migrations
pub async fn migrate_database(db: &DatabaseConnection) -> Result<(), InternalError> {
    Migrator::up(db, None)
        .await
        .map_err(|e| InternalError::database("run_migrations", e))?;

    tracing::debug!("Database migrations completed");

    Ok(())
}
