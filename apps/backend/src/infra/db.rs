use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

/// Open a pool for `profile`. Does NOT run any migrations.
pub async fn connect_db(
    profile: &DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let database_url = db_url(profile, owner)?;

    let mut opts = ConnectOptions::new(database_url);
    opts.sqlx_logging(false)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5));
    if matches!(profile, DbProfile::InMemory) {
        // Every connection to `sqlite::memory:` is its own database; keep exactly one.
        opts.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(opts).await?;
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(&profile, owner).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(sqlite = profile.is_sqlite(), "database ready");
    Ok(conn)
}
