use std::env;
use std::path::PathBuf;

use crate::error::AppError;

/// Which database the process talks to.
#[derive(Debug, Clone, PartialEq)]
pub enum DbProfile {
    /// Production Postgres
    Prod,
    /// Test Postgres; database name must end in `_test`
    Test,
    /// Private SQLite database living in memory for the life of the pool
    InMemory,
    /// SQLite file, created when missing
    SqliteFile(PathBuf),
}

/// Database owner enum for different access levels
#[derive(Debug, Clone, PartialEq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

impl DbProfile {
    pub fn is_sqlite(&self) -> bool {
        matches!(self, DbProfile::InMemory | DbProfile::SqliteFile(_))
    }
}

/// Builds a connection URL for the profile.
pub fn db_url(profile: &DbProfile, owner: DbOwner) -> Result<String, AppError> {
    match profile {
        DbProfile::InMemory => Ok("sqlite::memory:".to_string()),
        DbProfile::SqliteFile(path) => Ok(format!("sqlite://{}?mode=rwc", path.display())),
        DbProfile::Prod | DbProfile::Test => {
            let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
            let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
            let db_name = pg_db_name(profile)?;
            let (username, password) = credentials(owner)?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
    }
}

fn pg_db_name(profile: &DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Test => {
            let db_name = must_var("TEST_DB")?;
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
        _ => must_var("PROD_DB"),
    }
}

fn credentials(owner: DbOwner) -> Result<(String, String), AppError> {
    match owner {
        DbOwner::App => Ok((must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?)),
        DbOwner::Owner => Ok((
            must_var("PARTYROOM_OWNER_USER")?,
            must_var("PARTYROOM_OWNER_PASSWORD")?,
        )),
    }
}

/// Get required environment variable or return error
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
