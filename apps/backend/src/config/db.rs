use std::env;

use crate::error::AppError;

/// Database profile enum for different environments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    /// Production database profile
    Prod,
    /// Test database profile - enforces safety rules
    Test,
}

/// Which storage engine backs the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    /// One private database per connection; gone when the pool closes
    SqliteMemory,
}

impl DbKind {
    /// Read `DB_KIND` (`postgres`, `sqlite-file`, `sqlite-memory`), defaulting to in-memory SQLite.
    pub fn from_env() -> Result<Self, AppError> {
        match env::var("DB_KIND") {
            Err(_) => Ok(DbKind::SqliteMemory),
            Ok(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "postgres" | "postgresql" => Ok(DbKind::Postgres),
                "sqlite-file" | "sqlite_file" => Ok(DbKind::SqliteFile),
                "sqlite-memory" | "sqlite_memory" | "sqlite" => Ok(DbKind::SqliteMemory),
                other => Err(AppError::config(format!(
                    "Unknown DB_KIND '{other}' (expected postgres, sqlite-file or sqlite-memory)"
                ))),
            },
        }
    }

    pub fn is_sqlite(self) -> bool {
        matches!(self, DbKind::SqliteFile | DbKind::SqliteMemory)
    }
}

/// Builds a database URL from environment variables based on profile and kind
pub fn db_url(profile: DbProfile, kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
        DbKind::SqliteFile => {
            let dir = env::var("SQLITE_DB_DIR").unwrap_or_else(|_| ".".to_string());
            let db_name = db_name(profile)?;
            Ok(format!(
                "sqlite://{}/{db_name}.db?mode=rwc",
                dir.trim_end_matches('/')
            ))
        }
        DbKind::Postgres => {
            let host = host();
            let port = port();
            let db_name = db_name(profile)?;
            let (username, password) = credentials()?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
    }
}

/// Get database host from environment (defaults to localhost)
fn host() -> String {
    env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// Get database port from environment (defaults to 5432)
fn port() -> String {
    env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string())
}

/// Get database name based on profile
fn db_name(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => must_var("PROD_DB"),
        DbProfile::Test => {
            let db_name = must_var("TEST_DB")?;
            // Enforce safety: test DB must end with "_test"
            if !db_name.ends_with("_test") {
                return Err(AppError::config(format!(
                    "Test profile requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

fn credentials() -> Result<(String, String), AppError> {
    let username = must_var("APP_DB_USER")?;
    let password = must_var("APP_DB_PASSWORD")?;
    Ok((username, password))
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
