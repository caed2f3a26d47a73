use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{debug, info};

use crate::config::db::{db_url, DbKind, DbProfile};
use crate::error::AppError;

/// In-memory SQLite keeps one private database per connection, so the pool
/// must hold exactly one connection for its whole life.
fn connect_options(url: String, kind: DbKind) -> ConnectOptions {
    let mut options = ConnectOptions::new(url);
    options.sqlx_logging(false);

    match kind {
        DbKind::SqliteMemory => {
            options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(24 * 60 * 60))
                .max_lifetime(Duration::from_secs(24 * 60 * 60));
        }
        DbKind::SqliteFile => {
            options.max_connections(4);
        }
        DbKind::Postgres => {
            options
                .max_connections(16)
                .acquire_timeout(Duration::from_secs(10));
        }
    }
    options
}

/// Connect to the configured store and apply pending migrations.
pub async fn connect_db(profile: DbProfile, kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile, kind)?;
    debug!(?profile, ?kind, "connecting to database");

    let conn = Database::connect(connect_options(url, kind)).await?;
    migrate(&conn, MigrationCommand::Up).await?;

    info!(?profile, ?kind, "database ready");
    Ok(conn)
}
