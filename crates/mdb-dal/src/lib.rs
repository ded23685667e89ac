pub mod error;
pub mod fixture;
pub mod genre;
pub mod movie;
pub mod projection;
pub mod review;

use std::str::FromStr as _;

pub use error::Error;
pub use sqlx::Error as SqlxError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::error::Result;

pub type ChosenDB = sqlx::Sqlite;
pub type Pool = sqlx::Pool<ChosenDB>;

/// Upper bound of rows returned by any listing
pub const MAX_LIMIT: usize = 10_000;

const DEFAULT_MAX_CONNECTIONS: u32 = 50;

/// Opens pool for the database, in-memory database gets single connection,
/// as every new connection would open another empty database.
pub async fn new_pool(database_url: &str) -> Result<Pool> {
    let max_connections = if is_memory_url(database_url) {
        1
    } else {
        DEFAULT_MAX_CONNECTIONS
    };
    new_pool_with_connections(database_url, max_connections).await
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Opens pool with foreign keys enforced, database file is created if missing.
///
/// In-memory databases live only as long as their connection, so for `sqlite::memory:`
/// use single connection, which is kept open.
pub async fn new_pool_with_connections(database_url: &str, max_connections: u32) -> Result<Pool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &Pool) -> Result<()> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
