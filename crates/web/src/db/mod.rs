//! Database operations for the Greengrocer SQLite database.
//!
//! # Tables
//!
//! - `user` - Accounts (username + argon2 password hash)
//! - `grocery_store` - Stores (title, address, creator attribution)
//! - `grocery_item` - Items, each belonging to exactly one store
//! - `shopping_list` - (user, item) join rows for personal shopping lists
//! - `tower_sessions` - Session storage (created by the session layer)
//!
//! The schema is embedded and applied at startup via [`init_schema`]; all
//! statements are `CREATE ... IF NOT EXISTS`, so startup is idempotent.

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub mod items;
pub mod shopping_list;
pub mod stores;
pub mod users;

pub use items::ItemRepository;
pub use shopping_list::ShoppingListRepository;
pub use stores::StoreRepository;
pub use users::UserRepository;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a SQLite connection pool with sensible defaults.
///
/// The database file is created if it does not exist yet.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection fails.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url.expose_secret())?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Apply the embedded schema to the database.
///
/// # Errors
///
/// Returns `sqlx::Error` if any statement fails.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(include_str!("schema.sql")).execute(pool).await?;
    Ok(())
}

/// Map a sqlx error to `Conflict` when it is a unique-constraint violation.
///
/// Used by create paths where the schema backs an application-level
/// uniqueness rule (usernames).
pub(crate) fn conflict_on_unique(e: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(e)
}
