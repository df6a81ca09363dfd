//! Session middleware configuration.
//!
//! Sets up SQLite-backed sessions using tower-sessions. The cookie is
//! persistent (30-day inactivity expiry) so a login survives browser
//! restarts - the "remember me" durability is always on.

use sqlx::SqlitePool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::GrocerConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "greengrocer_session";

/// Session expiry in seconds (30 days of inactivity, so a login survives
/// browser restarts).
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Create the session layer with a SQLite store.
///
/// The session table lives in the application database and is created here
/// if missing.
///
/// # Errors
///
/// Returns `sqlx::Error` if the session table migration fails.
pub async fn create_session_layer(
    pool: &SqlitePool,
    config: &GrocerConfig,
) -> Result<SessionManagerLayer<SqliteStore>, sqlx::Error> {
    let store = SqliteStore::new(pool.clone());
    store.migrate().await?;

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    Ok(SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/"))
}
