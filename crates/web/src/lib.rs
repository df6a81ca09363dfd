//! Greengrocer web application library.
//!
//! Exposes the application modules so the binary and the integration tests
//! can compose the router against any database pool.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod flash;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Build the full application router with the session layer attached.
///
/// The session store lives in the same SQLite database as the application
/// data; its table is created here if missing.
///
/// # Errors
///
/// Returns `sqlx::Error` if the session table migration fails.
pub async fn app(state: AppState) -> Result<Router, sqlx::Error> {
    let session_layer = middleware::create_session_layer(state.pool(), state.config()).await?;

    Ok(routes::routes().with_state(state).layer(session_layer))
}
