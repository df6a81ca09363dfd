//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                                     - Store listing (public)
//! GET  /health                               - Liveness check
//! GET  /health/ready                         - Readiness check (database ping)
//!
//! # Stores and items (require auth except where noted)
//! GET  /new_store                            - New store form
//! POST /new_store                            - Create store
//! GET  /store/{id}                           - Store detail + edit form
//! POST /store/{id}                           - Update store
//! GET  /new_item                             - New item form
//! POST /new_item                             - Create item
//! GET  /item/{id}                            - Item detail + edit form
//! POST /item/{id}                            - Update item
//!
//! # Shopping list (require auth)
//! GET  /shopping_list                        - Caller's shopping list
//! POST /add_to_shopping_list/{item_id}       - Add item to caller's list
//! POST /remove_from_shopping_list/{item_id}  - Remove item from caller's list
//!
//! # Auth
//! GET  /signup                               - Signup page
//! POST /signup                               - Create account
//! GET  /login                                - Login page (honors ?next=)
//! POST /login                                - Authenticate
//! GET  /logout                               - End session
//! ```

pub mod auth;
pub mod home;
pub mod items;
pub mod shopping_list;
pub mod stores;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the application.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        // Stores
        .route("/new_store", get(stores::new_store_page).post(stores::create_store))
        .route(
            "/store/{id}",
            get(stores::store_detail).post(stores::update_store),
        )
        // Items
        .route("/new_item", get(items::new_item_page).post(items::create_item))
        .route("/item/{id}", get(items::item_detail).post(items::update_item))
        // Shopping list
        .route("/shopping_list", get(shopping_list::view))
        .route("/add_to_shopping_list/{item_id}", post(shopping_list::add))
        .route(
            "/remove_from_shopping_list/{item_id}",
            post(shopping_list::remove),
        )
        // Auth
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
