//! Shopping list route handlers.
//!
//! Every handler here requires a logged-in user; the list is personal.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tower_sessions::Session;
use tracing::instrument;

use greengrocer_core::ItemId;

use crate::db::{ItemRepository, ShoppingListRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::flash;
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, Item};
use crate::state::AppState;

/// Shopping list page template.
#[derive(Template, WebTemplate)]
#[template(path = "shopping_list.html")]
pub struct ShoppingListTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<String>,
    pub items: Vec<Item>,
}

/// Display the caller's shopping list.
#[instrument(skip_all)]
pub async fn view(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<ShoppingListTemplate> {
    let items = ShoppingListRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    Ok(ShoppingListTemplate {
        current_user: Some(user),
        flashes: flash::take(&session).await?,
        items,
    })
}

/// Add an item to the caller's shopping list.
///
/// Adding an item that is already on the list is not an error; the user
/// gets an "already on your list" notice instead.
#[instrument(skip_all, fields(item_id = %item_id))]
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(item_id): Path<ItemId>,
) -> Result<Redirect> {
    let item = ItemRepository::new(state.pool())
        .get(item_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("item {item_id}")))?;

    let inserted = ShoppingListRepository::new(state.pool())
        .add(user.id, item_id)
        .await?;

    if inserted {
        flash::push(&session, format!("Added {} to your shopping list.", item.name)).await?;
    } else {
        flash::push(
            &session,
            format!("{} is already on your shopping list.", item.name),
        )
        .await?;
    }

    Ok(Redirect::to("/shopping_list"))
}

/// Remove an item from the caller's shopping list.
///
/// Removing an item that is not on the list is a no-op, not an error.
#[instrument(skip_all, fields(item_id = %item_id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(item_id): Path<ItemId>,
) -> Result<Redirect> {
    let removed = ShoppingListRepository::new(state.pool())
        .remove(user.id, item_id)
        .await?;

    if removed {
        flash::push(&session, "Removed from your shopping list.").await?;
    }

    Ok(Redirect::to("/shopping_list"))
}
