//! Grocery store route handlers.
//!
//! Create and detail/edit pages. The detail page doubles as the edit form,
//! pre-filled with the store's current values.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use greengrocer_core::StoreId;

use crate::db::{ItemRepository, StoreRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::flash;
use crate::forms::{FieldErrors, StoreForm};
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, Item, Store};
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

/// New store page template.
#[derive(Template, WebTemplate)]
#[template(path = "stores/new_store.html")]
pub struct NewStoreTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<String>,
    pub form: StoreForm,
    pub errors: FieldErrors,
}

/// Store detail page template, with the edit form pre-filled.
#[derive(Template, WebTemplate)]
#[template(path = "stores/store_detail.html")]
pub struct StoreDetailTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<String>,
    pub store: Store,
    pub items: Vec<Item>,
    pub form: StoreForm,
    pub errors: FieldErrors,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the new store form.
#[instrument(skip_all)]
pub async fn new_store_page(
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<NewStoreTemplate> {
    Ok(NewStoreTemplate {
        current_user: Some(user),
        flashes: flash::take(&session).await?,
        form: StoreForm::default(),
        errors: FieldErrors::default(),
    })
}

/// Handle new store form submission.
#[instrument(skip_all)]
pub async fn create_store(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<StoreForm>,
) -> Result<Response> {
    let (title, address) = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => {
            return Ok(NewStoreTemplate {
                current_user: Some(user),
                flashes: flash::take(&session).await?,
                form,
                errors,
            }
            .into_response());
        }
    };

    let store = StoreRepository::new(state.pool())
        .create(&title, &address, user.id)
        .await?;
    tracing::info!(store_id = %store.id, "Store created");

    flash::push(&session, "New store created successfully!").await?;
    Ok(Redirect::to(&format!("/store/{}", store.id)).into_response())
}

/// Display a store's details, its items, and the pre-filled edit form.
#[instrument(skip_all, fields(store_id = %id))]
pub async fn store_detail(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(id): Path<StoreId>,
) -> Result<StoreDetailTemplate> {
    let store = StoreRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("store {id}")))?;
    let items = ItemRepository::new(state.pool()).list_by_store(id).await?;

    let form = StoreForm {
        title: store.title.clone(),
        address: store.address.clone(),
    };

    Ok(StoreDetailTemplate {
        current_user: Some(user),
        flashes: flash::take(&session).await?,
        store,
        items,
        form,
        errors: FieldErrors::default(),
    })
}

/// Handle the store edit form submission.
///
/// Creator attribution is never changed here; only title and address are
/// editable.
#[instrument(skip_all, fields(store_id = %id))]
pub async fn update_store(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(id): Path<StoreId>,
    Form(form): Form<StoreForm>,
) -> Result<Response> {
    let stores = StoreRepository::new(state.pool());
    let store = stores
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("store {id}")))?;

    let (title, address) = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => {
            let items = ItemRepository::new(state.pool()).list_by_store(id).await?;
            return Ok(StoreDetailTemplate {
                current_user: Some(user),
                flashes: flash::take(&session).await?,
                store,
                items,
                form,
                errors,
            }
            .into_response());
        }
    };

    stores.update(id, &title, &address).await?;
    tracing::info!(store_id = %id, "Store updated");

    flash::push(&session, "Store updated successfully!").await?;
    Ok(Redirect::to(&format!("/store/{id}")).into_response())
}
