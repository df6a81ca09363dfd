//! Grocery item route handlers.
//!
//! Create and detail/edit pages. Both forms need the full store list for
//! the store select field.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use greengrocer_core::{ItemCategory, ItemId};

use crate::db::{ItemRepository, ShoppingListRepository, StoreRepository};
use crate::error::{AppError, Result};
use crate::filters;
use crate::flash;
use crate::forms::{FieldErrors, ItemForm};
use crate::middleware::RequireAuth;
use crate::models::{CurrentUser, Item, Store};
use crate::state::AppState;

/// Category (value, label) pairs for the select field.
const CATEGORY_CHOICES: [(&str, &str); 6] = ItemCategory::CHOICES;

// =============================================================================
// Templates
// =============================================================================

/// New item page template.
#[derive(Template, WebTemplate)]
#[template(path = "items/new_item.html")]
pub struct NewItemTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<String>,
    pub form: ItemForm,
    pub errors: FieldErrors,
    pub stores: Vec<Store>,
    pub categories: [(&'static str, &'static str); 6],
}

/// Item detail page template, with the edit form pre-filled.
#[derive(Template, WebTemplate)]
#[template(path = "items/item_detail.html")]
pub struct ItemDetailTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<String>,
    pub item: Item,
    pub in_shopping_list: bool,
    pub form: ItemForm,
    pub errors: FieldErrors,
    pub stores: Vec<Store>,
    pub categories: [(&'static str, &'static str); 6],
}

fn form_from_item(item: &Item) -> ItemForm {
    ItemForm {
        name: item.name.clone(),
        price: format!("{:.2}", item.price),
        category: item.category.as_str().to_string(),
        photo_url: item.photo_url.clone(),
        store_id: item.store_id.to_string(),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the new item form.
#[instrument(skip_all)]
pub async fn new_item_page(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<NewItemTemplate> {
    let stores = StoreRepository::new(state.pool()).list().await?;

    Ok(NewItemTemplate {
        current_user: Some(user),
        flashes: flash::take(&session).await?,
        form: ItemForm::default(),
        errors: FieldErrors::default(),
        stores,
        categories: CATEGORY_CHOICES,
    })
}

/// Handle new item form submission.
#[instrument(skip_all)]
pub async fn create_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Form(form): Form<ItemForm>,
) -> Result<Response> {
    let stores = StoreRepository::new(state.pool()).list().await?;

    let input = match form.validate(&stores) {
        Ok(input) => input,
        Err(errors) => {
            return Ok(NewItemTemplate {
                current_user: Some(user),
                flashes: flash::take(&session).await?,
                form,
                errors,
                stores,
                categories: CATEGORY_CHOICES,
            }
            .into_response());
        }
    };

    let item = ItemRepository::new(state.pool())
        .create(&input, user.id)
        .await?;
    tracing::info!(item_id = %item.id, "Item created");

    flash::push(&session, "New item created successfully!").await?;
    Ok(Redirect::to(&format!("/item/{}", item.id)).into_response())
}

/// Display an item's details and the pre-filled edit form.
#[instrument(skip_all, fields(item_id = %id))]
pub async fn item_detail(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(id): Path<ItemId>,
) -> Result<ItemDetailTemplate> {
    let item = ItemRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("item {id}")))?;
    let stores = StoreRepository::new(state.pool()).list().await?;
    let in_shopping_list = ShoppingListRepository::new(state.pool())
        .contains(user.id, id)
        .await?;

    let form = form_from_item(&item);

    Ok(ItemDetailTemplate {
        current_user: Some(user),
        flashes: flash::take(&session).await?,
        item,
        in_shopping_list,
        form,
        errors: FieldErrors::default(),
        stores,
        categories: CATEGORY_CHOICES,
    })
}

/// Handle the item edit form submission.
///
/// Creator attribution is never changed here; the store assignment is
/// editable and may move the item to another store.
#[instrument(skip_all, fields(item_id = %id))]
pub async fn update_item(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Path(id): Path<ItemId>,
    Form(form): Form<ItemForm>,
) -> Result<Response> {
    let items = ItemRepository::new(state.pool());
    let item = items
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("item {id}")))?;
    let stores = StoreRepository::new(state.pool()).list().await?;

    let input = match form.validate(&stores) {
        Ok(input) => input,
        Err(errors) => {
            let in_shopping_list = ShoppingListRepository::new(state.pool())
                .contains(user.id, id)
                .await?;
            return Ok(ItemDetailTemplate {
                current_user: Some(user),
                flashes: flash::take(&session).await?,
                item,
                in_shopping_list,
                form,
                errors,
                stores,
                categories: CATEGORY_CHOICES,
            }
            .into_response());
        }
    };

    items.update(id, &input).await?;
    tracing::info!(item_id = %id, "Item updated");

    flash::push(&session, "Item updated successfully!").await?;
    Ok(Redirect::to(&format!("/item/{id}")).into_response())
}
