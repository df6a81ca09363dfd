//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::flash;
use crate::middleware::OptionalAuth;
use crate::models::{CurrentUser, Store};
use crate::state::AppState;

/// One row of the store table.
pub struct StoreListing {
    pub store: Store,
    pub item_count: i64,
}

/// Home page template: all stores with their item counts, newest last.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<String>,
    pub all_stores: Vec<StoreListing>,
}

/// Display the homepage with a list of all grocery stores.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
) -> Result<HomeTemplate> {
    let all_stores = crate::db::StoreRepository::new(state.pool())
        .list_with_item_counts()
        .await?
        .into_iter()
        .map(|(store, item_count)| StoreListing { store, item_count })
        .collect();

    Ok(HomeTemplate {
        current_user,
        flashes: flash::take(&session).await?,
        all_stores,
    })
}
