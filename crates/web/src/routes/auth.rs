//! Authentication route handlers.
//!
//! Signup, login, and logout. Signup does not log the new user in; it
//! redirects to the login page. Login honors a `next` redirect target so
//! that an auth-required page can send the user back where they started.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::db::{RepositoryError, UserRepository};
use crate::error::Result;
use crate::filters;
use crate::flash;
use crate::forms::{FieldErrors, LoginForm, SignupForm};
use crate::middleware::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::hash_password;
use crate::state::AppState;

/// Query parameters for the login page.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Where to go after a successful login.
    pub next: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<String>,
    pub form: SignupForm,
    pub errors: FieldErrors,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub current_user: Option<CurrentUser>,
    pub flashes: Vec<String>,
    pub form: LoginForm,
    pub errors: FieldErrors,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the signup page.
#[instrument(skip_all)]
pub async fn signup_page(
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
) -> Result<SignupTemplate> {
    Ok(SignupTemplate {
        current_user,
        flashes: flash::take(&session).await?,
        form: SignupForm::default(),
        errors: FieldErrors::default(),
    })
}

/// Handle signup form submission.
///
/// On success, creates the account and redirects to the login page; the
/// new user is not logged in automatically.
#[instrument(skip_all)]
pub async fn signup(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    let users = UserRepository::new(state.pool());

    let input = match form.validate(&users).await? {
        Ok(input) => input,
        Err(errors) => {
            return Ok(SignupTemplate {
                current_user,
                flashes: flash::take(&session).await?,
                form,
                errors,
            }
            .into_response());
        }
    };

    let password_hash = hash_password(&input.password)?;

    // The uniqueness pre-check above can race a concurrent signup; the
    // UNIQUE constraint is the arbiter, so a Conflict here re-renders the
    // same "taken" message instead of erroring.
    let user = match users.create(&input.username, &password_hash).await {
        Ok(user) => user,
        Err(RepositoryError::Conflict(_)) => {
            let mut errors = FieldErrors::default();
            errors.push("username", "That username is taken. Please try another.");
            return Ok(SignupTemplate {
                current_user,
                flashes: flash::take(&session).await?,
                form,
                errors,
            }
            .into_response());
        }
        Err(e) => return Err(e.into()),
    };
    tracing::info!(user_id = %user.id, "Account created");

    flash::push(&session, "Account created! Please log in.").await?;
    Ok(Redirect::to("/login").into_response())
}

/// Display the login page.
#[instrument(skip_all)]
pub async fn login_page(
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
    Query(query): Query<LoginQuery>,
) -> Result<LoginTemplate> {
    let form = LoginForm {
        next: query.next.unwrap_or_default(),
        ..LoginForm::default()
    };

    Ok(LoginTemplate {
        current_user,
        flashes: flash::take(&session).await?,
        form,
        errors: FieldErrors::default(),
    })
}

/// Handle login form submission.
///
/// On success, binds the session to the user and redirects to the `next`
/// target (when it is a local path) or the homepage.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    OptionalAuth(current_user): OptionalAuth,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let users = UserRepository::new(state.pool());

    let user = match form.validate(&users).await? {
        Ok(user) => user,
        Err(errors) => {
            return Ok(LoginTemplate {
                current_user,
                flashes: flash::take(&session).await?,
                form,
                errors,
            }
            .into_response());
        }
    };

    let current_user = CurrentUser {
        id: user.id,
        username: user.username,
    };
    set_current_user(&session, &current_user).await?;
    tracing::info!(user_id = %current_user.id, "Logged in");

    let target = safe_redirect_target(&form.next);
    Ok(Redirect::to(target).into_response())
}

/// End the caller's session.
#[instrument(skip_all)]
pub async fn logout(RequireAuth(user): RequireAuth, session: Session) -> Result<Redirect> {
    clear_current_user(&session).await?;
    tracing::info!(user_id = %user.id, "Logged out");

    flash::push(&session, "You have been logged out.").await?;
    Ok(Redirect::to("/"))
}

/// Restrict a post-login redirect to local paths.
///
/// Anything that is not a same-site absolute path (or that looks like a
/// scheme-relative URL) falls back to the homepage.
fn safe_redirect_target(next: &str) -> &str {
    if next.starts_with('/') && !next.starts_with("//") {
        next
    } else {
        "/"
    }
}
