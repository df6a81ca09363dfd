//! Transient flash notices.
//!
//! A flash is a one-shot message stored in the session by a commit path
//! ("New store created successfully!") and drained by the next page render.

use tower_sessions::Session;

use crate::models::session_keys;

/// Push a flash notice onto the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn push(
    session: &Session,
    message: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    let mut messages: Vec<String> = session
        .get(session_keys::FLASH_MESSAGES)
        .await?
        .unwrap_or_default();
    messages.push(message.into());
    session.insert(session_keys::FLASH_MESSAGES, messages).await
}

/// Take all pending flash notices, clearing them from the session.
///
/// # Errors
///
/// Returns an error if the session cannot be read or modified.
pub async fn take(session: &Session) -> Result<Vec<String>, tower_sessions::session::Error> {
    Ok(session
        .remove::<Vec<String>>(session_keys::FLASH_MESSAGES)
        .await?
        .unwrap_or_default())
}
