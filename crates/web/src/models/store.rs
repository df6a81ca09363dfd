//! Grocery store domain type.

use chrono::{DateTime, Utc};

use greengrocer_core::{StoreId, UserId};

/// A grocery store (domain type).
#[derive(Debug, Clone)]
pub struct Store {
    /// Unique store ID.
    pub id: StoreId,
    /// Store title, 3-80 characters.
    pub title: String,
    /// Street address, 3-200 characters.
    pub address: String,
    /// Who created the store. Advisory attribution only; set once at
    /// creation and never reassigned by the update path.
    pub created_by: Option<UserId>,
    /// When the store was created.
    pub created_at: DateTime<Utc>,
}
