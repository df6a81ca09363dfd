//! User domain type.

use chrono::{DateTime, Utc};

use greengrocer_core::{UserId, Username};

/// An account holder (domain type).
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name, unique across users.
    pub username: Username,
    /// Argon2 hash of the password. Never the plaintext.
    pub password_hash: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
