//! Form types and validation.
//!
//! Each POST endpoint deserializes a form struct and runs its `validate`
//! method. Validation failures come back as `FieldErrors` so the page can
//! re-render with per-field messages and the submitted values intact.

use greengrocer_core::{ItemCategory, StoreId, Username};
use serde::Deserialize;

use crate::db::UserRepository;
use crate::error::AppError;
use crate::models::{ItemInput, Store, User};
use crate::services::auth;

/// Title length bounds for stores.
const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 80;

/// Address length bounds for stores.
const ADDRESS_MIN: usize = 3;
const ADDRESS_MAX: usize = 200;

/// Item name length bounds.
const ITEM_NAME_MIN: usize = 3;
const ITEM_NAME_MAX: usize = 80;

/// Per-field validation messages, in submission order.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<(&'static str, String)>,
}

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message recorded for `field`, if any.
    #[must_use]
    pub fn first(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    /// All messages, for tests and summary rendering.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|(_, m)| m.as_str()).collect()
    }
}

// =============================================================================
// Store Form
// =============================================================================

/// New/edit store form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub address: String,
}

impl StoreForm {
    /// Validate the store fields, returning trimmed values.
    ///
    /// # Errors
    ///
    /// Returns `FieldErrors` naming each invalid field.
    pub fn validate(&self) -> Result<(String, String), FieldErrors> {
        let mut errors = FieldErrors::default();

        // Bounds are in characters, not bytes, so accented text measures
        // the way users count it.
        let title = self.title.trim();
        let title_len = title.chars().count();
        if title.is_empty() {
            errors.push("title", "Title is required");
        } else if title_len < TITLE_MIN {
            errors.push("title", format!("Title must be at least {TITLE_MIN} characters"));
        } else if title_len > TITLE_MAX {
            errors.push("title", format!("Title must be at most {TITLE_MAX} characters"));
        }

        let address = self.address.trim();
        let address_len = address.chars().count();
        if address.is_empty() {
            errors.push("address", "Address is required");
        } else if address_len < ADDRESS_MIN {
            errors.push(
                "address",
                format!("Address must be at least {ADDRESS_MIN} characters"),
            );
        } else if address_len > ADDRESS_MAX {
            errors.push(
                "address",
                format!("Address must be at most {ADDRESS_MAX} characters"),
            );
        }

        if errors.is_empty() {
            Ok((title.to_string(), address.to_string()))
        } else {
            Err(errors)
        }
    }
}

// =============================================================================
// Item Form
// =============================================================================

/// New/edit item form data. `price` and `store_id` arrive as text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub store_id: String,
}

impl ItemForm {
    /// Validate the item fields against the known stores.
    ///
    /// # Errors
    ///
    /// Returns `FieldErrors` naming each invalid field.
    pub fn validate(&self, stores: &[Store]) -> Result<ItemInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        let name_len = name.chars().count();
        if name.is_empty() {
            errors.push("name", "Name is required");
        } else if name_len < ITEM_NAME_MIN {
            errors.push("name", format!("Name must be at least {ITEM_NAME_MIN} characters"));
        } else if name_len > ITEM_NAME_MAX {
            errors.push("name", format!("Name must be at most {ITEM_NAME_MAX} characters"));
        }

        let price = match self.price.trim().parse::<f64>() {
            Ok(p) if p.is_finite() && p >= 0.0 => Some(p),
            Ok(_) => {
                errors.push("price", "Price must not be negative");
                None
            }
            Err(_) => {
                errors.push("price", "Price must be a number");
                None
            }
        };

        // An empty category falls back to the default bucket.
        let category = if self.category.trim().is_empty() {
            Some(ItemCategory::default())
        } else {
            match self.category.trim().parse::<ItemCategory>() {
                Ok(c) => Some(c),
                Err(_) => {
                    errors.push("category", "Unknown category");
                    None
                }
            }
        };

        let photo_url = self.photo_url.trim();
        if url::Url::parse(photo_url).is_err() {
            errors.push("photo_url", "Photo URL must be a valid URL");
        }

        let store_id = match self.store_id.trim().parse::<StoreId>() {
            Ok(id) if stores.iter().any(|s| s.id == id) => Some(id),
            Ok(_) => {
                errors.push("store_id", "Unknown store");
                None
            }
            Err(_) => {
                errors.push("store_id", "A store must be selected");
                None
            }
        };

        if let (true, Some(price), Some(category), Some(store_id)) =
            (errors.is_empty(), price, category, store_id)
        {
            Ok(ItemInput {
                name: name.to_string(),
                price,
                category,
                photo_url: photo_url.to_string(),
                store_id,
            })
        } else {
            Err(errors)
        }
    }
}

// =============================================================================
// Signup Form
// =============================================================================

/// Signup form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Validated signup output, ready for `UserRepository::create`.
#[derive(Debug)]
pub struct SignupInput {
    pub username: Username,
    pub password: String,
}

impl SignupForm {
    /// Validate the signup fields, including the username-taken check.
    ///
    /// The outer `Result` is an infrastructure failure; the inner one is
    /// the validation outcome.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the uniqueness lookup fails.
    pub async fn validate(
        &self,
        users: &UserRepository<'_>,
    ) -> Result<Result<SignupInput, FieldErrors>, AppError> {
        let mut errors = FieldErrors::default();

        let username = match Username::parse(&self.username) {
            Ok(u) => Some(u),
            Err(e) => {
                errors.push("username", e.to_string());
                None
            }
        };

        if self.password.trim().is_empty() {
            errors.push("password", "Password is required");
        }

        if let Some(username) = &username
            && users.get_by_username(username.as_str()).await?.is_some()
        {
            errors.push("username", "That username is taken. Please try another.");
        }

        if let (true, Some(username)) = (errors.is_empty(), username) {
            Ok(Ok(SignupInput {
                username,
                password: self.password.clone(),
            }))
        } else {
            Ok(Err(errors))
        }
    }
}

// =============================================================================
// Login Form
// =============================================================================

/// Login form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Where to go after a successful login.
    #[serde(default)]
    pub next: String,
}

impl LoginForm {
    /// Check the credentials against stored users.
    ///
    /// The outer `Result` is an infrastructure failure; the inner one is
    /// the validation outcome. Error messages distinguish an unknown
    /// username from a wrong password.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the lookup or hash verification fails.
    pub async fn validate(
        &self,
        users: &UserRepository<'_>,
    ) -> Result<Result<User, FieldErrors>, AppError> {
        let mut errors = FieldErrors::default();

        let Some(user) = users.get_by_username(self.username.trim()).await? else {
            errors.push("username", "No user with that username exists");
            return Ok(Err(errors));
        };

        if auth::verify_password(&self.password, &user.password_hash)? {
            Ok(Ok(user))
        } else {
            errors.push("password", "Password doesn't match");
            Ok(Err(errors))
        }
    }
}
