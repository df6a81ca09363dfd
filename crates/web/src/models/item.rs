//! Grocery item domain type.

use chrono::{DateTime, Utc};

use greengrocer_core::{ItemCategory, ItemId, StoreId, UserId};

/// A grocery item (domain type).
///
/// Every item belongs to exactly one store at all times; the store can be
/// reassigned on edit.
#[derive(Debug, Clone)]
pub struct Item {
    /// Unique item ID.
    pub id: ItemId,
    /// Item name, 3-80 characters.
    pub name: String,
    /// Price in dollars. Displayed with two decimals.
    pub price: f64,
    /// Category from the fixed enumeration.
    pub category: ItemCategory,
    /// URL of a product photo.
    pub photo_url: String,
    /// The store this item is sold at.
    pub store_id: StoreId,
    /// Who created the item. Set once, never reassigned on edit.
    pub created_by: Option<UserId>,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

/// Validated item fields shared by the create and update paths.
///
/// Produced by the item form after validation; `created_by` is not part of
/// it because attribution is set once at creation and never edited.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemInput {
    /// Item name, 3-80 characters.
    pub name: String,
    /// Price in dollars, non-negative.
    pub price: f64,
    /// Category from the fixed enumeration.
    pub category: ItemCategory,
    /// URL of a product photo.
    pub photo_url: String,
    /// The store this item is sold at.
    pub store_id: StoreId,
}
