//! Grocery item repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use greengrocer_core::{ItemCategory, ItemId, StoreId, UserId};

use super::RepositoryError;
use crate::models::{Item, ItemInput};

/// Repository for grocery item database operations.
pub struct ItemRepository<'a> {
    pool: &'a SqlitePool,
}

pub(crate) fn item_from_row(row: &SqliteRow) -> Result<Item, RepositoryError> {
    let category: String = row.try_get("category")?;
    let category = category.parse::<ItemCategory>().map_err(|e| {
        RepositoryError::DataCorruption(format!("invalid category in database: {e}"))
    })?;

    Ok(Item {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        category,
        photo_url: row.try_get("photo_url")?,
        store_id: row.try_get("store_id")?,
        created_by: row.try_get("created_by")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get an item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored category is invalid.
    pub async fn get(&self, id: ItemId) -> Result<Option<Item>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, name, price, category, photo_url, store_id, created_by, created_at \
             FROM grocery_item WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.as_ref().map(item_from_row).transpose()
    }

    /// List all items sold at a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_store(&self, store_id: StoreId) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, name, price, category, photo_url, store_id, created_by, created_at \
             FROM grocery_item WHERE store_id = ? ORDER BY id ASC",
        )
        .bind(store_id)
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(item_from_row).collect()
    }

    /// Create a new item attributed to `created_by`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        input: &ItemInput,
        created_by: UserId,
    ) -> Result<Item, RepositoryError> {
        let row = sqlx::query(
            "INSERT INTO grocery_item \
             (name, price, category, photo_url, store_id, created_by, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             RETURNING id, name, price, category, photo_url, store_id, created_by, created_at",
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(input.category.as_str())
        .bind(&input.photo_url)
        .bind(input.store_id)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        item_from_row(&row)
    }

    /// Update an item's editable fields.
    ///
    /// The `created_by` attribution is deliberately not part of the update:
    /// it is set once at creation and never reassigned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: ItemId, input: &ItemInput) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE grocery_item \
             SET name = ?, price = ?, category = ?, photo_url = ?, store_id = ? \
             WHERE id = ?",
        )
        .bind(&input.name)
        .bind(input.price)
        .bind(input.category.as_str())
        .bind(&input.photo_url)
        .bind(input.store_id)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::test_pool;
    use crate::db::{StoreRepository, UserRepository};
    use greengrocer_core::Username;

    async fn seed(pool: &SqlitePool) -> (UserId, StoreId) {
        let user = UserRepository::new(pool)
            .create(&Username::parse("alice").unwrap(), "hash")
            .await
            .unwrap();
        let store = StoreRepository::new(pool)
            .create("Corner Mart", "1 Main St", user.id)
            .await
            .unwrap();
        (user.id, store.id)
    }

    fn apples(store_id: StoreId) -> ItemInput {
        ItemInput {
            name: "Apples".to_string(),
            price: 1.5,
            category: ItemCategory::Produce,
            photo_url: "https://example.com/apples.jpg".to_string(),
            store_id,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_roundtrips() {
        let pool = test_pool().await;
        let (user_id, store_id) = seed(&pool).await;
        let items = ItemRepository::new(&pool);

        let created = items.create(&apples(store_id), user_id).await.unwrap();
        let fetched = items.get(created.id).await.unwrap().unwrap();

        assert_eq!(fetched.name, "Apples");
        assert!((fetched.price - 1.5).abs() < f64::EPSILON);
        assert_eq!(fetched.category, ItemCategory::Produce);
        assert_eq!(fetched.store_id, store_id);
        assert_eq!(fetched.created_by, Some(user_id));
    }

    #[tokio::test]
    async fn test_update_keeps_created_by_and_moves_store() {
        let pool = test_pool().await;
        let (user_id, store_id) = seed(&pool).await;
        let other_store = StoreRepository::new(&pool)
            .create("Other Mart", "2 Side St", user_id)
            .await
            .unwrap();
        let items = ItemRepository::new(&pool);

        let created = items.create(&apples(store_id), user_id).await.unwrap();

        let mut input = apples(other_store.id);
        input.name = "Green Apples".to_string();
        input.price = 2.25;
        items.update(created.id, &input).await.unwrap();

        let updated = items.get(created.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Green Apples");
        assert_eq!(updated.store_id, other_store.id);
        assert_eq!(updated.created_by, Some(user_id));
    }

    #[tokio::test]
    async fn test_list_by_store() {
        let pool = test_pool().await;
        let (user_id, store_id) = seed(&pool).await;
        let items = ItemRepository::new(&pool);

        items.create(&apples(store_id), user_id).await.unwrap();
        let mut bread = apples(store_id);
        bread.name = "Bread".to_string();
        bread.category = ItemCategory::Bakery;
        items.create(&bread, user_id).await.unwrap();

        let listed = items.list_by_store(store_id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Apples");
        assert_eq!(listed[1].name, "Bread");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let pool = test_pool().await;
        let (_, store_id) = seed(&pool).await;
        let items = ItemRepository::new(&pool);

        let err = items
            .update(ItemId::new(404), &apples(store_id))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }
}
