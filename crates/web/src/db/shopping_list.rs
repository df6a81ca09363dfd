//! Shopping list repository for database operations.
//!
//! The shopping list is a (user, item) join table with a composite primary
//! key. Adds use `INSERT OR IGNORE`, so the operation is atomic and
//! idempotent: concurrent duplicate adds cannot create two rows.

use sqlx::SqlitePool;

use greengrocer_core::{ItemId, UserId};

use super::RepositoryError;
use crate::models::Item;

/// Repository for shopping list database operations.
pub struct ShoppingListRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ShoppingListRepository<'a> {
    /// Create a new shopping list repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Add an item to a user's shopping list.
    ///
    /// Returns `true` if a row was inserted, `false` if the item was
    /// already on the list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn add(&self, user_id: UserId, item_id: ItemId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO shopping_list (user_id, item_id) VALUES (?, ?)",
        )
        .bind(user_id)
        .bind(item_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove an item from a user's shopping list.
    ///
    /// Returns `true` if a row was removed, `false` if the item was not on
    /// the list (a no-op, not an error).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove(&self, user_id: UserId, item_id: ItemId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM shopping_list WHERE user_id = ? AND item_id = ?",
        )
        .bind(user_id)
        .bind(item_id)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List the items on a user's shopping list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Item>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT i.id, i.name, i.price, i.category, i.photo_url, \
                    i.store_id, i.created_by, i.created_at \
             FROM grocery_item i \
             JOIN shopping_list sl ON sl.item_id = i.id \
             WHERE sl.user_id = ? \
             ORDER BY i.name ASC",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        // Same column set as the item queries, so the mapping is shared.
        rows.iter().map(super::items::item_from_row).collect()
    }

    /// Check whether an item is on a user's shopping list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn contains(
        &self,
        user_id: UserId,
        item_id: ItemId,
    ) -> Result<bool, RepositoryError> {
        let row = sqlx::query(
            "SELECT 1 AS present FROM shopping_list WHERE user_id = ? AND item_id = ?",
        )
        .bind(user_id)
        .bind(item_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.is_some())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_support::test_pool;
    use crate::db::{ItemRepository, StoreRepository, UserRepository};
    use crate::models::ItemInput;
    use greengrocer_core::{ItemCategory, Username};

    async fn seed(pool: &SqlitePool) -> (UserId, ItemId) {
        let user = UserRepository::new(pool)
            .create(&Username::parse("bob").unwrap(), "hash")
            .await
            .unwrap();
        let store = StoreRepository::new(pool)
            .create("Corner Mart", "1 Main St", user.id)
            .await
            .unwrap();
        let item = ItemRepository::new(pool)
            .create(
                &ItemInput {
                    name: "Apples".to_string(),
                    price: 1.5,
                    category: ItemCategory::Produce,
                    photo_url: "https://example.com/apples.jpg".to_string(),
                    store_id: store.id,
                },
                user.id,
            )
            .await
            .unwrap();
        (user.id, item.id)
    }

    #[tokio::test]
    async fn test_add_twice_yields_one_entry() {
        let pool = test_pool().await;
        let (user_id, item_id) = seed(&pool).await;
        let list = ShoppingListRepository::new(&pool);

        assert!(list.add(user_id, item_id).await.unwrap());
        assert!(!list.add(user_id, item_id).await.unwrap());

        let items = list.list_for_user(user_id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Apples");
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let pool = test_pool().await;
        let (user_id, item_id) = seed(&pool).await;
        let list = ShoppingListRepository::new(&pool);

        assert!(!list.remove(user_id, item_id).await.unwrap());

        list.add(user_id, item_id).await.unwrap();
        assert!(list.remove(user_id, item_id).await.unwrap());
        assert!(list.list_for_user(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_contains() {
        let pool = test_pool().await;
        let (user_id, item_id) = seed(&pool).await;
        let list = ShoppingListRepository::new(&pool);

        assert!(!list.contains(user_id, item_id).await.unwrap());
        list.add(user_id, item_id).await.unwrap();
        assert!(list.contains(user_id, item_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_lists_are_per_user() {
        let pool = test_pool().await;
        let (bob, item_id) = seed(&pool).await;
        let carol = UserRepository::new(&pool)
            .create(&Username::parse("carol").unwrap(), "hash")
            .await
            .unwrap()
            .id;
        let list = ShoppingListRepository::new(&pool);

        list.add(bob, item_id).await.unwrap();
        assert!(list.list_for_user(carol).await.unwrap().is_empty());
    }
}
