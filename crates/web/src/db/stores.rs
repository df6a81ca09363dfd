//! Grocery store repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use greengrocer_core::{StoreId, UserId};

use super::RepositoryError;
use crate::models::Store;

/// Repository for grocery store database operations.
pub struct StoreRepository<'a> {
    pool: &'a SqlitePool,
}

fn store_from_row(row: &SqliteRow) -> Result<Store, RepositoryError> {
    Ok(Store {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        address: row.try_get("address")?,
        created_by: row.try_get("created_by")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all stores, newest last.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT id, title, address, created_by, created_at \
             FROM grocery_store ORDER BY id ASC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.iter().map(store_from_row).collect()
    }

    /// List all stores with their item counts, newest last.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_with_item_counts(&self) -> Result<Vec<(Store, i64)>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT s.id, s.title, s.address, s.created_by, s.created_at, \
                    COUNT(i.id) AS item_count \
             FROM grocery_store s \
             LEFT JOIN grocery_item i ON i.store_id = s.id \
             GROUP BY s.id ORDER BY s.id ASC",
        )
        .fetch_all(self.pool)
        .await?;

        rows.iter()
            .map(|row| Ok((store_from_row(row)?, row.try_get("item_count")?)))
            .collect()
    }

    /// Get a store by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query(
            "SELECT id, title, address, created_by, created_at \
             FROM grocery_store WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.as_ref().map(store_from_row).transpose()
    }

    /// Create a new store attributed to `created_by`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        title: &str,
        address: &str,
        created_by: UserId,
    ) -> Result<Store, RepositoryError> {
        let row = sqlx::query(
            "INSERT INTO grocery_store (title, address, created_by, created_at) \
             VALUES (?, ?, ?, ?) \
             RETURNING id, title, address, created_by, created_at",
        )
        .bind(title)
        .bind(address)
        .bind(created_by)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        store_from_row(&row)
    }

    /// Update a store's title and address.
    ///
    /// The `created_by` attribution is deliberately not part of the update:
    /// it is set once at creation and never reassigned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the store doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: StoreId,
        title: &str,
        address: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE grocery_store SET title = ?, address = ? WHERE id = ?",
        )
        .bind(title)
        .bind(address)
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
