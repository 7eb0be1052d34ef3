//! # Horse Repository
//!
//! Database operations for horses.
//!
//! ## Key Operations
//! - Listing in insertion order
//! - CRUD operations
//! - Delete that takes the horse's cart entries with it
//!
//! ## Delete Cascade
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Deleting Horse #3                                    │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    DELETE FROM cart_entries WHERE horse_id = 3   (0..n rows)           │
//! │    DELETE FROM horses WHERE id = 3               (must be 1 row)       │
//! │  COMMIT                  ── or ROLLBACK when the horse is missing      │
//! │                                                                         │
//! │  The schema also declares ON DELETE CASCADE, so a manual DELETE from   │
//! │  the sqlite shell can't leave dangling entries either.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use paddock_core::{Horse, NewHorse};

/// Repository for horse database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = HorseRepository::new(pool);
///
/// let horses = repo.list_all().await?;
/// let horse = repo.get_by_id(3).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HorseRepository {
    pool: SqlitePool,
}

impl HorseRepository {
    /// Creates a new HorseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        HorseRepository { pool }
    }

    /// Lists every horse, oldest first.
    pub async fn list_all(&self) -> DbResult<Vec<Horse>> {
        let horses = sqlx::query_as::<_, Horse>(
            r#"
            SELECT
                id,
                name,
                description,
                price,
                image,
                created_at,
                updated_at
            FROM horses
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = horses.len(), "Listed horses");
        Ok(horses)
    }

    /// Gets a horse by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Horse))` - Horse found
    /// * `Ok(None)` - Horse not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Horse>> {
        let horse = sqlx::query_as::<_, Horse>(
            r#"
            SELECT
                id,
                name,
                description,
                price,
                image,
                created_at,
                updated_at
            FROM horses
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(horse)
    }

    /// Inserts a new horse.
    ///
    /// ## Returns
    /// * `Ok(Horse)` - The stored horse, with its new id and timestamps
    pub async fn insert(&self, horse: &NewHorse) -> DbResult<Horse> {
        debug!(name = %horse.name, "Inserting horse");

        let now = Utc::now();

        let stored = sqlx::query_as::<_, Horse>(
            r#"
            INSERT INTO horses (
                name, description, price, image, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?5
            )
            RETURNING
                id,
                name,
                description,
                price,
                image,
                created_at,
                updated_at
            "#,
        )
        .bind(&horse.name)
        .bind(&horse.description)
        .bind(horse.price)
        .bind(&horse.image)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = stored.id, "Horse inserted");
        Ok(stored)
    }

    /// Updates an existing horse.
    ///
    /// Writes name, description, price and image exactly as given and bumps
    /// `updated_at`.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Horse doesn't exist
    pub async fn update(&self, horse: &Horse) -> DbResult<()> {
        debug!(id = horse.id, "Updating horse");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE horses SET
                name = ?2,
                description = ?3,
                price = ?4,
                image = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(horse.id)
        .bind(&horse.name)
        .bind(&horse.description)
        .bind(horse.price)
        .bind(&horse.image)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Horse", horse.id));
        }

        Ok(())
    }

    /// Deletes a horse together with every cart entry that references it.
    ///
    /// Both deletes run in one transaction. The image file on disk is left
    /// alone.
    ///
    /// ## Returns
    /// * `Ok(u64)` - Number of cart entries removed alongside the horse
    /// * `Err(DbError::NotFound)` - Horse doesn't exist (nothing is changed)
    pub async fn delete(&self, id: i64) -> DbResult<u64> {
        debug!(id = id, "Deleting horse");

        let mut tx = self
            .pool
            .begin()
            .await?;

        let entries = sqlx::query("DELETE FROM cart_entries WHERE horse_id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM horses WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Err(DbError::not_found("Horse", id));
        }

        tx.commit().await?;

        debug!(id = id, cart_entries = entries, "Horse deleted");
        Ok(entries)
    }

    /// Counts stored horses.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM horses")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
