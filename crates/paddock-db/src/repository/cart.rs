//! # Cart Repository
//!
//! Database operations for the shared shopping cart.
//!
//! The cart is a list of entries, each pointing at one horse. Adding the
//! same horse twice creates two entries; removing works per entry id.
//! There are no quantities and no per-visitor carts.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use paddock_core::{CartEntry, CartLine};

/// Repository for cart entry database operations.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Appends a new entry for `horse_id`.
    ///
    /// ## Returns
    /// * `Ok(CartEntry)` - The new entry
    /// * `Err(DbError::UnknownHorse)` - No horse with that id
    pub async fn add(&self, horse_id: i64) -> DbResult<CartEntry> {
        debug!(horse_id = horse_id, "Adding cart entry");

        let entry = sqlx::query_as::<_, CartEntry>(
            r#"
            INSERT INTO cart_entries (horse_id, added_at)
            VALUES (?1, ?2)
            RETURNING id, horse_id, added_at
            "#,
        )
        .bind(horse_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DbError::from(e).for_cart_insert(horse_id))?;

        Ok(entry)
    }

    /// Lists every entry joined with its horse, in the order added.
    pub async fn list_lines(&self) -> DbResult<Vec<CartLine>> {
        let lines = sqlx::query_as::<_, CartLine>(
            r#"
            SELECT
                c.id AS entry_id,
                h.id AS horse_id,
                h.name,
                h.description,
                h.price,
                h.image,
                c.added_at
            FROM cart_entries c
            INNER JOIN horses h ON h.id = c.horse_id
            ORDER BY c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = lines.len(), "Listed cart lines");
        Ok(lines)
    }

    /// Removes one entry.
    ///
    /// ## Returns
    /// * `Ok(())` - Entry removed
    /// * `Err(DbError::NotFound)` - No entry with that id
    pub async fn remove(&self, id: i64) -> DbResult<()> {
        debug!(id = id, "Removing cart entry");

        let result = sqlx::query("DELETE FROM cart_entries WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Cart entry", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
