//! # Store Errors
//!
//! What can go wrong between a handler and `horses.db`.
//!
//! ```text
//! sqlx::Error ──► DbError ──► AppError (storefront)
//!
//!   no row matched an id          NotFound { entity, id }   404
//!   cart entry for a missing horse UnknownHorse             404
//!   file can't be opened           Open { path, .. }        startup abort
//!   migration failed               Migration                startup abort
//!   pool closed or timed out       Unavailable              500
//!   anything else from SQLite      Query                    500
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by [`crate::Database`] and its repositories.
#[derive(Debug, Error)]
pub enum DbError {
    /// An update or delete addressed an id with no row behind it.
    #[error("{entity} {id} does not exist")]
    NotFound { entity: &'static str, id: i64 },

    /// A cart entry was added for a horse id that is not stored.
    ///
    /// Raised by the `cart_entries.horse_id` foreign key, so the cart is
    /// never touched.
    #[error("Horse {horse_id} does not exist")]
    UnknownHorse { horse_id: i64 },

    /// The database file could not be opened or created.
    #[error("Cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },

    /// The embedded schema could not be applied.
    #[error("Schema migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The pool is closed, or no connection freed up in time.
    #[error("Database unavailable: {0}")]
    Unavailable(sqlx::Error),

    /// Any other SQLite failure.
    #[error("Query failed: {0}")]
    Query(sqlx::Error),
}

impl DbError {
    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        DbError::NotFound { entity, id }
    }

    /// Reclassifies a foreign key failure on a cart insert.
    pub(crate) fn for_cart_insert(self, horse_id: i64) -> Self {
        match self {
            DbError::Query(sqlx::Error::Database(ref db_err))
                if db_err.is_foreign_key_violation()
                    || db_err.message().contains("FOREIGN KEY constraint failed") =>
            {
                DbError::UnknownHorse { horse_id }
            }
            other => other,
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => DbError::Unavailable(err),
            other => DbError::Query(other),
        }
    }
}

/// Result type for store operations.
pub type DbResult<T> = Result<T, DbError>;
