//! # Opening the Store
//!
//! ```text
//! DbConfig::new("horses.db")  ──┐
//! DbConfig::in_memory()       ──┴─► Database::open ──► migrate ──► Database
//!                                                                    │
//!                                         horses() ◄─────────────────┤
//!                                         cart()   ◄─────────────────┘
//! ```
//!
//! Every connection runs with `foreign_keys = ON`. The cart relies on it to
//! reject entries for horses that are not stored. File databases use WAL so
//! page loads keep reading while a form submission writes.

use std::path::PathBuf;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::cart::CartRepository;
use crate::repository::horse::HorseRepository;

/// Connections kept for a file database. One request holds at most one.
const FILE_POOL_SIZE: u32 = 5;

/// Where the store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    location: Location,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Location {
    File(PathBuf),
    Memory,
}

impl DbConfig {
    /// A database file, created on first open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: Location::File(path.into()),
        }
    }

    /// A private in-memory database. Gone when the [`Database`] is dropped.
    pub fn in_memory() -> Self {
        DbConfig {
            location: Location::Memory,
        }
    }
}

/// Handle to the horse store.
///
/// Cloning shares the pool. The storefront keeps one in its router state.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (or creates) the store and brings its schema up to date.
    pub async fn open(config: DbConfig) -> DbResult<Self> {
        let (path, pool_options, connect_options) = match config.location {
            Location::File(path) => {
                let connect_options = SqliteConnectOptions::new()
                    .filename(&path)
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .synchronous(SqliteSynchronous::Normal);
                let pool_options = SqlitePoolOptions::new().max_connections(FILE_POOL_SIZE);
                (path, pool_options, connect_options)
            }
            // every connection to :memory: is its own database, so keep exactly one alive
            Location::Memory => {
                let pool_options = SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None);
                (PathBuf::from(":memory:"), pool_options, SqliteConnectOptions::new())
            }
        };

        let pool = pool_options
            .connect_with(connect_options.foreign_keys(true))
            .await
            .map_err(|source| DbError::Open {
                path: path.clone(),
                source,
            })?;

        migrations::migrate(&pool).await?;
        info!(path = %path.display(), "Horse store open");

        Ok(Database { pool })
    }

    /// Horse queries.
    pub fn horses(&self) -> HorseRepository {
        HorseRepository::new(self.pool.clone())
    }

    /// Cart queries.
    pub fn cart(&self) -> CartRepository {
        CartRepository::new(self.pool.clone())
    }

    /// Waits for in-flight queries, then closes every connection.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Horse store closed");
    }
}
