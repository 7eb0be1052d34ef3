//! # paddock-db: Database Layer for Paddock
//!
//! This crate provides database access for the horse inventory and cart.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Paddock Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (create_horse, add_to_cart, ...)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    paddock-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (horse.rs,   │    │  (embedded)  │  │   │
//! │  │   │               │    │   cart.rs)    │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ HorseRepo     │    │ 001_initial  │  │   │
//! │  │   │               │    │ CartRepo      │    │ _schema.sql  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (horses.db)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (horse, cart)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paddock_db::{Database, DbConfig};
//!
//! let db = Database::open(DbConfig::new("horses.db")).await?;
//!
//! let horses = db.horses().list_all().await?;
//! let entry = db.cart().add(horses[0].id).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::cart::CartRepository;
pub use repository::horse::HorseRepository;
