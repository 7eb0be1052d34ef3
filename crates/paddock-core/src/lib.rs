//! # paddock-core: Pure Domain Logic for Paddock
//!
//! This crate holds the domain types and rules of the horse inventory and
//! cart application as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Paddock Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Browser (HTML forms)                         │   │
//! │  │    Horse list ──► Add / Edit form ──► Cart page                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 storefront (axum handlers)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ paddock-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌────────────┐                │   │
//! │  │   │   types   │  │ validation │  │  filename  │                │   │
//! │  │   │   Horse   │  │ name/price │  │  secure_   │                │   │
//! │  │   │ CartEntry │  │   checks   │  │  filename  │                │   │
//! │  │   └───────────┘  └────────────┘  └────────────┘                │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    paddock-db (Database Layer)                  │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Horse, CartEntry, CartLine)
//! - [`error`] - Domain error types
//! - [`validation`] - Form field rules and price parsing
//! - [`filename`] - Filesystem-safe names for uploaded images
//!
//! ## Example Usage
//!
//! ```rust
//! use paddock_core::filename::secure_filename;
//! use paddock_core::validation::parse_price;
//!
//! assert_eq!(secure_filename("../../etc/passwd"), "etc_passwd");
//! assert_eq!(parse_price("1200").unwrap(), 1200.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod filename;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default ceiling for a single write request carrying an image (16 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Maximum length of a horse name.
///
/// Mirrors the column width the catalog has always used for names.
pub const MAX_NAME_LEN: usize = 100;
