//! # Domain Types
//!
//! Core domain types used throughout Paddock.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Horse       │   │   CartEntry     │   │    CartLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (INTEGER)   │◄──│  horse_id (FK)  │   │  entry + horse  │       │
//! │  │  name           │   │  id (INTEGER)   │   │  (read model    │       │
//! │  │  description    │   │  added_at       │   │   for the cart  │       │
//! │  │  price (f64)    │   └─────────────────┘   │   page)         │       │
//! │  │  image (opt)    │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Identifiers are integers assigned by the storage layer on insert and never
//! change afterwards. A cart entry is a bare reference: the same horse may be
//! referenced by any number of entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Horse
// =============================================================================

/// A horse listed for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Horse {
    /// Identifier assigned by the database.
    pub id: i64,

    /// Display name shown in the list and the cart.
    pub name: String,

    /// Free text description.
    pub description: String,

    /// Asking price. Expected non-negative, not enforced.
    pub price: f64,

    /// Stored filename of the uploaded image, relative to the upload directory.
    pub image: Option<String>,

    /// When the horse was created.
    pub created_at: DateTime<Utc>,

    /// When the horse was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Horse {
    /// Replaces the editable fields.
    ///
    /// The image is only replaced when a new one was stored; `None` keeps the
    /// current image.
    pub fn apply(&mut self, fields: HorseFields, new_image: Option<String>) {
        self.name = fields.name;
        self.description = fields.description;
        self.price = fields.price;
        if let Some(image) = new_image {
            self.image = Some(image);
        }
    }
}

// =============================================================================
// Horse Fields
// =============================================================================

/// The editable text and price fields of a horse, already validated.
///
/// Built by [`crate::validation::validate_horse_fields`].
#[derive(Debug, Clone, PartialEq)]
pub struct HorseFields {
    pub name: String,
    pub description: String,
    pub price: f64,
}

// =============================================================================
// New Horse
// =============================================================================

/// A horse that has not been persisted yet (no id).
#[derive(Debug, Clone, PartialEq)]
pub struct NewHorse {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: Option<String>,
}

impl NewHorse {
    /// Combines validated fields with the stored image filename.
    pub fn new(fields: HorseFields, image: impl Into<String>) -> Self {
        NewHorse {
            name: fields.name,
            description: fields.description,
            price: fields.price,
            image: Some(image.into()),
        }
    }
}

// =============================================================================
// Cart Entry
// =============================================================================

/// One slot in the cart, pointing at a horse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CartEntry {
    pub id: i64,
    pub horse_id: i64,
    pub added_at: DateTime<Utc>,
}

// =============================================================================
// Cart Line
// =============================================================================

/// A cart entry joined with the horse it references.
///
/// This is what the cart page renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CartLine {
    /// Cart entry id (used by remove-from-cart).
    pub entry_id: i64,
    pub horse_id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: Option<String>,
    pub added_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
