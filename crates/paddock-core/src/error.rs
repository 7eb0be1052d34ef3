//! # Error Types
//!
//! Domain-specific error types for paddock-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  paddock-core (this file)                                              │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  paddock-db                                                            │
//! │  └── DbError          - Store failures (missing rows, SQLite)          │
//! │                                                                         │
//! │  storefront                                                            │
//! │  └── AppError         - What the browser sees (status + page)          │
//! │                                                                         │
//! │  Flow: ValidationError ─┬─► flash + redirect (recoverable)             │
//! │                         └─► AppError 400                               │
//! │        DbError ────────────► AppError 404 / 500                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Most of these send the user back to the form with a flash message. See
/// [`ValidationError::is_recoverable`].
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., a price that is not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The multipart request carried no file part for the image.
    #[error("No file part")]
    MissingFilePart,

    /// The file part was present but the browser sent no filename.
    #[error("No selected file")]
    EmptyFilename,

    /// The filename contained nothing usable after sanitizing.
    #[error("Invalid file name: {original}")]
    UnsafeFilename { original: String },
}

impl ValidationError {
    /// Whether the handler should send the user back to the form.
    ///
    /// Format errors (a price that does not parse) are not recovered: the
    /// request fails outright.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, ValidationError::InvalidFormat { .. })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
