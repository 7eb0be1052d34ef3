//! # Validation Module
//!
//! Input validation for the horse forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTML form                                                    │
//! │  └── `required` attributes, number input for price                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: storefront handler (Rust)                                    │
//! │  ├── Multipart parsing, missing fields                                 │
//! │  └── THIS MODULE: price parsing, text and filename rules               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use paddock_core::validation::{parse_price, validate_horse_fields};
//!
//! let price = parse_price("1200.0").unwrap();
//! let fields = validate_horse_fields("Bella", "Gentle mare", price).unwrap();
//! assert_eq!(fields.price, 1200.0);
//! ```

use crate::error::ValidationError;
use crate::filename::secure_filename;
use crate::types::HorseFields;
use crate::MAX_NAME_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a horse name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most [`MAX_NAME_LEN`] characters
pub fn validate_horse_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a description. Any length, but not blank.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses the price field.
///
/// Accepts anything `f64` parses after trimming (`"1200"`, `"1200.50"`,
/// `"1.2e3"`). Negative prices are let through. NaN and infinities are
/// rejected because they cannot be stored.
///
/// ## Example
/// ```rust
/// use paddock_core::validation::parse_price;
///
/// assert_eq!(parse_price(" 99.5 ").unwrap(), 99.5);
/// assert!(parse_price("cheap").is_err());
/// assert!(parse_price("inf").is_err());
/// ```
pub fn parse_price(raw: &str) -> ValidationResult<f64> {
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: format!("'{}' is not a number", raw),
        })?;

    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    Ok(price)
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates the text fields and bundles them with an already parsed price.
///
/// Name and description are stored as submitted; trimming only applies to the
/// emptiness check.
pub fn validate_horse_fields(
    name: &str,
    description: &str,
    price: f64,
) -> ValidationResult<HorseFields> {
    validate_horse_name(name)?;
    validate_description(description)?;

    Ok(HorseFields {
        name: name.to_string(),
        description: description.to_string(),
        price,
    })
}

/// Turns a client supplied filename into the name the file is stored under.
///
/// ## Rules
/// - Empty filename → [`ValidationError::EmptyFilename`]
/// - Nothing left after sanitizing → [`ValidationError::UnsafeFilename`]
pub fn validate_upload_filename(original: &str) -> ValidationResult<String> {
    if original.is_empty() {
        return Err(ValidationError::EmptyFilename);
    }

    let safe = secure_filename(original);
    if safe.is_empty() {
        return Err(ValidationError::UnsafeFilename {
            original: original.to_string(),
        });
    }

    Ok(safe)
}

// =============================================================================
// Unit Tests
// =============================================================================
