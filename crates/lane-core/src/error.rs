//! # Error Types
//!
//! Domain-specific error types for lane-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  lane-core errors (this file)                                       │
//! │  ├── CoreError        - Cart/pricing rule violations                │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  lane-catalog errors (separate crate)                               │
//! │  └── CatalogError     - Lookup / checkout transport failures        │
//! │                                                                     │
//! │  lane-register errors (separate crate)                              │
//! │  └── RegisterError    - What the operator sees                      │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → RegisterError → operator       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, quantity, limit)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::MAX_LINE_QUANTITY;

// =============================================================================
// Core Error
// =============================================================================

/// Cart and pricing rule violations.
///
/// These are caught at the operation that triggered them and turned into an
/// operator-facing report; none of them ends the session.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An increment would push a line past the per-line quantity limit.
    ///
    /// ## When This Occurs
    /// - The same item is scanned while its line already holds 99 units
    /// - A lookup resolves to a product whose line already holds 99 units
    ///
    /// The cart is untouched when this is returned.
    #[error("at most {max} of one item per sale")]
    QuantityLimit { max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// The quantity-limit error with the crate-wide limit filled in.
    pub fn quantity_limit() -> Self {
        CoreError::QuantityLimit {
            max: MAX_LINE_QUANTITY,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any cart state is touched, so a failed validation never
/// leaves a partial mutation behind.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Invalid format (unexpected characters, malformed number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
