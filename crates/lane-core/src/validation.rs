//! # Validation Module
//!
//! Input validation for codes and quantities. Runs before any cart state is
//! touched, so a rejected input never leaves a partial mutation behind.

use crate::error::ValidationError;
use crate::{MAX_CODE_LENGTH, MAX_LINE_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Code Validators
// =============================================================================

/// Validates a product code from the scanner or keyboard.
///
/// ## Rules
/// - must not be empty after trimming (the *scan path* treats empty as a
///   silent no-op before validation; this is for explicit submissions)
/// - at most 50 characters
/// - alphanumeric plus hyphen/underscore only
///
/// ## Returns
/// The trimmed code.
pub fn validate_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required { field: "code" });
    }

    if code.len() > MAX_CODE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "code",
            max: MAX_CODE_LENGTH,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code",
            reason: "must contain only letters, numbers, hyphens, and underscores",
        });
    }

    Ok(code.to_string())
}

// =============================================================================
// Quantity Validators
// =============================================================================

/// Clamps a requested quantity into [0, 99].
///
/// 0 and 99 are valid targets; values beyond the bounds land exactly on the
/// bound and are never stored past it.
#[inline]
pub fn clamp_quantity(qty: i64) -> i64 {
    qty.clamp(0, MAX_LINE_QUANTITY)
}

/// Validates a quantity without clamping.
///
/// Used where an out-of-range value must be *rejected* rather than coerced
/// (payload assembly double-checks line quantities this way).
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(0..=MAX_LINE_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "quantity",
            min: 0,
            max: MAX_LINE_QUANTITY,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
