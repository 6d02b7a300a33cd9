//! # Register Error Type
//!
//! Unified operator-facing error for session operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                 Error Flow at the Register                          │
//! │                                                                     │
//! │  lane-core    CoreError ───────┐                                    │
//! │                                ├──► RegisterError ──► operator      │
//! │  lane-catalog CatalogError ────┘         │                          │
//! │                                          ▼                          │
//! │                              code() + presentation()                │
//! │                                                                     │
//! │  Every error is caught at the operation that raised it and turned   │
//! │  into a report; none of them ends the session, and no cart          │
//! │  mutation is ever partially applied.                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use lane_catalog::CatalogError;
use lane_core::CoreError;

/// Result type alias for session operations.
pub type RegisterResult<T> = Result<T, RegisterError>;

/// Operator-facing error for register operations.
#[derive(Debug, Error)]
pub enum RegisterError {
    /// Checkout attempted with nothing in the cart. No remote call is made.
    #[error("cart is empty")]
    EmptyCart,

    /// Checkout attempted before the session tax snapshot was fetched.
    #[error("tax rate unavailable; refresh the session tax first")]
    TaxUnavailable,

    /// Cart or validation rule violation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Catalog & Pricing Service failure.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The session actor has shut down; no further commands are accepted.
    #[error("register session closed")]
    SessionClosed,
}

// =============================================================================
// Classification
// =============================================================================

/// Machine-readable error codes for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Scanned code has no catalog entry.
    NotFound,

    /// Increment past the per-line quantity limit.
    QuantityLimit,

    /// Malformed input or an empty cart at checkout.
    ValidationError,

    /// Service answered with a non-success status.
    BackendError,

    /// Transport-level failure.
    NetworkFailure,

    /// Session-internal condition (closed actor).
    Internal,
}

/// How a failure should reach the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Render inline where the product name would go ("not registered").
    Inline,

    /// Raise an alert; the attempted operation was abandoned.
    Alert,
}

impl RegisterError {
    /// The machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RegisterError::EmptyCart | RegisterError::TaxUnavailable => ErrorCode::ValidationError,
            RegisterError::Core(CoreError::QuantityLimit { .. }) => ErrorCode::QuantityLimit,
            RegisterError::Core(CoreError::Validation(_)) => ErrorCode::ValidationError,
            RegisterError::Catalog(CatalogError::NotFound { .. }) => ErrorCode::NotFound,
            RegisterError::Catalog(CatalogError::Network(_)) => ErrorCode::NetworkFailure,
            RegisterError::Catalog(_) => ErrorCode::BackendError,
            RegisterError::SessionClosed => ErrorCode::Internal,
        }
    }

    /// Whether this failure renders inline or as an alert.
    ///
    /// Only the "product not registered" case is inline; everything else
    /// interrupts the operator.
    pub fn presentation(&self) -> Presentation {
        match self.code() {
            ErrorCode::NotFound => Presentation::Inline,
            _ => Presentation::Alert,
        }
    }
}
