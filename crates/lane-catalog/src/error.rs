//! # Catalog Error Types
//!
//! Error types for Catalog & Pricing Service operations.
//!
//! ## Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Error Categories                        │
//! │                                                                     │
//! │  NotFound         code has no catalog entry (recoverable, inline)   │
//! │  Backend          non-2xx response (operation abandoned, alerted)   │
//! │  Network          transport failure (handled like Backend)          │
//! │  InvalidResponse  2xx with a body we cannot decode                  │
//! │  InvalidConfig    bad endpoint configuration at startup             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors from the Catalog & Pricing Service client.
///
/// ## Design Principles
/// - Each variant carries enough context to report to the operator
/// - None of these ends the session; the triggering operation is abandoned
///   and the cart left untouched
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The product endpoints returned 404: the code has no catalog entry.
    ///
    /// Surfaced inline ("product not registered"), not as an alert.
    #[error("product not registered: {code}")]
    NotFound { code: String },

    /// The service answered with a non-success status.
    ///
    /// `detail` is the service's error-body message when it sent one,
    /// otherwise the status line.
    #[error("catalog service error ({status}): {detail}")]
    Backend { status: u16, detail: String },

    /// The request never completed (connect, timeout, protocol).
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    /// A success response whose body did not match the wire contract.
    #[error("malformed service response: {0}")]
    InvalidResponse(String),

    /// Bad client configuration detected at startup.
    #[error("invalid catalog configuration: {0}")]
    InvalidConfig(String),
}

// =============================================================================
// Error Categorization
// =============================================================================

impl CatalogError {
    /// True for the recoverable "no such product" case, which renders inline
    /// instead of raising an alert.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }

    /// True when the failure happened below the HTTP layer.
    ///
    /// Transport failures and backend errors are handled identically by the
    /// register (abandon the operation, alert the operator); the split exists
    /// for logging.
    pub fn is_transport(&self) -> bool {
        matches!(self, CatalogError::Network(_))
    }

    /// True when retrying the same operation could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CatalogError::Network(_) | CatalogError::Backend { status: 500..=599, .. }
        )
    }
}
