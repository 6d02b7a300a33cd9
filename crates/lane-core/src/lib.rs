//! # lane-core: Pure Business Logic for Lane POS
//!
//! This crate is the heart of the register: the in-memory cart, the
//! scan/merge state machine, and all pricing math, as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Lane POS Architecture                         │
//! │                                                                     │
//! │   Scanner / keyed input                                             │
//! │        │                                                            │
//! │        ▼                                                            │
//! │   lane-register (session actor)                                     │
//! │        │              │                                             │
//! │        │              └──► lane-catalog ──► Catalog & Pricing       │
//! │        ▼                   (HTTP client)        Service             │
//! │   ★ lane-core (THIS CRATE) ★                                        │
//! │                                                                     │
//! │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────────┐              │
//! │   │  types  │ │  money  │ │   cart   │ │  pricing   │              │
//! │   │ Product │ │  Money  │ │   Cart   │ │ line_total │              │
//! │   │   Tax   │ │ TaxRate │ │ CartLine │ │  subtotal  │              │
//! │   └─────────┘ └─────────┘ └──────────┘ └────────────┘              │
//! │                                                                     │
//! │   NO I/O • NO NETWORK • PURE FUNCTIONS                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Promotion, Tax)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Cart, cart lines, and the scan/merge state machine
//! - [`pricing`] - Per-line and per-cart price computation
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, always
//! 2. **No I/O**: network, file system, hardware access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are whole yen (i64)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{
    ActiveSelection, Cart, CartLine, ScanDecision, ScanOutcome, ScanPhase, SetQuantityOutcome,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::{Product, Promotion, Tax, TaxRate};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line in the cart.
///
/// ## Business Reason
/// One sale may carry at most 99 units of one product; the 100th scan of the
/// same item is rejected, never wrapped or clamped upward.
pub const MAX_LINE_QUANTITY: i64 = 99;

/// Maximum length of a product code accepted from the scanner or keyboard.
pub const MAX_CODE_LENGTH: usize = 50;
