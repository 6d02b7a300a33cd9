//! # Domain Types
//!
//! Core domain types used throughout Lane POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐      │
//! │  │    Product     │   │   Promotion    │   │      Tax       │      │
//! │  │  ───────────   │   │  ───────────   │   │  ───────────   │      │
//! │  │  product_id    │   │  promotion_id  │   │  code          │      │
//! │  │  code          │   │  plan_name     │   │  name          │      │
//! │  │  name          │   │  discount      │   │  rate (bps)    │      │
//! │  │  unit_price    │   │  plan_percent  │   │                │      │
//! │  └────────────────┘   └────────────────┘   └────────────────┘      │
//! │                                                                     │
//! │  Product and Promotion are frozen snapshots of a catalog lookup:    │
//! │  once fetched for a given scan they never change.                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10.00% (Japanese consumption tax)
/// Holding the rate as an integer keeps the tax step in integer math; the
/// percent form exists only at the wire/display boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage, as the tax endpoint reports it.
    pub fn from_percent(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (wire/display form).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

// =============================================================================
// Tax
// =============================================================================

/// The session's tax master record: rate plus its catalog identity.
///
/// Fetched once at session start and read-only afterwards; checkout snapshots
/// `code` and the percent form into the submission payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tax {
    /// Tax code in the catalog master (e.g. "01").
    pub code: String,

    /// Display name (e.g. "consumption tax").
    pub name: String,

    /// The rate itself.
    pub rate: TaxRate,
}

// =============================================================================
// Product
// =============================================================================

/// A product as resolved from a scanned or typed code.
///
/// Immutable once fetched for a given lookup: the cart line freezes these
/// values, so a later catalog change never reprices lines already rung up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier; the cart's dedupe key.
    ///
    /// Two different code representations (with/without a check digit) may
    /// resolve to the same product_id, which is why merging is keyed here and
    /// never on the raw scanned code.
    pub product_id: String,

    /// The code this lookup resolved from.
    pub code: String,

    /// Display name shown to the operator and on the receipt.
    pub name: String,

    /// Unit price in whole yen.
    pub unit_price: Money,
}

// =============================================================================
// Promotion
// =============================================================================

/// A promotional discount plan attached to a product by the extended lookup.
///
/// Absence is modeled by `Option<Promotion>`, never by a sentinel zero:
/// a promotion whose `discount_amount` is 0 is still *present* (it renders on
/// the line) even though it does not change the effective price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    /// Promotion identifier in the catalog master.
    pub promotion_id: String,

    /// Plan display name (e.g. "spring sale").
    pub plan_name: String,

    /// Per-unit discount in whole yen. Zero means the plan exists but does
    /// not discount.
    pub discount_amount: Money,

    /// Percentage figure the catalog reports alongside the plan. Display
    /// only; pricing uses `discount_amount` exclusively.
    pub plan_percent: f64,
}

impl Promotion {
    /// Whether this promotion changes the effective unit price.
    #[inline]
    pub fn discounts(&self) -> bool {
        !self.discount_amount.is_zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
