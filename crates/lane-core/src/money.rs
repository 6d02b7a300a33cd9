//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: integer yen (i64)                                    │
//! │  The catalog prices in whole yen, so the smallest currency unit     │
//! │  IS the unit. Every price, discount, and total in the system        │
//! │  flows through this type; floats appear only at the tax step,       │
//! │  where the rate is applied in integer basis-point math instead.     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use lane_core::money::Money;
//!
//! let price = Money::from_yen(500);
//! let line_total = price * 3;            // ¥1500
//! let discounted = price - Money::from_yen(50); // ¥450
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole yen.
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate math may dip negative (oversized
///   discounts are caught by validation, not by the type)
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Transparent serde**: serializes as a plain JSON number, which is what
///   the Catalog & Pricing Service expects on the wire
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole yen.
    #[inline]
    pub const fn from_yen(yen: i64) -> Self {
        Money(yen)
    }

    /// Returns the value in whole yen.
    #[inline]
    pub const fn yen(&self) -> i64 {
        self.0
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a tax rate and returns the tax-inclusive amount, floored.
    ///
    /// ## Rounding Policy
    /// The fraction is truncated (floor), once, at this step. Per-line totals
    /// keep full integer precision; only the final tax-inclusive total loses
    /// the sub-yen fraction.
    ///
    /// ## Implementation
    /// Integer basis-point math, widened to i128 so large subtotals cannot
    /// overflow: `amount * (10000 + bps) / 10000`. For non-negative amounts
    /// integer division IS floor.
    ///
    /// ## Example
    /// ```rust
    /// use lane_core::money::Money;
    /// use lane_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_yen(1200);
    /// let rate = TaxRate::from_percent(10.0);
    /// assert_eq!(subtotal.with_tax(rate).yen(), 1320);
    /// ```
    pub fn with_tax(&self, rate: TaxRate) -> Money {
        let gross = (self.0 as i128 * (10_000 + rate.bps() as i128)) / 10_000;
        Money(gross as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the raw yen amount prefixed with the currency sign.
///
/// ## Note
/// This is for logs and debugging. Receipt/terminal formatting (thousands
/// separators) lives at the presentation boundary and is never parsed back.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "¥{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yen() {
        let money = Money::from_yen(1099);
        assert_eq!(money.yen(), 1099);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_yen(1099)), "¥1099");
        assert_eq!(format!("{}", Money::from_yen(0)), "¥0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_yen(1000);
        let b = Money::from_yen(500);

        assert_eq!((a + b).yen(), 1500);
        assert_eq!((a - b).yen(), 500);
        assert_eq!((a * 3).yen(), 3000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300].map(Money::from_yen).into_iter().sum();
        assert_eq!(total.yen(), 600);
    }

    #[test]
    fn test_with_tax_exact() {
        // ¥1200 at 10% = ¥1320, no fraction
        let subtotal = Money::from_yen(1200);
        assert_eq!(subtotal.with_tax(TaxRate::from_percent(10.0)).yen(), 1320);
    }

    #[test]
    fn test_with_tax_floors_fraction() {
        // ¥999 at 10% = ¥1098.9 → floored to ¥1098, never rounded up
        let subtotal = Money::from_yen(999);
        assert_eq!(subtotal.with_tax(TaxRate::from_percent(10.0)).yen(), 1098);

        // ¥101 at 8% = ¥109.08 → ¥109
        let subtotal = Money::from_yen(101);
        assert_eq!(subtotal.with_tax(TaxRate::from_percent(8.0)).yen(), 109);
    }

    #[test]
    fn test_with_tax_zero_rate() {
        let subtotal = Money::from_yen(777);
        assert_eq!(subtotal.with_tax(TaxRate::zero()).yen(), 777);
    }

    #[test]
    fn test_with_tax_never_below_subtotal() {
        for yen in [0, 1, 99, 100, 12345] {
            let subtotal = Money::from_yen(yen);
            let gross = subtotal.with_tax(TaxRate::from_percent(10.0));
            assert!(gross >= subtotal);
        }
    }

    #[test]
    fn test_with_tax_large_subtotal_no_overflow() {
        // 99 lines × ¥9_999_990 each stays well inside i64 after widening
        let subtotal = Money::from_yen(9_999_990 * 99);
        let gross = subtotal.with_tax(TaxRate::from_percent(10.0));
        assert_eq!(gross.yen(), 9_999_990 * 99 / 10 * 11);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_yen(450);
        assert_eq!(unit_price.multiply_quantity(2).yen(), 900);
    }

    #[test]
    fn test_serde_is_plain_number() {
        let json = serde_json::to_string(&Money::from_yen(450)).unwrap();
        assert_eq!(json, "450");
        let back: Money = serde_json::from_str("450").unwrap();
        assert_eq!(back, Money::from_yen(450));
    }
}
