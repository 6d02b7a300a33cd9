//! # Pricing Module
//!
//! Pure price computation over cart lines. Nothing here caches: every total
//! is re-derived from its inputs on every call, so a mutation can never leave
//! a stale derived figure behind.
//!
//! ## Formulas
//! ```text
//! effective_unit_price = promotion discounts? unit_price - discount
//!                                           : unit_price
//! line_total           = effective_unit_price × quantity
//! subtotal             = Σ line_total
//! tax_inclusive_total  = floor(subtotal × (1 + percent/100))
//! ```
//!
//! The floor happens exactly once, at the tax-inclusive step. Per-line totals
//! are exact integers already and keep full precision.

use crate::cart::{Cart, CartLine};
use crate::money::Money;
use crate::types::TaxRate;

/// Unit price after promotional discount.
///
/// The plan price applies whenever a promotion is present *and* its discount
/// is nonzero; a plan with a zero discount prices like no plan at all.
pub fn effective_unit_price(line: &CartLine) -> Money {
    match &line.promotion {
        Some(promo) if promo.discounts() => line.unit_price - promo.discount_amount,
        _ => line.unit_price,
    }
}

/// Effective unit price × quantity.
pub fn line_total(line: &CartLine) -> Money {
    effective_unit_price(line).multiply_quantity(line.quantity)
}

/// Sum of all line totals (tax-exclusive).
pub fn subtotal(cart: &Cart) -> Money {
    cart.lines().iter().map(line_total).sum()
}

/// Tax-inclusive total: subtotal × (1 + rate), floored to whole yen.
pub fn tax_inclusive_total(subtotal: Money, rate: TaxRate) -> Money {
    subtotal.with_tax(rate)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::Cart;
    use crate::types::{Product, Promotion};

    fn product(id: &str, price: i64) -> Product {
        Product {
            product_id: id.to_string(),
            code: format!("CODE-{}", id),
            name: format!("Product {}", id),
            unit_price: Money::from_yen(price),
        }
    }

    fn promo(discount: i64) -> Promotion {
        Promotion {
            promotion_id: "PRM001".into(),
            plan_name: "spring sale".into(),
            discount_amount: Money::from_yen(discount),
            plan_percent: 10.0,
        }
    }

    /// The worked example: A ¥100 ×3 plus B ¥500 with ¥50 off ×2
    /// → subtotal ¥1200, 10% tax → ¥1320.
    #[test]
    fn test_worked_example() {
        let mut cart = Cart::new();
        let a = product("A", 100);
        cart.apply_resolution("CODE-A", &a, None).unwrap();
        cart.begin_scan("CODE-A").unwrap();
        cart.begin_scan("CODE-A").unwrap();

        let b = product("B", 500);
        cart.apply_resolution("CODE-B", &b, Some(promo(50))).unwrap();
        cart.begin_scan("CODE-B").unwrap();

        let line_a = cart.line("A").unwrap();
        assert_eq!(line_a.quantity, 3);
        assert_eq!(line_total(line_a).yen(), 300);

        let line_b = cart.line("B").unwrap();
        assert_eq!(effective_unit_price(line_b).yen(), 450);
        assert_eq!(line_total(line_b).yen(), 900);

        assert_eq!(subtotal(&cart).yen(), 1200);
        assert_eq!(
            tax_inclusive_total(subtotal(&cart), TaxRate::from_percent(10.0)).yen(),
            1320
        );
    }

    #[test]
    fn test_zero_discount_plan_prices_like_no_plan() {
        let mut cart = Cart::new();
        cart.apply_resolution("C1", &product("P1", 500), Some(promo(0)))
            .unwrap();

        let line = cart.line("P1").unwrap();
        assert!(line.promotion.is_some()); // plan still attached
        assert_eq!(effective_unit_price(line).yen(), 500);
    }

    #[test]
    fn test_mutating_one_line_never_changes_another() {
        let mut cart = Cart::new();
        cart.apply_resolution("C1", &product("P1", 100), None).unwrap();
        cart.apply_resolution("C2", &product("P2", 200), None).unwrap();

        let p1_before = line_total(cart.line("P1").unwrap());
        cart.set_quantity("P2", 9);
        assert_eq!(line_total(cart.line("P1").unwrap()), p1_before);
        assert_eq!(line_total(cart.line("P2").unwrap()).yen(), 1800);
    }

    #[test]
    fn test_empty_cart_subtotal_is_zero() {
        let cart = Cart::new();
        assert_eq!(subtotal(&cart), Money::zero());
        assert_eq!(
            tax_inclusive_total(Money::zero(), TaxRate::from_percent(10.0)),
            Money::zero()
        );
    }

    #[test]
    fn test_quantity_zero_line_contributes_nothing() {
        let mut cart = Cart::new();
        cart.apply_resolution("C1", &product("P1", 100), None).unwrap();
        cart.set_quantity("P1", 0);
        assert_eq!(subtotal(&cart), Money::zero());
        assert_eq!(cart.line_count(), 1); // line remains, just empty
    }
}
