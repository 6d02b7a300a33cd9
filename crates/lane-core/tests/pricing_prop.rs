//! Property-based tests for the cart and pricing invariants.
//!
//! These verify invariants that should hold for any sequence of valid
//! scans and edits, not just the worked examples.

use lane_core::{
    pricing, Cart, CoreError, Money, Product, Promotion, ScanOutcome, TaxRate,
};
use proptest::prelude::*;

// =============================================================================
// Arbitrary Strategies
// =============================================================================

/// A unit price in whole yen (¥1 to ¥100,000).
fn arb_price() -> impl Strategy<Value = i64> {
    1i64..=100_000
}

/// A discount that never exceeds the smallest generated discountable price.
fn arb_discount() -> impl Strategy<Value = i64> {
    0i64..=99
}

/// A price high enough that any `arb_discount` value stays below it.
fn arb_discountable_price() -> impl Strategy<Value = i64> {
    100i64..=100_000
}

/// A tax percent in the plausible retail range, in 0.25% steps.
fn arb_tax_percent() -> impl Strategy<Value = f64> {
    (0u32..=100).prop_map(|quarters| quarters as f64 * 0.25)
}

fn product(idx: usize, price: i64) -> Product {
    Product {
        product_id: format!("P{idx}"),
        code: format!("C{idx}"),
        name: format!("Product {idx}"),
        unit_price: Money::from_yen(price),
    }
}

fn promotion(discount: i64) -> Option<Promotion> {
    (discount > 0).then(|| Promotion {
        promotion_id: "PRM".into(),
        plan_name: "plan".into(),
        discount_amount: Money::from_yen(discount),
        plan_percent: 0.0,
    })
}

// =============================================================================
// Invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// subtotal = Σ effective_unit_price × quantity, always.
    #[test]
    fn subtotal_is_sum_of_line_totals(
        prices in prop::collection::vec(arb_price(), 1..8),
        quantities in prop::collection::vec(1i64..=99, 1..8),
    ) {
        let mut cart = Cart::new();
        let mut expected = 0i64;

        for (idx, (&price, &qty)) in prices.iter().zip(&quantities).enumerate() {
            let p = product(idx, price);
            cart.apply_resolution(&p.code.clone(), &p, None).unwrap();
            cart.set_quantity(&p.product_id, qty);
            expected += price * qty;
        }

        prop_assert_eq!(cart.subtotal().yen(), expected);
    }

    /// Tax-inclusive total is floor(subtotal × (1 + pct/100)) and never
    /// drops below the subtotal for a non-negative rate.
    #[test]
    fn tax_total_floors_and_dominates_subtotal(
        subtotal_yen in 0i64..=10_000_000,
        pct in arb_tax_percent(),
    ) {
        let rate = TaxRate::from_percent(pct);
        let subtotal = Money::from_yen(subtotal_yen);
        let gross = pricing::tax_inclusive_total(subtotal, rate);

        // integer-math floor cross-checked against the definition
        let expected = (subtotal_yen as i128 * (10_000 + rate.bps() as i128)) / 10_000;
        prop_assert_eq!(gross.yen() as i128, expected);
        prop_assert!(gross >= subtotal);
    }

    /// Scanning the same code n times yields one line with quantity
    /// min(n, 99); every rejected attempt leaves the quantity at 99.
    #[test]
    fn repeat_scans_saturate_at_limit(n in 1usize..=120) {
        let mut cart = Cart::new();
        let p = product(0, 100);
        cart.apply_resolution("C0", &p, None).unwrap();

        for _ in 1..n {
            match cart.begin_scan("C0") {
                Ok(_) => {}
                Err(CoreError::QuantityLimit { .. }) => {
                    prop_assert_eq!(cart.line("P0").unwrap().quantity, 99);
                }
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }

        prop_assert_eq!(cart.line_count(), 1);
        prop_assert_eq!(cart.line("P0").unwrap().quantity, (n as i64).min(99));
    }

    /// A promotional discount always prices off unit_price - discount, and
    /// editing one line never disturbs another.
    #[test]
    fn discount_applies_per_line_independently(
        price_a in arb_price(),
        price_b in arb_discountable_price(),
        discount_b in arb_discount(),
        qty_a in 1i64..=99,
        qty_b in 1i64..=99,
    ) {
        let mut cart = Cart::new();
        let a = product(0, price_a);
        let b = product(1, price_b);
        cart.apply_resolution("C0", &a, None).unwrap();
        cart.set_quantity("P0", qty_a);
        cart.apply_resolution("C1", &b, promotion(discount_b)).unwrap();
        cart.set_quantity("P1", qty_b);

        let line_a = cart.line("P0").unwrap();
        let line_b = cart.line("P1").unwrap();
        prop_assert_eq!(pricing::line_total(line_a).yen(), price_a * qty_a);
        prop_assert_eq!(
            pricing::line_total(line_b).yen(),
            (price_b - discount_b) * qty_b
        );
    }

    /// set_quantity never stores a value outside [0, 99].
    #[test]
    fn set_quantity_never_escapes_bounds(qty in -1000i64..=1000) {
        let mut cart = Cart::new();
        let p = product(0, 100);
        cart.apply_resolution("C0", &p, None).unwrap();
        cart.set_quantity("P0", qty);

        let stored = cart.line("P0").unwrap().quantity;
        prop_assert!((0..=99).contains(&stored));
        prop_assert_eq!(stored, qty.clamp(0, 99));
    }

    /// Applying resolutions for distinct products never merges them.
    #[test]
    fn distinct_products_stay_distinct(count in 1usize..=10) {
        let mut cart = Cart::new();
        for idx in 0..count {
            let p = product(idx, 100 + idx as i64);
            let outcome = cart.apply_resolution(&p.code.clone(), &p, None).unwrap();
            let line_added = matches!(outcome, ScanOutcome::LineAdded { .. });
            prop_assert!(line_added);
        }
        prop_assert_eq!(cart.line_count(), count);
    }
}
