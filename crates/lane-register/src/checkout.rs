//! # Checkout Assembly
//!
//! Builds the checkout submission from the cart and the tax snapshot,
//! submits it, and clears the cart only after the service confirms.
//!
//! ## Atomicity
//! ```text
//! assemble ──► submit ──► 2xx? ──► clear cart, return receipt
//!                          │
//!                          └─ no ──► cart untouched, error surfaces
//! ```
//! The clear is tied to the success response: it never runs speculatively,
//! and a failed submission leaves the cart, quantities, and totals exactly
//! as they were.
//!
//! ## Numeric Normalization
//! Every amount in the payload comes straight off `Money` (integer yen), so
//! the values hitting the wire are plain numbers by construction. Display
//! formatting exists only past this boundary and is never parsed back.

use tracing::{info, warn};

use lane_catalog::{CatalogClient, CheckoutLine, CheckoutRequest, RegisterIdentity};
use lane_core::{Cart, Money, Tax};

use crate::error::{RegisterError, RegisterResult};
use crate::tax::TaxContext;

// =============================================================================
// Receipt
// =============================================================================

/// The service's confirmed totals, as shown to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutReceipt {
    /// Tax-inclusive total, floored to whole yen.
    pub total_amount: Money,

    /// Tax-exclusive total.
    pub total_amount_ex_tax: Money,
}

// =============================================================================
// Assembly
// =============================================================================

/// Builds the submission payload from the cart state.
///
/// ## Behavior
/// - an empty cart is a validation failure; no payload is built
/// - per line: the *effective* unit price (plan price when a discount
///   applies) and the line total, both numeric
/// - the tax code and percent are snapshotted at assembly time
pub fn assemble(
    cart: &Cart,
    tax: &Tax,
    identity: &RegisterIdentity,
) -> RegisterResult<CheckoutRequest> {
    if cart.is_empty() {
        return Err(RegisterError::EmptyCart);
    }

    let lines = cart
        .lines()
        .iter()
        .map(|line| CheckoutLine {
            prd_id: line.product_id.clone(),
            code: line.code.clone(),
            name: line.name.clone(),
            price: line.effective_unit_price().yen(),
            quantity: line.quantity,
            total_price: line.line_total().yen(),
        })
        .collect();

    Ok(CheckoutRequest {
        cart: lines,
        emp_cd: identity.emp_cd.clone(),
        store_cd: identity.store_cd.clone(),
        pos_no: identity.pos_no.clone(),
        tax_code: tax.code.clone(),
        tax_percent: tax.rate.percent(),
    })
}

// =============================================================================
// Submission
// =============================================================================

/// Assembles, submits, and on confirmed success clears the cart.
///
/// ## Preconditions
/// - non-empty cart (checked before any remote call)
/// - fetched tax snapshot (the payload carries its code and percent)
pub async fn submit(
    cart: &mut Cart,
    tax_context: &TaxContext,
    identity: &RegisterIdentity,
    client: &CatalogClient,
) -> RegisterResult<CheckoutReceipt> {
    if cart.is_empty() {
        return Err(RegisterError::EmptyCart);
    }
    let tax = tax_context.tax().ok_or(RegisterError::TaxUnavailable)?;

    let request = assemble(cart, tax, identity)?;
    let response = match client.submit_checkout(&request).await {
        Ok(response) => response,
        Err(err) => {
            warn!(error = %err, "checkout failed; cart left unchanged");
            return Err(err.into());
        }
    };

    // Confirmed: reset the lane for the next customer. This is the only
    // place the cart is cleared.
    cart.clear();

    let receipt = CheckoutReceipt {
        total_amount: Money::from_yen(response.total_amount.floor() as i64),
        total_amount_ex_tax: Money::from_yen(response.total_amount_ex_tax.floor() as i64),
    };
    info!(
        total = %receipt.total_amount,
        ex_tax = %receipt.total_amount_ex_tax,
        "checkout confirmed"
    );
    Ok(receipt)
}

// =============================================================================
// Unit Tests
// =============================================================================
