//! # Cart State
//!
//! The in-memory cart and the scan/merge state machine.
//!
//! ## The Active-Selection State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │              ActiveSelection transitions                            │
//! │                                                                     │
//! │                   scan resolves / select_line                       │
//! │   NoActiveLine ────────────────────────────────► ActiveLine(p, c)   │
//! │        ▲                                              │             │
//! │        │  remove_line(p) / clear()                    │             │
//! │        └──────────────────────────────────────────────┘             │
//! │                                                                     │
//! │   ActiveLine(p, c) ──scan same c──► quantity +1, no remote lookup   │
//! │   ActiveLine(p, c) ──scan other──► lookup, then merge-or-insert     │
//! │                                                                     │
//! │   The merge decision is keyed on product_id, never on the raw       │
//! │   code: two code forms (with/without check digit) may resolve to    │
//! │   the same product.                                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product_id`
//! - Quantity is an integer in [0, 99]; increments past 99 are rejected
//! - An `ActiveLine` selection always references a line present in the cart
//! - Every mutating operation is all-or-nothing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing;
use crate::types::{Product, Promotion, TaxRate};
use crate::validation::clamp_quantity;
use crate::MAX_LINE_QUANTITY;

// =============================================================================
// Active Selection
// =============================================================================

/// Which cart line, if any, the register is currently "on".
///
/// The original terminal tracked this as a bare mutable last-code string;
/// here it is an explicit two-state machine so the merge/insert decision can
/// be tested in isolation. The selection targets quantity edits and decides
/// whether a rescan takes the no-lookup repeat path.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ActiveSelection {
    /// Nothing selected: the next scan always resolves remotely.
    #[default]
    NoActiveLine,

    /// One line is active; `code` is the code whose resolution last touched
    /// it (a rescan of exactly this code increments without a lookup).
    ActiveLine { product_id: String, code: String },
}

impl ActiveSelection {
    /// Whether the selection points at the given line.
    pub fn targets(&self, product_id: &str) -> bool {
        matches!(self, ActiveSelection::ActiveLine { product_id: p, .. } if p == product_id)
    }

    /// Whether a scan of `code` is a repeat of the active line's code.
    pub fn is_repeat_of(&self, code: &str) -> bool {
        matches!(self, ActiveSelection::ActiveLine { code: c, .. } if c == code)
    }

    /// The selected product_id, if any.
    pub fn product_id(&self) -> Option<&str> {
        match self {
            ActiveSelection::NoActiveLine => None,
            ActiveSelection::ActiveLine { product_id, .. } => Some(product_id),
        }
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One product's entry in the cart.
///
/// ## Design Notes
/// - `product_id` is the dedupe key
/// - product data is a frozen snapshot from the resolving lookup; a catalog
///   change after ring-up never reprices the line
/// - effective price and line total are computed on every read, never stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Catalog identifier (dedupe key).
    pub product_id: String,

    /// Code that first resolved this line.
    pub code: String,

    /// Product name at ring-up (frozen).
    pub name: String,

    /// Units of this product, always in [0, 99].
    pub quantity: i64,

    /// Unit price at ring-up (frozen).
    pub unit_price: Money,

    /// Promotion attached by the extended lookup, if any.
    pub promotion: Option<Promotion>,

    /// When this line was first rung up.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a line from a resolved product, starting at quantity 1.
    pub fn from_product(product: &Product, code: &str, promotion: Option<Promotion>) -> Self {
        CartLine {
            product_id: product.product_id.clone(),
            code: code.to_string(),
            name: product.name.clone(),
            quantity: 1,
            unit_price: product.unit_price,
            promotion,
            added_at: Utc::now(),
        }
    }

    /// Unit price after promotional discount.
    pub fn effective_unit_price(&self) -> Money {
        pricing::effective_unit_price(self)
    }

    /// Effective unit price × quantity.
    pub fn line_total(&self) -> Money {
        pricing::line_total(self)
    }
}

// =============================================================================
// Operation Outcomes
// =============================================================================

/// Pure merge/insert decision for a scanned code, given the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanDecision {
    /// Empty input: ignore entirely.
    Ignore,

    /// Same code as the active line: increment locally, no remote lookup.
    RepeatActive,

    /// Anything else: resolve remotely, then merge or insert by product_id.
    Lookup,
}

/// What a scan did to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A new line was inserted with quantity 1.
    LineAdded { name: String },

    /// An existing line's quantity went up by one.
    QuantityIncremented { name: String, quantity: i64 },
}

/// First, local phase of a scan (before any remote lookup).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanPhase {
    /// Empty input; nothing happened.
    Ignored,

    /// Repeat of the active code; the increment already happened.
    Repeated(ScanOutcome),

    /// The caller must resolve the code and then call `apply_resolution`.
    NeedsLookup,
}

/// Result of a quantity edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetQuantityOutcome {
    /// The line's quantity is now the (clamped) value.
    Applied { quantity: i64 },

    /// Select-then-edit discipline not met: the product has no line or the
    /// active selection points elsewhere. Nothing changed.
    NotSelected,
}

// =============================================================================
// Cart
// =============================================================================

/// The register's cart: ordered lines, unique by product_id, plus the
/// active selection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
    selection: ActiveSelection,
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            selection: ActiveSelection::NoActiveLine,
            created_at: Utc::now(),
        }
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// The lines, in ring-up order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up a line by product_id.
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// The current active selection.
    pub fn selection(&self) -> &ActiveSelection {
        &self.selection
    }

    /// When this cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals (tax-exclusive).
    pub fn subtotal(&self) -> Money {
        pricing::subtotal(self)
    }

    /// Tax-inclusive total, floored once at this step.
    pub fn total_with_tax(&self, rate: TaxRate) -> Money {
        pricing::tax_inclusive_total(self.subtotal(), rate)
    }

    // =========================================================================
    // Scan Path
    // =========================================================================

    /// Pure merge/insert decision for `code` against the current state.
    ///
    /// Exposed separately from [`Cart::begin_scan`] so the decision itself is
    /// testable without mutating anything.
    pub fn scan_decision(&self, code: &str) -> ScanDecision {
        if code.trim().is_empty() {
            ScanDecision::Ignore
        } else if self.selection.is_repeat_of(code) {
            ScanDecision::RepeatActive
        } else {
            ScanDecision::Lookup
        }
    }

    /// Runs the local phase of a scan.
    ///
    /// ## Behavior
    /// - empty code: `Ignored`, no mutation
    /// - repeat of the active code: increments that line in place (no remote
    ///   lookup) and returns `Repeated`; at the 99 limit returns
    ///   `CoreError::QuantityLimit` with no mutation
    /// - any other code: `NeedsLookup`; resolve it, then call
    ///   [`Cart::apply_resolution`]
    pub fn begin_scan(&mut self, code: &str) -> CoreResult<ScanPhase> {
        match self.scan_decision(code) {
            ScanDecision::Ignore => Ok(ScanPhase::Ignored),
            ScanDecision::Lookup => Ok(ScanPhase::NeedsLookup),
            ScanDecision::RepeatActive => {
                // scan_decision only returns RepeatActive for an ActiveLine
                // selection, and a selection always references a live line.
                let Some(product_id) = self.selection.product_id().map(String::from) else {
                    return Ok(ScanPhase::NeedsLookup);
                };
                let outcome = self.increment_line(&product_id)?;
                Ok(ScanPhase::Repeated(outcome))
            }
        }
    }

    /// Applies a successful remote resolution to the cart.
    ///
    /// ## Behavior
    /// - a line with the resolved product_id exists: quantity +1 (limit
    ///   checked), and the selection moves to that line under the *new* code
    /// - otherwise: a new line is inserted with quantity 1
    /// - on `QuantityLimit` the cart and the selection are left untouched
    pub fn apply_resolution(
        &mut self,
        code: &str,
        product: &Product,
        promotion: Option<Promotion>,
    ) -> CoreResult<ScanOutcome> {
        let outcome = if self.line(&product.product_id).is_some() {
            self.increment_line(&product.product_id)?
        } else {
            self.lines
                .push(CartLine::from_product(product, code, promotion));
            ScanOutcome::LineAdded {
                name: product.name.clone(),
            }
        };

        self.selection = ActiveSelection::ActiveLine {
            product_id: product.product_id.clone(),
            code: code.to_string(),
        };
        Ok(outcome)
    }

    /// Increments a line's quantity by one, rejecting past the limit.
    ///
    /// Callers guarantee the line exists (apply_resolution checks first, and
    /// an ActiveLine selection always references a live line).
    fn increment_line(&mut self, product_id: &str) -> CoreResult<ScanOutcome> {
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) if line.quantity >= MAX_LINE_QUANTITY => Err(CoreError::quantity_limit()),
            Some(line) => {
                line.quantity += 1;
                Ok(ScanOutcome::QuantityIncremented {
                    name: line.name.clone(),
                    quantity: line.quantity,
                })
            }
            None => Err(CoreError::quantity_limit()),
        }
    }

    // =========================================================================
    // Edit Operations
    // =========================================================================

    /// Sets a line's quantity under the select-then-edit discipline.
    ///
    /// ## Behavior
    /// - requires a line for `product_id` *and* the active selection pointing
    ///   at it; otherwise `NotSelected` and nothing changes
    /// - the value is clamped into [0, 99]; 0 keeps the line with an empty
    ///   count (it is a valid clamp target, not a removal)
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> SetQuantityOutcome {
        if !self.selection.targets(product_id) {
            return SetQuantityOutcome::NotSelected;
        }
        let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) else {
            return SetQuantityOutcome::NotSelected;
        };

        line.quantity = clamp_quantity(quantity);
        SetQuantityOutcome::Applied {
            quantity: line.quantity,
        }
    }

    /// Removes a line if present; idempotent.
    ///
    /// Clears the active selection when it referenced the removed line.
    pub fn remove_line(&mut self, product_id: &str) -> Option<CartLine> {
        let idx = self.lines.iter().position(|l| l.product_id == product_id)?;
        let removed = self.lines.remove(idx);
        if self.selection.targets(product_id) {
            self.selection = ActiveSelection::NoActiveLine;
        }
        Some(removed)
    }

    /// Moves the active selection to an existing line.
    ///
    /// Models the terminal's "load this line back into the entry area"
    /// action: afterwards a rescan of the line's code takes the repeat path
    /// and quantity edits target it.
    pub fn select_line(&mut self, product_id: &str) -> Option<&CartLine> {
        let idx = self.lines.iter().position(|l| l.product_id == product_id)?;
        self.selection = ActiveSelection::ActiveLine {
            product_id: self.lines[idx].product_id.clone(),
            code: self.lines[idx].code.clone(),
        };
        Some(&self.lines[idx])
    }

    /// Empties the cart and resets the selection.
    ///
    /// Called only by the checkout path after the service confirmed the
    /// submission; never speculatively.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.selection = ActiveSelection::NoActiveLine;
        self.created_at = Utc::now();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
