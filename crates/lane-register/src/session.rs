//! # Register Session
//!
//! One checkout lane's state and event loop.
//!
//! ## Single-Actor Discipline
//! Every mutation goes through `&mut RegisterSession`, so no two operations
//! can interleave their reads and writes of the cart. The spawned actor loop
//! extends that guarantee across tasks: commands queue on an mpsc channel
//! (FIFO) and each one is processed to completion, lookup awaited, before
//! the next is picked up. Consequences:
//!
//! - at most one scan-triggered lookup is in flight per session, ever
//! - mutations apply in the order their commands were accepted, not the
//!   order network responses happen to arrive
//! - a response can never race a newer scan: the newer scan has not been
//!   dispatched yet while the older lookup is pending

use tracing::{debug, info};

use lane_catalog::{CatalogClient, CatalogConfig, RegisterIdentity};
use lane_core::validation::validate_code;
use lane_core::{
    Cart, CartLine, CoreError, Money, ScanOutcome, ScanPhase, SetQuantityOutcome, Tax,
};
use serde::Serialize;
use tokio::sync::{mpsc, oneshot};

use crate::checkout::{self, CheckoutReceipt};
use crate::error::{RegisterError, RegisterResult};
use crate::input::ScanInput;
use crate::tax::TaxContext;

// =============================================================================
// Scan Report
// =============================================================================

/// User-visible outcome of a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanReport {
    /// Empty input; nothing happened.
    Ignored,

    /// A new line was rung up.
    Added { name: String },

    /// An existing line's quantity went up by one.
    Incremented { name: String, quantity: i64 },
}

impl From<ScanOutcome> for ScanReport {
    fn from(outcome: ScanOutcome) -> Self {
        match outcome {
            ScanOutcome::LineAdded { name } => ScanReport::Added { name },
            ScanOutcome::QuantityIncremented { name, quantity } => {
                ScanReport::Incremented { name, quantity }
            }
        }
    }
}

// =============================================================================
// Cart View
// =============================================================================

/// Snapshot of the cart for presentation: lines plus totals, re-derived on
/// every capture so no stale figure survives a mutation.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal: Money,
    /// Tax-inclusive total; `None` until the tax snapshot is fetched.
    pub total_with_tax: Option<Money>,
}

impl CartView {
    fn capture(cart: &Cart, tax: &TaxContext) -> Self {
        CartView {
            lines: cart.lines().to_vec(),
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            subtotal: cart.subtotal(),
            total_with_tax: tax.rate().map(|rate| cart.total_with_tax(rate)),
        }
    }
}

// =============================================================================
// Register Session
// =============================================================================

/// One lane's session: the cart, the tax snapshot, the entry field, and the
/// catalog client. The only writer of cart state in the process.
#[derive(Debug)]
pub struct RegisterSession {
    cart: Cart,
    tax: TaxContext,
    entry_code: String,
    client: CatalogClient,
    identity: RegisterIdentity,
}

impl RegisterSession {
    /// Builds a session from configuration (constructs the catalog client).
    pub fn new(config: &CatalogConfig) -> RegisterResult<Self> {
        let client = CatalogClient::new(config)?;
        Ok(Self::with_client(client, config.register.clone()))
    }

    /// Builds a session around an existing client.
    pub fn with_client(client: CatalogClient, identity: RegisterIdentity) -> Self {
        RegisterSession {
            cart: Cart::new(),
            tax: TaxContext::new(),
            entry_code: String::new(),
            client,
            identity,
        }
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// The cart (read-only; mutations go through session operations).
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The session tax context.
    pub fn tax(&self) -> &TaxContext {
        &self.tax
    }

    /// The entry field's current text.
    pub fn entry_code(&self) -> &str {
        &self.entry_code
    }

    /// Captures a presentation snapshot with fresh totals.
    pub fn view(&self) -> CartView {
        CartView::capture(&self.cart, &self.tax)
    }

    // =========================================================================
    // Session Start
    // =========================================================================

    /// Fetches the session tax snapshot. Called once at session start.
    pub async fn refresh_tax(&mut self) -> RegisterResult<Tax> {
        let tax = self.tax.refresh(&self.client).await?;
        Ok(tax.clone())
    }

    // =========================================================================
    // Scan Path
    // =========================================================================

    /// Updates the entry field (operator typing).
    pub fn type_code(&mut self, code: impl Into<String>) {
        self.entry_code = code.into();
    }

    /// Processes one lookup trigger.
    ///
    /// ## Behavior
    /// - resolves the code from the input variant (scanner text also lands
    ///   in the entry field, as if it had been typed)
    /// - empty code: no-op
    /// - repeat of the active code: local increment, no lookup
    /// - otherwise: one `/prd_ex` lookup, then merge-or-insert by product_id
    /// - on any error the cart and the active selection are unchanged
    pub async fn scan(&mut self, input: ScanInput) -> RegisterResult<ScanReport> {
        if let ScanInput::ScannedCode(code) = &input {
            self.entry_code = code.clone();
        }
        let code = input.code(&self.entry_code).trim().to_string();
        debug!(code = %code, "scan");

        match self.cart.begin_scan(&code)? {
            ScanPhase::Ignored => Ok(ScanReport::Ignored),
            ScanPhase::Repeated(outcome) => {
                info!(code = %code, "repeat scan incremented line");
                Ok(outcome.into())
            }
            ScanPhase::NeedsLookup => {
                let code = validate_code(&code).map_err(CoreError::from)?;
                let resolved = self.client.fetch_product_ex(&code).await?;
                let outcome =
                    self.cart
                        .apply_resolution(&code, &resolved.product, resolved.promotion)?;
                info!(
                    code = %code,
                    product_id = %resolved.product.product_id,
                    "scan resolved"
                );
                self.entry_code = code;
                Ok(outcome.into())
            }
        }
    }

    // =========================================================================
    // Edit Operations
    // =========================================================================

    /// Sets the selected line's quantity (clamped into [0, 99]).
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> SetQuantityOutcome {
        debug!(product_id = %product_id, quantity, "set quantity");
        self.cart.set_quantity(product_id, quantity)
    }

    /// Removes a line; clears the entry field when something was removed.
    /// Idempotent: removing an absent product is a quiet no-op.
    pub fn remove_line(&mut self, product_id: &str) -> bool {
        debug!(product_id = %product_id, "remove line");
        let removed = self.cart.remove_line(product_id).is_some();
        if removed {
            self.entry_code.clear();
        }
        removed
    }

    /// Moves the selection to an existing line and loads its code into the
    /// entry field (the "load line back into the entry area" action).
    pub fn select_line(&mut self, product_id: &str) -> Option<CartLine> {
        let line = self.cart.select_line(product_id)?.clone();
        self.entry_code = line.code.clone();
        Some(line)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Assembles and submits the checkout; clears the lane on confirmation.
    pub async fn checkout(&mut self) -> RegisterResult<CheckoutReceipt> {
        let receipt =
            checkout::submit(&mut self.cart, &self.tax, &self.identity, &self.client).await?;
        // lane reset happens with the cart clear; the entry field follows
        self.entry_code.clear();
        Ok(receipt)
    }

    // =========================================================================
    // Actor Loop
    // =========================================================================

    /// Moves the session into a spawned actor task and returns its handle.
    ///
    /// The channel is the FIFO that serializes lookups: one command is
    /// processed to completion before the next is dispatched.
    pub fn spawn(mut self) -> RegisterHandle {
        let (tx, mut rx) = mpsc::channel::<Command>(32);

        tokio::spawn(async move {
            info!("register session started");
            while let Some(command) = rx.recv().await {
                match command {
                    Command::TypeCode { code } => self.type_code(code),
                    Command::Scan { input, reply } => {
                        let _ = reply.send(self.scan(input).await);
                    }
                    Command::SetQuantity {
                        product_id,
                        quantity,
                        reply,
                    } => {
                        let _ = reply.send(self.set_quantity(&product_id, quantity));
                    }
                    Command::RemoveLine { product_id, reply } => {
                        let _ = reply.send(self.remove_line(&product_id));
                    }
                    Command::SelectLine { product_id, reply } => {
                        let _ = reply.send(self.select_line(&product_id));
                    }
                    Command::View { reply } => {
                        let _ = reply.send(self.view());
                    }
                    Command::RefreshTax { reply } => {
                        let _ = reply.send(self.refresh_tax().await);
                    }
                    Command::Checkout { reply } => {
                        let _ = reply.send(self.checkout().await);
                    }
                }
            }
            info!("register session closed");
        });

        RegisterHandle { tx }
    }
}

// =============================================================================
// Commands & Handle
// =============================================================================

enum Command {
    TypeCode {
        code: String,
    },
    Scan {
        input: ScanInput,
        reply: oneshot::Sender<RegisterResult<ScanReport>>,
    },
    SetQuantity {
        product_id: String,
        quantity: i64,
        reply: oneshot::Sender<SetQuantityOutcome>,
    },
    RemoveLine {
        product_id: String,
        reply: oneshot::Sender<bool>,
    },
    SelectLine {
        product_id: String,
        reply: oneshot::Sender<Option<CartLine>>,
    },
    View {
        reply: oneshot::Sender<CartView>,
    },
    RefreshTax {
        reply: oneshot::Sender<RegisterResult<Tax>>,
    },
    Checkout {
        reply: oneshot::Sender<RegisterResult<CheckoutReceipt>>,
    },
}

/// Cloneable handle to a spawned session actor.
///
/// All methods enqueue a command and await its reply; the queue order is the
/// order operations take effect.
#[derive(Clone)]
pub struct RegisterHandle {
    tx: mpsc::Sender<Command>,
}

impl RegisterHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> RegisterResult<T> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(build(reply))
            .await
            .map_err(|_| RegisterError::SessionClosed)?;
        rx.await.map_err(|_| RegisterError::SessionClosed)
    }

    /// Updates the entry field.
    pub async fn type_code(&self, code: impl Into<String>) -> RegisterResult<()> {
        self.tx
            .send(Command::TypeCode { code: code.into() })
            .await
            .map_err(|_| RegisterError::SessionClosed)
    }

    /// Processes a lookup trigger.
    pub async fn scan(&self, input: ScanInput) -> RegisterResult<ScanReport> {
        self.request(|reply| Command::Scan { input, reply }).await?
    }

    /// Sets the selected line's quantity.
    pub async fn set_quantity(
        &self,
        product_id: impl Into<String>,
        quantity: i64,
    ) -> RegisterResult<SetQuantityOutcome> {
        self.request(|reply| Command::SetQuantity {
            product_id: product_id.into(),
            quantity,
            reply,
        })
        .await
    }

    /// Removes a line.
    pub async fn remove_line(&self, product_id: impl Into<String>) -> RegisterResult<bool> {
        self.request(|reply| Command::RemoveLine {
            product_id: product_id.into(),
            reply,
        })
        .await
    }

    /// Moves the selection to an existing line.
    pub async fn select_line(
        &self,
        product_id: impl Into<String>,
    ) -> RegisterResult<Option<CartLine>> {
        self.request(|reply| Command::SelectLine {
            product_id: product_id.into(),
            reply,
        })
        .await
    }

    /// Captures a presentation snapshot.
    pub async fn view(&self) -> RegisterResult<CartView> {
        self.request(|reply| Command::View { reply }).await
    }

    /// Fetches the session tax snapshot.
    pub async fn refresh_tax(&self) -> RegisterResult<Tax> {
        self.request(|reply| Command::RefreshTax { reply }).await?
    }

    /// Assembles and submits the checkout.
    pub async fn checkout(&self) -> RegisterResult<CheckoutReceipt> {
        self.request(|reply| Command::Checkout { reply }).await?
    }
}
