//! # lane-register: Register Session Layer
//!
//! The single actor that drives one checkout lane.
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Register Session                               │
//! │                                                                     │
//! │  Scanner / keyboard                                                 │
//! │        │  ScanInput                                                 │
//! │        ▼                                                            │
//! │  RegisterHandle ──mpsc (FIFO)──► session actor loop                 │
//! │                                       │                             │
//! │                         ┌─────────────┼──────────────┐              │
//! │                         ▼             ▼              ▼              │
//! │                   Cart (lane-core)  TaxContext  CatalogClient       │
//! │                                                                     │
//! │  One command is processed to completion (lookup awaited) before     │
//! │  the next is dispatched: no two in-flight lookups per session,      │
//! │  mutations apply in event-acceptance order.                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`session`] - `RegisterSession`, the actor loop, and `RegisterHandle`
//! - [`input`] - the `ScanInput` tagged variant (manual submit vs scanner)
//! - [`tax`] - session-owned tax snapshot with a single refresh operation
//! - [`checkout`] - payload assembly and atomic clear-on-success submission
//! - [`error`] - the operator-facing error taxonomy

pub mod checkout;
pub mod error;
pub mod input;
pub mod session;
pub mod tax;

pub use checkout::CheckoutReceipt;
pub use error::{ErrorCode, Presentation, RegisterError, RegisterResult};
pub use input::ScanInput;
pub use session::{CartView, RegisterHandle, RegisterSession, ScanReport};
pub use tax::TaxContext;
