//! # lane-catalog: Catalog & Pricing Service Client
//!
//! HTTP client for the remote Catalog & Pricing Service. The service is an
//! external collaborator: this crate resolves scanned codes to products,
//! fetches the session tax master, and submits checkout payloads. It never
//! touches cart state.
//!
//! ## Endpoints
//! ```text
//! GET  /prd/{code}     → product, or 404 (not registered)
//! GET  /prd_ex/{code}  → product + optional promotion, or 404
//! GET  /tax            → tax master for the session
//! POST /checkout       → confirmed totals, or error body with `detail`
//! ```
//!
//! ## Status Mapping
//! - 404 on the product endpoints → [`CatalogError::NotFound`] (recoverable,
//!   shown inline)
//! - any other non-2xx → [`CatalogError::Backend`] (operation abandoned)
//! - transport failure → [`CatalogError::Network`] (same handling as Backend)

pub mod client;
pub mod config;
pub mod error;
pub mod wire;

pub use client::{CatalogClient, ResolvedProduct};
pub use config::{CatalogConfig, RegisterIdentity};
pub use error::{CatalogError, CatalogResult};
pub use wire::{CheckoutLine, CheckoutRequest, CheckoutResponse};
