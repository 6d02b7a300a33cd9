//! # Tax Context
//!
//! The session's tax snapshot. The original held the rate as ambient shared
//! state behind a context provider; here it is a value owned by the session,
//! fetched once at session start through a single refresh operation and
//! passed into pricing and checkout as a parameter.

use tracing::info;

use lane_catalog::{CatalogClient, CatalogResult};
use lane_core::{Tax, TaxRate};

/// Session-owned tax snapshot.
///
/// Starts empty; [`TaxContext::refresh`] fills it from `GET /tax`. Read-only
/// to every other component once set. Subtotals work without a snapshot;
/// checkout refuses to run without one.
#[derive(Debug, Clone, Default)]
pub struct TaxContext {
    tax: Option<Tax>,
}

impl TaxContext {
    /// Creates an empty context (no rate fetched yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches the tax master and replaces the snapshot.
    ///
    /// The one well-defined refresh operation; the session calls it once at
    /// start. Calling it again re-snapshots (e.g. after a failed first
    /// attempt); it never partially updates.
    pub async fn refresh(&mut self, client: &CatalogClient) -> CatalogResult<&Tax> {
        let tax = client.fetch_tax().await?;
        info!(code = %tax.code, percent = tax.rate.percent(), "tax snapshot refreshed");
        Ok(self.tax.insert(tax))
    }

    /// The snapshot, if fetched.
    pub fn tax(&self) -> Option<&Tax> {
        self.tax.as_ref()
    }

    /// The rate, if fetched.
    pub fn rate(&self) -> Option<TaxRate> {
        self.tax.as_ref().map(|t| t.rate)
    }

    /// Whether the snapshot is available.
    pub fn is_available(&self) -> bool {
        self.tax.is_some()
    }
}
