//! # Catalog Client
//!
//! The HTTP client for the Catalog & Pricing Service.
//!
//! ## Behavior Contract
//! - lookups have no side effects beyond the remote query
//! - 404 on the product endpoints maps to `NotFound`; any other non-success
//!   maps to `Backend` with the service's `detail` message when parseable
//! - one `reqwest::Client` is built at startup with the configured timeout
//!   and reused for every request

use std::time::Duration;

use tracing::{debug, warn};

use lane_core::{Product, Promotion, Tax};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::wire::{
    CheckoutRequest, CheckoutResponse, ErrorPayload, ProductExPayload, ProductPayload, TaxPayload,
};

// =============================================================================
// Resolved Product
// =============================================================================

/// A successful extended lookup: the product and whatever promotion plan the
/// catalog attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProduct {
    pub product: Product,
    pub promotion: Option<Promotion>,
}

// =============================================================================
// Catalog Client
// =============================================================================

/// Client for the Catalog & Pricing Service.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Builds a client from the configuration.
    ///
    /// Validates the endpoint and constructs the single shared HTTP client
    /// with the configured per-request timeout.
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(CatalogClient {
            http,
            base_url: config.normalized_base_url().to_string(),
        })
    }

    // =========================================================================
    // Product Lookups
    // =========================================================================

    /// Basic lookup: `GET /prd/{code}`.
    pub async fn fetch_product(&self, code: &str) -> CatalogResult<Product> {
        debug!(code = %code, "fetching product");
        let url = format!("{}/prd/{}", self.base_url, code);
        let response = self.http.get(&url).send().await?;

        let payload: ProductPayload = Self::decode_product_response(code, response).await?;
        Ok(payload.into_product(code))
    }

    /// Extended lookup: `GET /prd_ex/{code}`, product plus optional plan.
    pub async fn fetch_product_ex(&self, code: &str) -> CatalogResult<ResolvedProduct> {
        debug!(code = %code, "fetching product with promotion");
        let url = format!("{}/prd_ex/{}", self.base_url, code);
        let response = self.http.get(&url).send().await?;

        let payload: ProductExPayload = Self::decode_product_response(code, response).await?;
        let (product, promotion) = payload.into_parts(code);
        Ok(ResolvedProduct { product, promotion })
    }

    /// Decodes a product-endpoint response, applying the 404 → NotFound rule.
    async fn decode_product_response<T>(
        code: &str,
        response: reqwest::Response,
    ) -> CatalogResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            debug!(code = %code, "product not registered");
            return Err(CatalogError::NotFound {
                code: code.to_string(),
            });
        }
        if !status.is_success() {
            let detail = Self::read_error_detail(response).await;
            warn!(code = %code, status = status.as_u16(), detail = %detail, "product lookup failed");
            return Err(CatalogError::Backend {
                status: status.as_u16(),
                detail,
            });
        }

        Self::decode_body(response).await
    }

    // =========================================================================
    // Tax Master
    // =========================================================================

    /// Fetches the session tax master: `GET /tax`.
    ///
    /// 404 here is a backend error, not a "not registered" case; only the
    /// product endpoints carry that meaning.
    pub async fn fetch_tax(&self) -> CatalogResult<Tax> {
        debug!("fetching tax master");
        let url = format!("{}/tax", self.base_url);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = Self::read_error_detail(response).await;
            warn!(status = status.as_u16(), detail = %detail, "tax fetch failed");
            return Err(CatalogError::Backend {
                status: status.as_u16(),
                detail,
            });
        }

        let payload: TaxPayload = Self::decode_body(response).await?;
        Ok(payload.into())
    }

    // =========================================================================
    // Checkout Submission
    // =========================================================================

    /// Submits a checkout: `POST /checkout`.
    ///
    /// Returns the service's confirmed totals. The caller decides what to do
    /// with the cart; this method never touches register state.
    pub async fn submit_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> CatalogResult<CheckoutResponse> {
        debug!(
            lines = request.cart.len(),
            emp_cd = %request.emp_cd,
            "submitting checkout"
        );
        let url = format!("{}/checkout", self.base_url);
        let response = self.http.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = Self::read_error_detail(response).await;
            warn!(status = status.as_u16(), detail = %detail, "checkout rejected");
            return Err(CatalogError::Backend {
                status: status.as_u16(),
                detail,
            });
        }

        Self::decode_body(response).await
    }

    // =========================================================================
    // Response Helpers
    // =========================================================================

    /// Decodes a success body, mapping decode failures to InvalidResponse.
    async fn decode_body<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> CatalogResult<T> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))
    }

    /// Extracts the service's `detail` message from an error body, falling
    /// back to the raw text or the bare status.
    async fn read_error_detail(response: reqwest::Response) -> String {
        let status = response.status();
        match response.bytes().await {
            Ok(bytes) => match serde_json::from_slice::<ErrorPayload>(&bytes) {
                Ok(payload) => payload.detail,
                Err(_) if !bytes.is_empty() => String::from_utf8_lossy(&bytes).into_owned(),
                Err(_) => status.to_string(),
            },
            Err(_) => status.to_string(),
        }
    }
}
