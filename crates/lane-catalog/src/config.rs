//! # Catalog Configuration
//!
//! Configuration for the service endpoint and the register's identity.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                           │
//! │                                                                     │
//! │  1. Environment Variables (highest priority)                        │
//! │     LANE_API_ENDPOINT=http://pricing.internal:8000                  │
//! │     LANE_EMP_CD=0000000001                                          │
//! │                                                                     │
//! │  2. Default Values                                                  │
//! │     local service endpoint, demo register identity                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CatalogError, CatalogResult};

// =============================================================================
// Register Identity
// =============================================================================

/// Fixed session identifiers stamped onto every checkout submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterIdentity {
    /// Operator (employee) code.
    #[serde(default = "default_emp_cd")]
    pub emp_cd: String,

    /// Store code.
    #[serde(default = "default_store_cd")]
    pub store_cd: String,

    /// Register (POS) number within the store.
    #[serde(default = "default_pos_no")]
    pub pos_no: String,
}

fn default_emp_cd() -> String {
    "9999999999".to_string()
}

fn default_store_cd() -> String {
    "30".to_string()
}

fn default_pos_no() -> String {
    "90".to_string()
}

impl Default for RegisterIdentity {
    fn default() -> Self {
        RegisterIdentity {
            emp_cd: default_emp_cd(),
            store_cd: default_store_cd(),
            pos_no: default_pos_no(),
        }
    }
}

// =============================================================================
// Catalog Configuration
// =============================================================================

/// Complete client configuration: endpoint plus register identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the Catalog & Pricing Service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// This register's identity.
    #[serde(default)]
    pub register: RegisterIdentity,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            register: RegisterIdentity::default(),
        }
    }
}

impl CatalogConfig {
    /// Loads configuration from defaults plus environment overrides.
    pub fn load() -> CatalogResult<Self> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("LANE_API_ENDPOINT") {
            debug!(url = %url, "Overriding service endpoint from environment");
            self.base_url = url;
        }
        if let Ok(secs) = std::env::var("LANE_TIMEOUT_SECS") {
            if let Ok(parsed) = secs.parse::<u64>() {
                self.timeout_secs = parsed;
            }
        }
        if let Ok(emp) = std::env::var("LANE_EMP_CD") {
            self.register.emp_cd = emp;
        }
        if let Ok(store) = std::env::var("LANE_STORE_CD") {
            self.register.store_cd = store;
        }
        if let Ok(pos) = std::env::var("LANE_POS_NO") {
            self.register.pos_no = pos;
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.base_url.is_empty() {
            return Err(CatalogError::InvalidConfig(
                "service endpoint must not be empty".into(),
            ));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(CatalogError::InvalidConfig(format!(
                "service endpoint must start with http:// or https://, got: {}",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(CatalogError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// The base URL without a trailing slash.
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
