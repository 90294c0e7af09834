//! # QIWI Configuration
//!
//! Configuration management for the QIWI bills client.
//! The secret key comes from the environment or a TOML file.

use bill_core::{BillingError, BillingResult};
use serde::Deserialize;
use std::env;
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://api.qiwi.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    concat!("qiwi-bill-rs/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// QIWI API configuration
#[derive(Clone, Deserialize)]
pub struct QiwiConfig {
    /// Merchant secret key, sent as a Bearer token and used to sign notifications
    pub api_key: String,

    /// API base URL (for testing/mocking)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Transport timeout for a single request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl QiwiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `QIWI_KEY`
    ///
    /// Optional:
    /// - `QIWI_BASE_URL`
    /// - `QIWI_USER_AGENT`
    /// - `QIWI_TIMEOUT_SECS`
    pub fn from_env() -> BillingResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> BillingResult<Self> {
        let api_key = lookup("QIWI_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| BillingError::Configuration("QIWI_KEY not set".to_string()))?;

        let mut config = Self::new(api_key);

        if let Some(url) = lookup("QIWI_BASE_URL") {
            config.base_url = url;
        }
        if let Some(agent) = lookup("QIWI_USER_AGENT") {
            config.user_agent = agent;
        }
        if let Some(secs) = lookup("QIWI_TIMEOUT_SECS") {
            config.timeout_secs = secs.parse().map_err(|_| {
                BillingError::Configuration(format!("QIWI_TIMEOUT_SECS is not a number: {}", secs))
            })?;
        }

        Ok(config)
    }

    /// Parse configuration from a TOML document
    pub fn from_toml_str(toml_str: &str) -> BillingResult<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| BillingError::Configuration(format!("invalid config: {}", e)))?;

        if config.api_key.trim().is_empty() {
            return Err(BillingError::Configuration("api_key is empty".to_string()));
        }

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> BillingResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BillingError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Create config with an explicit key and defaults
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder: set User-Agent
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Builder: set transport timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl std::fmt::Debug for QiwiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QiwiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
