//! # Billing Error Types
//!
//! Typed error handling for the QIWI bill client.
//! All bill operations return `Result<T, BillingError>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error payload returned by the QIWI API on any non-200 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Name of the vendor service that failed (e.g. "invoicing-api")
    #[serde(default)]
    pub service_name: String,

    /// Machine-readable error code (e.g. "api.invoice.not.found")
    pub error_code: String,

    /// Technical description
    #[serde(default)]
    pub description: String,

    /// Message suitable for the paying customer
    #[serde(default)]
    pub user_message: String,

    /// When the vendor produced the error
    #[serde(
        default,
        deserialize_with = "crate::timestamp::deserialize_opt_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_time: Option<DateTime<Utc>>,

    /// Vendor trace id, quote it in support requests
    #[serde(default)]
    pub trace_id: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "qiwi API error: service={} code={} description={} user_message={} trace_id={}",
            self.service_name, self.error_code, self.description, self.user_message, self.trace_id
        )?;
        if let Some(date_time) = self.date_time {
            write!(f, " date_time={}", date_time.to_rfc3339())?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Core error type for all bill operations
#[derive(Debug, Error)]
pub enum BillingError {
    /// Amount is zero or negative
    #[error("amount: cannot be negative or null ({0})")]
    InvalidAmount(i64),

    /// Currency other than RUB or KZT
    #[error("incorrect currency value ({currency})")]
    UnsupportedCurrency { currency: String },

    /// Lifetime strategy configured with less than one hour
    #[error("lifetime cannot be less than one hour ({hours})")]
    InvalidLifetime { hours: i64 },

    /// Expiration timestamp is not in the future
    #[error("expiration date time cannot be in the past ({expiration})")]
    ExpirationInPast { expiration: DateTime<Utc> },

    /// Structured error returned by the vendor
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Non-200 response without a vendor error payload
    #[error("qiwi API http error: {status} {reason}")]
    HttpStatus { status: u16, reason: String },

    /// Transport failure talking to the vendor
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration errors (missing key, unreadable config file)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Notification signature did not match
    #[error("Notification verification failed: {0}")]
    NotificationVerificationFailed(String),
}

impl BillingError {
    /// Returns true for errors raised locally before any request was sent
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            BillingError::InvalidAmount(_)
                | BillingError::UnsupportedCurrency { .. }
                | BillingError::InvalidLifetime { .. }
                | BillingError::ExpirationInPast { .. }
        )
    }

    /// Returns true for errors reported by the remote API
    pub fn is_remote(&self) -> bool {
        matches!(self, BillingError::Api(_) | BillingError::HttpStatus { .. })
    }

    /// Vendor error code, if the API returned a structured error
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            BillingError::Api(err) => Some(err.error_code.as_str()),
            _ => None,
        }
    }
}

/// Result type alias for bill operations
pub type BillingResult<T> = Result<T, BillingError>;
