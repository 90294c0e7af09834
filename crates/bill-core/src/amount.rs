//! # Amount Types
//!
//! Currency and amount types accepted by the QIWI bills API.

use crate::error::{BillingError, BillingResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Currencies a bill may be issued in (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    RUB,
    KZT,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::RUB => "RUB",
            Currency::KZT => "KZT",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::RUB
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = BillingError;

    /// Surrounding whitespace is ignored; the code itself must match exactly.
    fn from_str(s: &str) -> BillingResult<Self> {
        match s.trim() {
            "RUB" => Ok(Currency::RUB),
            "KZT" => Ok(Currency::KZT),
            other => Err(BillingError::UnsupportedCurrency {
                currency: other.to_string(),
            }),
        }
    }
}

/// Bill amount as the vendor transmits it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub currency: Currency,
    /// Decimal string (e.g. "10" or "10.00")
    pub value: String,
}

impl Amount {
    /// Amount of whole currency units
    pub fn from_units(units: i64, currency: Currency) -> Self {
        Self {
            currency,
            value: units.to_string(),
        }
    }

    /// Parse the decimal value
    pub fn units(&self) -> BillingResult<f64> {
        parse_units(&self.value)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

/// Amount as reported on a bill.
///
/// The currency stays a raw code so bills in currencies this client cannot
/// issue still decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillAmount {
    pub currency: String,
    pub value: String,
}

impl BillAmount {
    /// Classify the currency code
    pub fn known_currency(&self) -> BillingResult<Currency> {
        self.currency.parse()
    }

    /// Parse the decimal value
    pub fn units(&self) -> BillingResult<f64> {
        parse_units(&self.value)
    }
}

impl From<Amount> for BillAmount {
    fn from(amount: Amount) -> Self {
        Self {
            currency: amount.currency.as_str().to_string(),
            value: amount.value,
        }
    }
}

impl std::fmt::Display for BillAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}

fn parse_units(value: &str) -> BillingResult<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| BillingError::Serialization(format!("invalid amount value: {}", value)))
}
