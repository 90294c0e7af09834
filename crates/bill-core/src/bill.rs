//! # Bill Types
//!
//! The bill record returned by every successful create, status and
//! reject call.

use crate::amount::BillAmount;
use crate::invoice::{CustomFields, Customer};
use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classified bill status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillState {
    /// Issued, awaiting payment
    Waiting,
    /// Paid by the customer
    Paid,
    /// Rejected by the merchant or the customer
    Rejected,
    /// Lifetime ran out before payment
    Expired,
    /// Status value this client does not know (passthrough)
    Unknown(String),
}

impl BillState {
    /// True once the bill can no longer change
    pub fn is_final(&self) -> bool {
        matches!(self, BillState::Paid | BillState::Rejected | BillState::Expired)
    }
}

/// Status block of a bill
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillStatus {
    /// Raw vendor value (e.g. "WAITING")
    pub value: String,

    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub changed_date_time: Option<DateTime<Utc>>,
}

impl BillStatus {
    /// Classify the raw value, ignoring case
    pub fn state(&self) -> BillState {
        match self.value.to_ascii_uppercase().as_str() {
            "WAITING" => BillState::Waiting,
            "PAID" => BillState::Paid,
            "REJECTED" => BillState::Rejected,
            "EXPIRED" => BillState::Expired,
            _ => BillState::Unknown(self.value.clone()),
        }
    }
}

/// A bill as reported by the vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Merchant site identifier
    #[serde(default)]
    pub site_id: String,

    /// Bill UUID
    pub bill_id: String,

    pub amount: BillAmount,

    pub status: BillStatus,

    #[serde(default)]
    pub customer: Customer,

    #[serde(default)]
    pub custom_fields: CustomFields,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_date_time: Option<DateTime<Utc>>,

    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiration_date_time: Option<DateTime<Utc>>,

    /// Hosted payment form to redirect the customer to
    #[serde(default)]
    pub pay_url: String,
}

impl Bill {
    /// Shorthand for `status.state()`
    pub fn state(&self) -> BillState {
        self.status.state()
    }

    /// Check if the bill still accepts payment at `now`
    pub fn is_payable_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.state(), BillState::Waiting)
            && self
                .expiration_date_time
                .map(|exp| exp > now)
                .unwrap_or(true)
    }
}
