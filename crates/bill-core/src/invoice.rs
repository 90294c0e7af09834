//! # Invoice Requests
//!
//! The request body for issuing a bill, and the expiration strategies
//! used to compute its `expirationDateTime`.
//!
//! An [`InvoiceRequest`] can only be obtained through [`InvoiceRequest::new`],
//! which enforces the vendor's constraints before any request is sent:
//!
//! - amount is strictly positive
//! - currency is `RUB` or `KZT`
//! - expiration lies strictly in the future

use crate::amount::{Amount, Currency};
use crate::error::{BillingError, BillingResult};
use chrono::{DateTime, SecondsFormat, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Yields the UTC instant a bill stops accepting payment.
pub trait Lifetime {
    /// Compute the expiration relative to `now`.
    fn expires_at(&self, now: DateTime<Utc>) -> BillingResult<DateTime<Utc>>;
}

/// Expire a number of hours after the request is built.
///
/// Zero hours means the default of one hour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpTime {
    pub hours: i64,
}

impl ExpTime {
    pub fn hours(hours: i64) -> Self {
        Self { hours }
    }
}

impl Lifetime for ExpTime {
    fn expires_at(&self, now: DateTime<Utc>) -> BillingResult<DateTime<Utc>> {
        let hours = if self.hours == 0 { 1 } else { self.hours };
        if hours < 1 {
            return Err(BillingError::InvalidLifetime { hours: self.hours });
        }

        TimeDelta::try_hours(hours)
            .and_then(|delta| now.checked_add_signed(delta))
            .map(|at| at.trunc_subsecs(3))
            .ok_or(BillingError::InvalidLifetime { hours: self.hours })
    }
}

/// A fixed expiration instant.
impl Lifetime for DateTime<Utc> {
    fn expires_at(&self, _now: DateTime<Utc>) -> BillingResult<DateTime<Utc>> {
        Ok(self.trunc_subsecs(3))
    }
}

/// Customer contact fields attached to a bill
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Merchant-side account identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
}

impl Customer {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none() && self.account.is_none()
    }
}

/// Vendor-defined custom fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFields {
    /// Comma-separated payment methods shown on the form (e.g. "qw,card")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_sources_filter: Option<String>,
    /// Payment form theme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub your_param1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub your_param2: Option<String>,
}

impl CustomFields {
    pub fn is_empty(&self) -> bool {
        self.pay_sources_filter.is_none()
            && self.theme_code.is_none()
            && self.your_param1.is_none()
            && self.your_param2.is_none()
    }
}

/// Validated body of a bill creation request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    amount: Amount,

    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,

    #[serde(serialize_with = "serialize_millis")]
    expiration_date_time: DateTime<Utc>,

    #[serde(skip_serializing_if = "Customer::is_empty")]
    customer: Customer,

    #[serde(skip_serializing_if = "CustomFields::is_empty")]
    custom_fields: CustomFields,
}

impl InvoiceRequest {
    /// Validate inputs and build a request expiring per `lifetime`.
    pub fn new(amount: i64, currency: &str, lifetime: &impl Lifetime) -> BillingResult<Self> {
        Self::new_at(amount, currency, lifetime, Utc::now())
    }

    /// Same as [`InvoiceRequest::new`] against an explicit clock.
    pub fn new_at(
        amount: i64,
        currency: &str,
        lifetime: &impl Lifetime,
        now: DateTime<Utc>,
    ) -> BillingResult<Self> {
        if amount <= 0 {
            return Err(BillingError::InvalidAmount(amount));
        }

        let currency: Currency = currency.parse()?;

        let expiration = lifetime.expires_at(now)?;
        if expiration <= now {
            return Err(BillingError::ExpirationInPast { expiration });
        }

        Ok(Self {
            amount: Amount::from_units(amount, currency),
            comment: None,
            expiration_date_time: expiration,
            customer: Customer::default(),
            custom_fields: CustomFields::default(),
        })
    }

    /// Builder: set the comment shown on the payment form
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Builder: set customer contacts
    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = customer;
        self
    }

    /// Builder: set custom fields
    pub fn with_custom_fields(mut self, custom_fields: CustomFields) -> Self {
        self.custom_fields = custom_fields;
        self
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn expiration_date_time(&self) -> DateTime<Utc> {
        self.expiration_date_time
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn custom_fields(&self) -> &CustomFields {
        &self.custom_fields
    }
}

fn serialize_millis<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 7, 24, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let expires = now() + TimeDelta::hours(1);

        for currency in ["RUB", "KZT", "  RUB "] {
            let request = InvoiceRequest::new_at(10, currency, &expires, now()).unwrap();

            assert_eq!(request.amount().value, "10");
            assert_eq!(request.amount().currency.as_str(), currency.trim());
            assert_eq!(request.expiration_date_time(), expires);
        }
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let expires = now() + TimeDelta::hours(1);

        for amount in [0, -1, -10, i64::MIN] {
            let err = InvoiceRequest::new_at(amount, "RUB", &expires, now()).unwrap_err();
            assert!(matches!(err, BillingError::InvalidAmount(a) if a == amount));
        }
    }

    #[test]
    fn test_rejects_unsupported_currency() {
        let expires = now() + TimeDelta::hours(1);

        let err = InvoiceRequest::new_at(10, "RU", &expires, now()).unwrap_err();
        assert_eq!(err.to_string(), "incorrect currency value (RU)");
    }

    #[test]
    fn test_rejects_past_or_present_expiration() {
        let past = Utc.with_ymd_and_hms(2020, 11, 1, 1, 0, 0).unwrap();

        let err = InvoiceRequest::new_at(10, "RUB", &past, now()).unwrap_err();
        assert!(matches!(err, BillingError::ExpirationInPast { expiration } if expiration == past));

        let err = InvoiceRequest::new_at(10, "RUB", &now(), now()).unwrap_err();
        assert!(matches!(err, BillingError::ExpirationInPast { .. }));
    }

    #[test]
    fn test_amount_checked_before_currency() {
        let err = InvoiceRequest::new_at(0, "USD", &now(), now()).unwrap_err();
        assert!(matches!(err, BillingError::InvalidAmount(0)));
    }

    #[test]
    fn test_currency_checked_before_expiration() {
        let past = now() - TimeDelta::hours(1);

        let err = InvoiceRequest::new_at(10, "USD", &past, now()).unwrap_err();
        assert!(matches!(err, BillingError::UnsupportedCurrency { currency } if currency == "USD"));
    }

    #[test]
    fn test_exp_time_defaults_to_one_hour() {
        let at = ExpTime::default().expires_at(now()).unwrap();
        assert_eq!(at, now() + TimeDelta::hours(1));

        let at = ExpTime::hours(5).expires_at(now()).unwrap();
        assert_eq!(at, now() + TimeDelta::hours(5));
    }

    #[test]
    fn test_exp_time_rejects_negative_hours() {
        let err = ExpTime::hours(-2).expires_at(now()).unwrap_err();
        assert!(matches!(err, BillingError::InvalidLifetime { hours: -2 }));

        let err = InvoiceRequest::new_at(10, "RUB", &ExpTime::hours(-1), now()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_exp_time_truncates_to_millis() {
        let now = Utc.timestamp_nanos(1_612_545_418_033_456_789);
        let at = ExpTime::default().expires_at(now).unwrap();

        assert_eq!(at.timestamp_subsec_nanos(), 33_000_000);
    }

    #[test]
    fn test_request_json_shape() {
        let expires = Utc.timestamp_millis_opt(1_517_851_018_033).unwrap();
        let issued_at = expires - TimeDelta::hours(1);
        let request = InvoiceRequest::new_at(1, "RUB", &expires, issued_at)
            .unwrap()
            .with_comment("Order #42")
            .with_customer(Customer {
                email: Some("buyer@example.com".into()),
                ..Default::default()
            })
            .with_custom_fields(CustomFields {
                theme_code: Some("Yvan-YKaSh".into()),
                ..Default::default()
            });

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "amount": {"currency": "RUB", "value": "1"},
                "comment": "Order #42",
                "expirationDateTime": "2018-02-05T17:16:58.033Z",
                "customer": {"email": "buyer@example.com"},
                "customFields": {"themeCode": "Yvan-YKaSh"}
            })
        );
    }

    #[test]
    fn test_request_json_omits_empty_parts() {
        let expires = now() + TimeDelta::hours(2);
        let request = InvoiceRequest::new_at(3, "KZT", &expires, now()).unwrap();

        let json = serde_json::to_value(&request).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("comment"));
        assert!(!object.contains_key("customer"));
        assert!(!object.contains_key("customFields"));
        assert_eq!(json["expirationDateTime"], "2021-07-24T12:00:00.000Z");
    }
}
