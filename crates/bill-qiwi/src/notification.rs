//! # Bill Notifications
//!
//! QIWI posts a notification to the merchant's server whenever a bill
//! changes status. The request carries the bill as JSON and an
//! `X-Api-Signature-SHA256` header: a hex HMAC-SHA256, keyed by the
//! merchant secret, over
//!
//! ```text
//! amount.currency|amount.value|billId|siteId|status.value
//! ```

use bill_core::{Bill, BillState, BillingError, BillingResult};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::{debug, info, warn};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the notification signature
pub const SIGNATURE_HEADER: &str = "X-Api-Signature-SHA256";

/// Parsed notification body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillNotification {
    pub bill: Bill,
    #[serde(default)]
    pub version: String,
}

/// The string QIWI signs for a bill
pub fn signed_fields(bill: &Bill) -> String {
    format!(
        "{}|{}|{}|{}|{}",
        bill.amount.currency, bill.amount.value, bill.bill_id, bill.site_id, bill.status.value
    )
}

/// Compute the lower-case hex signature for a bill
pub fn sign(secret: &str, bill: &Bill) -> String {
    let mut mac = new_mac(secret);
    mac.update(signed_fields(bill).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn new_mac(secret: &str) -> HmacSha256 {
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size")
}

/// Parse a notification body and check its signature.
pub fn verify_notification(
    secret: &str,
    payload: &[u8],
    signature: &str,
) -> BillingResult<BillNotification> {
    let notification: BillNotification = serde_json::from_slice(payload)
        .map_err(|e| BillingError::Serialization(format!("Failed to parse notification: {}", e)))?;

    let expected = hex::decode(signature.trim()).map_err(|_| {
        BillingError::NotificationVerificationFailed("Signature is not hex".to_string())
    })?;

    let mut mac = new_mac(secret);
    mac.update(signed_fields(&notification.bill).as_bytes());
    mac.verify_slice(&expected).map_err(|_| {
        BillingError::NotificationVerificationFailed("Signature mismatch".to_string())
    })?;

    debug!(
        "Verified notification: bill={}, status={}",
        notification.bill.bill_id, notification.bill.status.value
    );

    Ok(notification)
}

/// Notification handler trait
///
/// Implement this trait to react to bill status changes.
#[allow(unused_variables)]
pub trait NotificationHandler: Send + Sync {
    /// Called when a bill is (again) awaiting payment
    fn on_waiting(&self, bill: &Bill) -> BillingResult<()> {
        debug!("Bill waiting: {}", bill.bill_id);
        Ok(())
    }

    /// Called when a bill is paid
    fn on_paid(&self, bill: &Bill) -> BillingResult<()> {
        info!("Bill paid: id={}, amount={}", bill.bill_id, bill.amount);
        Ok(())
    }

    /// Called when a bill is rejected
    fn on_rejected(&self, bill: &Bill) -> BillingResult<()> {
        warn!("Bill rejected: {}", bill.bill_id);
        Ok(())
    }

    /// Called when a bill expires unpaid
    fn on_expired(&self, bill: &Bill) -> BillingResult<()> {
        info!("Bill expired: {}", bill.bill_id);
        Ok(())
    }

    /// Called for status values this client does not know
    fn on_unknown(&self, bill: &Bill) -> BillingResult<()> {
        debug!("Unhandled bill status: {}", bill.status.value);
        Ok(())
    }
}

/// Default handler that only logs
pub struct LoggingNotificationHandler;

impl NotificationHandler for LoggingNotificationHandler {}

/// Dispatch a notification to the matching handler method
pub fn dispatch_notification(
    handler: &dyn NotificationHandler,
    notification: &BillNotification,
) -> BillingResult<()> {
    let bill = &notification.bill;
    match bill.state() {
        BillState::Waiting => handler.on_waiting(bill),
        BillState::Paid => handler.on_paid(bill),
        BillState::Rejected => handler.on_rejected(bill),
        BillState::Expired => handler.on_expired(bill),
        BillState::Unknown(_) => handler.on_unknown(bill),
    }
}
