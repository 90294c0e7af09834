//! # bill-qiwi
//!
//! Client for the QIWI partner bills API.
//!
//! Three services hang off [`QiwiClient`], one per endpoint:
//!
//! | Service | Method | Path |
//! |---------|--------|------|
//! | `client.invoice().issue()` | PUT | `/partner/bill/v1/bills/{billId}` |
//! | `client.status().get()` | GET | `/partner/bill/v1/bills/{billId}` |
//! | `client.cancel().cancel()` | POST | `/partner/bill/v1/bills/{billId}/reject` |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bill_core::{ExpTime, InvoiceRequest};
//! use bill_qiwi::QiwiClient;
//!
//! // Reads QIWI_KEY (and .env if present)
//! let client = QiwiClient::from_env()?;
//!
//! let request = InvoiceRequest::new(1, "RUB", &ExpTime::hours(3))?;
//! let bill = client.invoice().issue(&request).await?;
//! println!("Bill {} | Pay URL: {}", bill.bill_id, bill.pay_url);
//!
//! let bill = client.status().get(&bill.bill_id).await?;
//! println!("Status: {}", bill.status.value);
//!
//! let bill = client.cancel().cancel(&bill.bill_id).await?;
//! ```
//!
//! ## Notifications
//!
//! ```rust,ignore
//! use bill_qiwi::notification::{dispatch_notification, verify_notification, LoggingNotificationHandler};
//!
//! // In your notification endpoint:
//! let notification = verify_notification(&config.api_key, body, signature_header)?;
//! dispatch_notification(&LoggingNotificationHandler, &notification)?;
//! ```

pub mod cancel;
pub mod client;
pub mod config;
pub mod invoice;
pub mod notification;
pub mod status;

// Re-exports
pub use cancel::CancelService;
pub use client::QiwiClient;
pub use config::QiwiConfig;
pub use invoice::InvoiceService;
pub use notification::{
    dispatch_notification, verify_notification, BillNotification, LoggingNotificationHandler,
    NotificationHandler, SIGNATURE_HEADER,
};
pub use status::StatusService;
