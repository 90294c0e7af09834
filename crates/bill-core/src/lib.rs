//! # bill-core
//!
//! Core types and traits for the qiwi-bill-rs client.
//!
//! This crate provides:
//! - `InvoiceRequest` and the `Lifetime` expiration strategies, validated on construction
//! - `Bill`, `BillStatus` and `BillState` for decoded vendor responses
//! - `Amount` and `Currency` for requests, `BillAmount` for decoded bills
//! - `BillingProvider` trait implemented by API clients
//! - `BillingError` and the vendor `ApiError` payload
//!
//! ## Example
//!
//! ```rust,ignore
//! use bill_core::{ExpTime, InvoiceRequest};
//!
//! // 100 RUB, payable for three hours
//! let request = InvoiceRequest::new(100, "RUB", &ExpTime::hours(3))?
//!     .with_comment("Order #42");
//!
//! let bill = provider.issue(&request).await?;
//! println!("Pay at {}", bill.pay_url);
//! ```

pub mod amount;
pub mod bill;
pub mod error;
pub mod invoice;
pub mod provider;
pub mod timestamp;

// Re-exports for convenience
pub use amount::{Amount, BillAmount, Currency};
pub use bill::{Bill, BillState, BillStatus};
pub use error::{ApiError, BillingError, BillingResult};
pub use invoice::{CustomFields, Customer, ExpTime, InvoiceRequest, Lifetime};
pub use provider::{BillingProvider, BoxedBillingProvider};
