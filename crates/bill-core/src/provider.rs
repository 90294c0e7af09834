//! # Billing Provider Trait
//!
//! Seam between callers and a concrete bill API client.
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │       BillingProvider (trait)        │
//! │  ├── issue()                         │
//! │  ├── status()                        │
//! │  └── cancel()                        │
//! └──────────────────────────────────────┘
//!                    ▲
//!            ┌───────┴───────┐
//!            │  QiwiClient   │
//!            └───────────────┘
//! ```

use crate::bill::Bill;
use crate::error::BillingResult;
use crate::invoice::InvoiceRequest;
use async_trait::async_trait;
use std::sync::Arc;

/// Bill lifecycle operations offered by a payment vendor.
#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Issue a new bill under a freshly generated id.
    async fn issue(&self, request: &InvoiceRequest) -> BillingResult<Bill>;

    /// Fetch the current state of a bill.
    async fn status(&self, bill_id: &str) -> BillingResult<Bill>;

    /// Reject an unpaid bill.
    async fn cancel(&self, bill_id: &str) -> BillingResult<Bill>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider (dynamic dispatch)
pub type BoxedBillingProvider = Arc<dyn BillingProvider>;
