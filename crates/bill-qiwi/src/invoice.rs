//! # Bill Creation
//!
//! `PUT /partner/bill/v1/bills/{billId}`

use crate::client::{bill_path, QiwiClient};
use bill_core::{Bill, BillingResult, InvoiceRequest};
use reqwest::Method;
use tracing::{info, instrument};
use uuid::Uuid;

/// Issues new bills
pub struct InvoiceService<'a> {
    client: &'a QiwiClient,
}

impl<'a> InvoiceService<'a> {
    pub(crate) fn new(client: &'a QiwiClient) -> Self {
        Self { client }
    }

    /// Issue a bill under a freshly generated UUID
    pub async fn issue(&self, request: &InvoiceRequest) -> BillingResult<Bill> {
        let bill_id = Uuid::new_v4().to_string();
        self.issue_with_id(&bill_id, request).await
    }

    /// Issue a bill under a caller-chosen id.
    ///
    /// Reissuing the same id with the same body returns the existing bill.
    #[instrument(skip(self, request), fields(amount = %request.amount()))]
    pub async fn issue_with_id(&self, bill_id: &str, request: &InvoiceRequest) -> BillingResult<Bill> {
        let http_request = self
            .client
            .make_json_request(Method::PUT, &bill_path(bill_id), request)?;

        let bill: Bill = self.client.execute(http_request).await?;

        info!("Issued bill: id={}, pay_url={}", bill.bill_id, bill.pay_url);
        Ok(bill)
    }
}
