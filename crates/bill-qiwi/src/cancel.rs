//! # Bill Rejection
//!
//! `POST /partner/bill/v1/bills/{billId}/reject`

use crate::client::{bill_path, QiwiClient};
use bill_core::{Bill, BillingResult};
use reqwest::Method;
use tracing::{info, instrument};

/// Rejects unpaid bills
pub struct CancelService<'a> {
    client: &'a QiwiClient,
}

impl<'a> CancelService<'a> {
    pub(crate) fn new(client: &'a QiwiClient) -> Self {
        Self { client }
    }

    /// Reject a bill so it can no longer be paid
    #[instrument(skip(self))]
    pub async fn cancel(&self, bill_id: &str) -> BillingResult<Bill> {
        let mut path = bill_path(bill_id).to_vec();
        path.push("reject");
        let request = self.client.make_request(Method::POST, &path);

        let bill: Bill = self.client.execute(request).await?;

        info!("Rejected bill: id={}, status={}", bill.bill_id, bill.status.value);
        Ok(bill)
    }
}
