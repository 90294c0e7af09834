//! # Bill Status
//!
//! `GET /partner/bill/v1/bills/{billId}`

use crate::client::{bill_path, QiwiClient};
use bill_core::{Bill, BillingResult};
use reqwest::Method;
use tracing::{debug, instrument};

/// Looks up bills
pub struct StatusService<'a> {
    client: &'a QiwiClient,
}

impl<'a> StatusService<'a> {
    pub(crate) fn new(client: &'a QiwiClient) -> Self {
        Self { client }
    }

    /// Fetch the current state of a bill
    #[instrument(skip(self))]
    pub async fn get(&self, bill_id: &str) -> BillingResult<Bill> {
        let request = self.client.make_request(Method::GET, &bill_path(bill_id));

        let bill: Bill = self.client.execute(request).await?;

        debug!("Bill {} status: {}", bill.bill_id, bill.status.value);
        Ok(bill)
    }
}
