//! # QIWI Client
//!
//! HTTP plumbing shared by the bill services: URL and header construction,
//! request execution and success/error discrimination.

use crate::cancel::CancelService;
use crate::config::QiwiConfig;
use crate::invoice::InvoiceService;
use crate::status::StatusService;
use async_trait::async_trait;
use bill_core::{ApiError, Bill, BillingError, BillingProvider, BillingResult, InvoiceRequest};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

/// Path segments addressing a single bill
pub(crate) fn bill_path(bill_id: &str) -> [&str; 5] {
    ["partner", "bill", "v1", "bills", bill_id]
}

const JSON: &str = "application/json";

/// Client for the QIWI partner bills API
///
/// Holds the immutable configuration and the HTTP transport. Cloning is
/// cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct QiwiClient {
    config: QiwiConfig,
    base_url: Url,
    http: Client,
}

impl QiwiClient {
    /// Create a client with its own transport
    pub fn new(config: QiwiConfig) -> BillingResult<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BillingError::Configuration(format!("HTTP client: {}", e)))?;

        Self::with_http_client(config, http)
    }

    /// Create a client over a caller-supplied transport
    pub fn with_http_client(config: QiwiConfig, http: Client) -> BillingResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            BillingError::Configuration(format!("invalid base URL {}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BillingError::Configuration(format!(
                "base URL cannot carry a path: {}",
                config.base_url
            )));
        }

        Ok(Self {
            config,
            base_url,
            http,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> BillingResult<Self> {
        let config = QiwiConfig::from_env()?;
        Self::new(config)
    }

    pub fn config(&self) -> &QiwiConfig {
        &self.config
    }

    /// Bill creation
    pub fn invoice(&self) -> InvoiceService<'_> {
        InvoiceService::new(self)
    }

    /// Bill status lookups
    pub fn status(&self) -> StatusService<'_> {
        StatusService::new(self)
    }

    /// Bill rejection
    pub fn cancel(&self) -> CancelService<'_> {
        CancelService::new(self)
    }

    /// Resolve path segments against the base URL, replacing any base path
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(segments);
        }
        url
    }

    /// Build a request with the auth and content negotiation headers set
    pub(crate) fn make_request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(ACCEPT, JSON)
            .header(USER_AGENT, &self.config.user_agent)
            .header(AUTHORIZATION, self.config.auth_header());

        if method == Method::POST {
            request = request.header(CONTENT_TYPE, JSON);
        }

        request
    }

    /// Build a request carrying a JSON body
    pub(crate) fn make_json_request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> BillingResult<RequestBuilder> {
        let body = serde_json::to_vec(body)
            .map_err(|e| BillingError::Serialization(format!("error in json encode: {}", e)))?;

        let request = self.make_request(method.clone(), segments);
        Ok(if method == Method::POST {
            request.body(body)
        } else {
            request.header(CONTENT_TYPE, JSON).body(body)
        })
    }

    /// Send the request and decode the response.
    ///
    /// Only 200 is a success. Any other status decodes the body as the
    /// vendor error payload, falling back to a bare status error.
    pub(crate) async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> BillingResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| BillingError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BillingError::Network(e.to_string()))?;

        if status != StatusCode::OK {
            error!("QIWI API error: status={}, body={}", status, body);
            return Err(error_from_response(status, &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| BillingError::Serialization(format!("error in json decode: {}", e)))
    }
}

/// Map a non-200 response to the caller-facing error
fn error_from_response(status: StatusCode, body: &str) -> BillingError {
    if !body.trim().is_empty() {
        if let Ok(api_error) = serde_json::from_str::<ApiError>(body) {
            return BillingError::Api(api_error);
        }
    }

    BillingError::HttpStatus {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    }
}

#[async_trait]
impl BillingProvider for QiwiClient {
    async fn issue(&self, request: &InvoiceRequest) -> BillingResult<Bill> {
        QiwiClient::invoice(self).issue(request).await
    }

    async fn status(&self, bill_id: &str) -> BillingResult<Bill> {
        QiwiClient::status(self).get(bill_id).await
    }

    async fn cancel(&self, bill_id: &str) -> BillingResult<Bill> {
        QiwiClient::cancel(self).cancel(bill_id).await
    }

    fn provider_name(&self) -> &'static str {
        "qiwi"
    }
}
