use bill_core::{
    BillState, BillingError, BillingProvider, BoxedBillingProvider, Currency, Customer, ExpTime,
    InvoiceRequest,
};
use bill_qiwi::{QiwiClient, QiwiConfig};
use chrono::{TimeDelta, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const API_KEY: &str = "test-key";
const BILL_ID: &str = "cc961e8d-d4d6-4f02-b737-2297e51fb48e";
const PAY_URL: &str = "https://oplata.qiwi.com/form/?invoice_uid=66057202-07ee-4b49-8ec8-2a344cb90226";

fn client_for(server: &MockServer) -> QiwiClient {
    QiwiClient::new(QiwiConfig::new(API_KEY).with_base_url(server.uri())).unwrap()
}

fn bill_json(bill_id: &str, currency: &str, value: &str, status: &str) -> Value {
    json!({
        "siteId": "0dwgg9-00",
        "billId": bill_id,
        "amount": {"currency": currency, "value": value},
        "status": {"value": status, "changedDateTime": "2021-07-24T11:57:46.541+03:00"},
        "creationDateTime": "2021-07-24T11:17:37.717+03:00",
        "expirationDateTime": "2021-07-25T11:11:01Z",
        "payUrl": PAY_URL
    })
}

fn not_found_json() -> Value {
    json!({
        "serviceName": "invoicing-api",
        "errorCode": "api.invoice.not.found",
        "description": "Invoice not found",
        "userMessage": "Invoice not found",
        "dateTime": "2021-01-18T14:39:54.265+03:00",
        "traceId": "bc6bb6e7c5cf5beb"
    })
}

fn request(amount: i64, currency: &str) -> InvoiceRequest {
    InvoiceRequest::new(amount, currency, &ExpTime::hours(1)).unwrap()
}

#[tokio::test]
async fn issue_round_trips_amount_and_generated_id() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path_regex(r"^/partner/bill/v1/bills/[0-9a-f-]{36}$"))
        .and(header("Authorization", "Bearer test-key"))
        .and(header("Content-Type", "application/json"))
        .and(header("Accept", "application/json"))
        .respond_with(|req: &Request| {
            let bill_id = req.url.path().rsplit('/').next().unwrap_or_default().to_string();
            let body: Value = serde_json::from_slice(&req.body).unwrap();
            let currency = body["amount"]["currency"].as_str().unwrap_or_default();
            let value = body["amount"]["value"].as_str().unwrap_or_default();
            ResponseTemplate::new(200).set_body_json(bill_json(&bill_id, currency, value, "WAITING"))
        })
        .expect(1)
        .mount(&server)
        .await;

    let bill = client_for(&server).invoice().issue(&request(10, "KZT")).await.unwrap();

    assert!(uuid::Uuid::parse_str(&bill.bill_id).is_ok());
    assert_eq!(bill.amount.known_currency().unwrap(), Currency::KZT);
    assert_eq!(bill.amount.value, "10");
    assert_eq!(bill.state(), BillState::Waiting);
    assert!(bill.pay_url.contains("qiwi.com"));
}

#[tokio::test]
async fn issue_sends_optional_fields() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path(format!("/partner/bill/v1/bills/{}", BILL_ID)))
        .and(body_partial_json(json!({
            "amount": {"currency": "RUB", "value": "250"},
            "comment": "Order #42",
            "customer": {"email": "buyer@example.com"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(bill_json(BILL_ID, "RUB", "250.00", "WAITING")))
        .expect(1)
        .mount(&server)
        .await;

    let request = request(250, "RUB")
        .with_comment("Order #42")
        .with_customer(Customer {
            email: Some("buyer@example.com".into()),
            ..Default::default()
        });

    let bill = client_for(&server)
        .invoice()
        .issue_with_id(BILL_ID, &request)
        .await
        .unwrap();

    assert_eq!(bill.bill_id, BILL_ID);
    assert_eq!(bill.amount.units().unwrap(), 250.0);
}

#[tokio::test]
async fn issue_surfaces_vendor_error() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_json()))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .invoice()
        .issue(&request(1, "RUB"))
        .await
        .unwrap_err();

    match err {
        BillingError::Api(api) => {
            assert_eq!(api.service_name, "invoicing-api");
            assert_eq!(api.error_code, "api.invoice.not.found");
            assert_eq!(api.description, "Invoice not found");
            assert_eq!(api.user_message, "Invoice not found");
            assert_eq!(api.trace_id, "bc6bb6e7c5cf5beb");
            assert!(api.date_time.is_some());
        }
        other => panic!("expected vendor error, got {other:?}"),
    }
}

#[tokio::test]
async fn vendor_error_survives_malformed_date_time() {
    let server = MockServer::start().await;

    let mut body = not_found_json();
    body["dateTime"] = json!("2021-01-18 14:39:54");

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(body))
        .mount(&server)
        .await;

    let err = client_for(&server).status().get(BILL_ID).await.unwrap_err();

    match err {
        BillingError::Api(api) => {
            assert_eq!(api.error_code, "api.invoice.not.found");
            assert_eq!(api.trace_id, "bc6bb6e7c5cf5beb");
            assert_eq!(api.user_message, "Invoice not found");
            assert!(api.date_time.is_none());
        }
        other => panic!("expected vendor error, got {other:?}"),
    }
}

#[tokio::test]
async fn issue_empty_error_body_yields_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .invoice()
        .issue(&request(1, "RUB"))
        .await
        .unwrap_err();

    assert!(err.is_remote());
    assert_eq!(err.to_string(), "qiwi API http error: 500 Internal Server Error");
}

#[tokio::test]
async fn get_decodes_bill() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/partner/bill/v1/bills/{}", BILL_ID)))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bill_json(BILL_ID, "RUB", "1", "PAID")))
        .expect(1)
        .mount(&server)
        .await;

    let bill = client_for(&server).status().get(BILL_ID).await.unwrap();

    assert_eq!(bill.bill_id, BILL_ID);
    assert_eq!(bill.amount.known_currency().unwrap(), Currency::RUB);
    assert_eq!(bill.amount.value, "1");
    assert_eq!(bill.state(), BillState::Paid);
    assert_eq!(
        bill.expiration_date_time.unwrap().to_rfc3339(),
        "2021-07-25T11:11:01+00:00"
    );
}

#[tokio::test]
async fn get_decodes_bill_in_other_currency() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bill_json(BILL_ID, "USD", "5.00", "PAID")))
        .mount(&server)
        .await;

    let bill = client_for(&server).status().get(BILL_ID).await.unwrap();

    assert_eq!(bill.amount.currency, "USD");
    assert_eq!(bill.amount.units().unwrap(), 5.0);
    assert!(bill.amount.known_currency().is_err());
}

#[tokio::test]
async fn get_keeps_any_status_value() {
    let cases = [
        ("WAITING", BillState::Waiting),
        ("PAID", BillState::Paid),
        ("REJECTED", BillState::Rejected),
        ("EXPIRED", BillState::Expired),
        ("paid", BillState::Paid),
        ("wrongstatus", BillState::Unknown("wrongstatus".into())),
    ];

    for (value, expected) in cases {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(bill_json(BILL_ID, "RUB", "1", value)))
            .mount(&server)
            .await;

        let bill = client_for(&server).status().get(BILL_ID).await.unwrap();

        assert_eq!(bill.status.value, value);
        assert_eq!(bill.state(), expected);
    }
}

#[tokio::test]
async fn get_empty_error_body_yields_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).status().get(BILL_ID).await.unwrap_err();

    assert!(matches!(err, BillingError::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn get_unparseable_error_body_yields_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).status().get(BILL_ID).await.unwrap_err();

    assert_eq!(err.to_string(), "qiwi API http error: 502 Bad Gateway");
}

#[tokio::test]
async fn get_malformed_success_body_is_serialization_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"billId\": 42"))
        .mount(&server)
        .await;

    let err = client_for(&server).status().get(BILL_ID).await.unwrap_err();

    assert!(matches!(err, BillingError::Serialization(_)));
    assert!(!err.is_remote());
}

#[tokio::test]
async fn cancel_posts_to_reject() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(format!("/partner/bill/v1/bills/{}/reject", BILL_ID)))
        .and(header("Authorization", "Bearer test-key"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(bill_json(BILL_ID, "RUB", "1", "REJECTED")))
        .expect(1)
        .mount(&server)
        .await;

    let bill = client_for(&server).cancel().cancel(BILL_ID).await.unwrap();

    assert_eq!(bill.bill_id, BILL_ID);
    assert_eq!(bill.state(), BillState::Rejected);
    assert!(bill.state().is_final());
}

#[tokio::test]
async fn provider_trait_dispatches_to_services() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/partner/bill/v1/bills/{}", BILL_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(bill_json(BILL_ID, "RUB", "1", "WAITING")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/partner/bill/v1/bills/{}/reject", BILL_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(bill_json(BILL_ID, "RUB", "1", "REJECTED")))
        .expect(1)
        .mount(&server)
        .await;

    let provider: BoxedBillingProvider = Arc::new(client_for(&server));

    assert_eq!(provider.provider_name(), "qiwi");
    assert_eq!(provider.status(BILL_ID).await.unwrap().state(), BillState::Waiting);
    assert_eq!(provider.cancel(BILL_ID).await.unwrap().state(), BillState::Rejected);
}

#[tokio::test]
async fn validation_errors_never_reach_the_server() {
    let past = Utc::now() - TimeDelta::hours(1);

    for err in [
        InvoiceRequest::new(0, "RUB", &ExpTime::default()).unwrap_err(),
        InvoiceRequest::new(10, "USD", &ExpTime::default()).unwrap_err(),
        InvoiceRequest::new(10, "RUB", &past).unwrap_err(),
    ] {
        assert!(err.is_validation(), "{err}");
        assert!(!err.is_remote());
    }
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let client = QiwiClient::new(QiwiConfig::new(API_KEY).with_base_url("http://127.0.0.1:1")).unwrap();

    let err = BillingProvider::status(&client, BILL_ID).await.unwrap_err();

    assert!(matches!(err, BillingError::Network(_)));
}
