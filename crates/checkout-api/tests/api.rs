//! Endpoint-level tests against a stub provider.
//!
//! The stub counts provider invocations, so these tests can assert that
//! validation failures short-circuit before any outbound call.

use async_trait::async_trait;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum_test::TestServer;
use checkout_api::state::{AppConfig, AppState};
use checkout_api::create_router;
use checkout_core::{
    BillingAddressCollection, CheckoutCart, CheckoutError, CheckoutProvider, CheckoutResult,
    CreatedSession, RedirectUrls, SessionDetail, SessionLineItem,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct StubProvider {
    fail: bool,
    create_calls: AtomicUsize,
    retrieve_calls: AtomicUsize,
    list_calls: AtomicUsize,
    last_success_url: Mutex<Option<String>>,
}

impl StubProvider {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn induced_failure() -> CheckoutError {
        CheckoutError::Provider {
            provider: "stub".to_string(),
            message: "induced failure".to_string(),
        }
    }
}

#[async_trait]
impl CheckoutProvider for StubProvider {
    async fn create_session(
        &self,
        _cart: &CheckoutCart,
        urls: &RedirectUrls,
    ) -> CheckoutResult<CreatedSession> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_success_url.lock().unwrap() = Some(urls.success_url());

        if self.fail {
            return Err(Self::induced_failure());
        }

        Ok(CreatedSession {
            id: "cs_stub_123".to_string(),
            url: "https://checkout.stripe.test/c/pay/cs_stub_123".to_string(),
            expires_at: None,
        })
    }

    async fn retrieve_session(&self, session_id: &str) -> CheckoutResult<SessionDetail> {
        self.retrieve_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(Self::induced_failure());
        }

        Ok(SessionDetail {
            id: session_id.to_string(),
            customer_email: Some("buyer@example.com".to_string()),
            currency: Some("usd".to_string()),
            amount_total: Some(3998),
            payment_status: "paid".to_string(),
        })
    }

    async fn list_line_items(&self, _session_id: &str) -> CheckoutResult<Vec<SessionLineItem>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            return Err(Self::induced_failure());
        }

        Ok(vec![
            SessionLineItem {
                description: Some("Shirt".to_string()),
                quantity: Some(2),
                unit_amount: Some(1999),
                currency: Some("usd".to_string()),
            },
            SessionLineItem {
                description: Some("Sticker".to_string()),
                quantity: Some(1),
                unit_amount: Some(0),
                currency: None,
            },
        ])
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        site_url: "https://shop.test".to_string(),
        allow_origin: "https://shop.test".to_string(),
        environment: "test".to_string(),
        allow_promotion_codes: true,
        billing_address_collection: BillingAddressCollection::Auto,
        collect_phone_number: false,
        automatic_tax: false,
    }
}

fn server_with(stub: Arc<StubProvider>) -> TestServer {
    let state = AppState::with_provider(stub, test_config());
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn create_session_returns_id_and_url() {
    let stub = Arc::new(StubProvider::default());
    let server = server_with(stub.clone());

    let response = server
        .post("/create-checkout-session")
        .json(&json!({
            "items": [
                { "name": "Shirt", "price": 19.99, "qty": 2 },
                { "name": "Tote", "price": 9.0 }
            ]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["id"], "cs_stub_123");
    assert_eq!(body["url"], "https://checkout.stripe.test/c/pay/cs_stub_123");

    assert_eq!(stub.create_calls.load(Ordering::SeqCst), 1);

    // Redirect targets are server-built from the configured origin.
    let success_url = stub.last_success_url.lock().unwrap().clone().unwrap();
    assert_eq!(
        success_url,
        "https://shop.test/success/?session_id={CHECKOUT_SESSION_ID}"
    );
}

#[tokio::test]
async fn create_session_with_empty_items_is_rejected_before_provider() {
    let stub = Arc::new(StubProvider::default());
    let server = server_with(stub.clone());

    let response = server
        .post("/create-checkout-session")
        .json(&json!({ "items": [] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "No items provided");

    assert_eq!(stub.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn create_session_with_missing_body_is_rejected() {
    let stub = Arc::new(StubProvider::default());
    let server = server_with(stub.clone());

    let response = server.post("/create-checkout-session").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "No items provided");
    assert_eq!(stub.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn create_session_with_only_unpurchasable_items_is_rejected() {
    let stub = Arc::new(StubProvider::default());
    let server = server_with(stub.clone());

    let response = server
        .post("/create-checkout-session")
        .json(&json!({
            "items": [
                { "name": "Freebie", "price": 0 },
                { "name": "Refund", "price": -5.0, "qty": 1 }
            ]
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "No purchasable items");
    assert_eq!(stub.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn create_session_provider_failure_is_a_generic_500() {
    let stub = Arc::new(StubProvider::failing());
    let server = server_with(stub.clone());

    let response = server
        .post("/create-checkout-session")
        .json(&json!({ "items": [{ "name": "Shirt", "price": 19.99 }] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Server error");
}

#[tokio::test]
async fn create_session_wrong_method_is_405_with_allow() {
    let stub = Arc::new(StubProvider::default());
    let server = server_with(stub.clone());

    let response = server.get("/create-checkout-session").await;

    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        response.headers().get(header::ALLOW).unwrap(),
        "POST, OPTIONS"
    );
    let body: Value = response.json();
    assert_eq!(body["error"], "Method Not Allowed");
    assert_eq!(stub.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn preflight_answers_with_cors_headers_and_empty_body() {
    let stub = Arc::new(StubProvider::default());
    let server = server_with(stub.clone());

    let response = server
        .method(Method::OPTIONS, "/create-checkout-session")
        .add_header(header::ORIGIN, HeaderValue::from_static("https://shop.test"))
        .add_header(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        )
        .add_header(
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            HeaderValue::from_static("content-type"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response.text().is_empty());

    let headers = response.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        "https://shop.test"
    );
    let methods = headers
        .get("access-control-allow-methods")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));
}

#[tokio::test]
async fn create_response_carries_the_configured_origin() {
    let stub = Arc::new(StubProvider::default());
    let server = server_with(stub.clone());

    let response = server
        .post("/create-checkout-session")
        .add_header(header::ORIGIN, HeaderValue::from_static("https://shop.test"))
        .json(&json!({ "items": [{ "name": "Shirt", "price": 19.99 }] }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "https://shop.test"
    );
}

#[tokio::test]
async fn order_details_without_session_id_is_rejected_before_provider() {
    let stub = Arc::new(StubProvider::default());
    let server = server_with(stub.clone());

    let response = server.get("/order-details").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Missing session_id");

    assert_eq!(stub.retrieve_calls.load(Ordering::SeqCst), 0);
    assert_eq!(stub.list_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn order_details_summarizes_session_and_line_items() {
    let stub = Arc::new(StubProvider::default());
    let server = server_with(stub.clone());

    let response = server
        .get("/order-details")
        .add_query_param("session_id", "cs_stub_123")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["id"], "cs_stub_123");
    assert_eq!(body["customer_email"], "buyer@example.com");
    assert_eq!(body["currency"], "usd");
    assert_eq!(body["amount_total"], 3998);
    assert_eq!(body["payment_status"], "paid");

    let items = body["line_items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["description"], "Shirt");
    assert_eq!(items[0]["unit_amount"], 1999);
    // The second item has no price currency; it inherits the session's.
    assert_eq!(items[1]["currency"], "usd");

    assert_eq!(stub.retrieve_calls.load(Ordering::SeqCst), 1);
    assert_eq!(stub.list_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn order_details_provider_failure_is_a_generic_500() {
    let stub = Arc::new(StubProvider::failing());
    let server = server_with(stub.clone());

    let response = server
        .get("/order-details")
        .add_query_param("session_id", "cs_gone")
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Server error");
}

#[tokio::test]
async fn order_details_wrong_method_is_405_with_allow() {
    let stub = Arc::new(StubProvider::default());
    let server = server_with(stub.clone());

    let response = server.post("/order-details").await;

    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers().get(header::ALLOW).unwrap(), "GET");
    let body: Value = response.json();
    assert_eq!(body["error"], "Method Not Allowed");
}

#[tokio::test]
async fn health_reports_service_name() {
    let server = server_with(Arc::new(StubProvider::default()));

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["service"], "storefront-checkout");
}
