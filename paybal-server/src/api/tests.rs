use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use paybal_core::processors::AdminApiProcessor;
use paybal_sdk::client::AdminClient;
use paybal_sdk::config::{AdminApiConfig, AppProxyConfig};
use paybal_sdk::signature::sign_query;
use serde_json::{Value, json};
use tower::ServiceExt;
use url::Url;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::api::routing::default_routes;
use crate::server::build_router;
use crate::state::AppState;

const ORDER_PATH: &str = "/admin/api/2024-10/orders/5551234.json";
const INVOICE_PATH: &str = "/admin/api/2024-10/orders/5551234/invoice.json";

fn app_with(base_url: &str, app_proxy: Option<AppProxyConfig>) -> Router {
    let config = AdminApiConfig::for_shop("test-shop.myshopify.com", "shpat_test", "2024-10")
        .unwrap()
        .with_base_url(Url::parse(base_url).unwrap());
    let state = AppState::new(
        AdminApiProcessor::new(AdminClient::new(config)),
        app_proxy,
    );
    build_router(state, &default_routes())
}

fn app(server: &MockServer) -> Router {
    app_with(&server.uri(), None)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_owned());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

async fn mount_order(server: &MockServer, order: Value) {
    Mock::given(method("GET"))
        .and(path(ORDER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "order": order })))
        .mount(server)
        .await;
}

fn partially_paid() -> Value {
    json!({
        "id": 5551234,
        "name": "#1001",
        "financial_status": "partially_paid",
        "total_price": "100.00",
        "total_outstanding": "40.00",
        "email": "a@b.com"
    })
}

#[tokio::test]
async fn test_missing_order_id_makes_no_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    for uri in ["/pay-balance", "/api/order-payment-status", "/apps/pay-balance?order_id="] {
        let (status, _, body) = get(app(&server), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body.contains("Missing order_id"), "{uri}: {body}");
    }
}

#[tokio::test]
async fn test_malformed_order_id_makes_no_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let (status, _, body) = get(
        app(&server),
        "/api/order-payment-status?order_id=gid%3A%2F%2Fshopify%2FCustomer%2F12",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "error": "Invalid order_id" })
    );
}

#[tokio::test]
async fn test_status_json_for_partially_paid_order() {
    let server = MockServer::start().await;
    mount_order(&server, partially_paid()).await;

    let (status, content_type, body) = get(
        app(&server),
        "/api/order-payment-status?order_id=gid%3A%2F%2Fshopify%2FOrder%2F5551234",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("application/json"));

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["orderId"], "5551234");
    assert_eq!(json["remainingBalance"].as_f64(), Some(40.0));
    assert_eq!(json["totalPrice"].as_f64(), Some(100.0));
    assert_eq!(json["hasOutstandingBalance"], true);
    assert_eq!(json["financialStatus"], "partially_paid");
    assert_eq!(json["cancelled"], false);
    assert_eq!(json["email"], "a@b.com");
}

#[tokio::test]
async fn test_status_json_accepts_camel_case_alias() {
    let server = MockServer::start().await;
    mount_order(&server, partially_paid()).await;

    let (status, _, _) = get(app(&server), "/api/order-payment-status?orderId=5551234").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_blank_order_id_falls_through_to_alias() {
    let server = MockServer::start().await;
    mount_order(&server, partially_paid()).await;

    let (status, _, body) = get(
        app(&server),
        "/api/order-payment-status?order_id=&orderId=5551234",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["orderId"], "5551234");
}

#[tokio::test]
async fn test_unparseable_query_renders_route_error() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (status, content_type, body) = get(
        app(&server),
        "/api/order-payment-status?order_id=5551234&order_id=5551234",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(content_type.unwrap().starts_with("application/json"));
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "error": "Invalid order_id" })
    );

    let (status, content_type, body) =
        get(app(&server), "/pay-balance?order_id=1&order_id=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(content_type.unwrap().starts_with("text/plain"));
    assert_eq!(body, "Invalid order_id");
}

#[tokio::test]
async fn test_status_json_cancelled_order_has_no_balance() {
    let server = MockServer::start().await;
    mount_order(
        &server,
        json!({
            "name": "#1001",
            "financial_status": "partially_paid",
            "cancelled_at": "2024-10-01T10:00:00-04:00",
            "total_price": "100.00",
            "total_outstanding": "40.00"
        }),
    )
    .await;

    let (_, _, body) = get(app(&server), "/api/order-payment-status?order_id=5551234").await;
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["cancelled"], true);
    assert_eq!(json["remainingBalance"].as_f64(), Some(0.0));
    assert_eq!(json["hasOutstandingBalance"], false);
}

#[tokio::test]
async fn test_status_json_never_mutates_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ORDER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "order": partially_paid() })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let uri = "/api/order-payment-status?order_id=5551234";
    let (_, _, first) = get(app(&server), uri).await;
    let (_, _, second) = get(app(&server), uri).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_pay_page_cancelled() {
    let server = MockServer::start().await;
    mount_order(
        &server,
        json!({ "name": "#1001", "cancelled_at": "2024-10-01T10:00:00Z", "financial_status": "pending" }),
    )
    .await;

    let (status, content_type, body) = get(app(&server), "/pay-balance?order_id=5551234").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/html; charset=utf-8"));
    assert!(body.contains("Order #1001"));
    assert!(body.contains("This order has been canceled"));
}

#[tokio::test]
async fn test_pay_page_fully_paid() {
    let server = MockServer::start().await;
    mount_order(
        &server,
        json!({ "name": "#1001", "financial_status": "paid", "total_price": "100.00", "total_outstanding": "0.00" }),
    )
    .await;

    let (_, _, body) = get(app(&server), "/?order_id=5551234").await;
    assert!(body.contains("This order is fully paid"));
}

#[tokio::test]
async fn test_pay_page_links_existing_checkout() {
    let server = MockServer::start().await;
    let mut order = partially_paid();
    order["invoice_url"] = json!("https://test-shop.myshopify.com/1/invoices/abc/checkouts/def");
    mount_order(&server, order).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (status, _, body) = get(app(&server), "/apps/pay-balance?order_id=5551234").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Pay Remaining Balance for #1001"));
    assert!(body.contains("$40.00"));
    assert!(body.contains(r#"href="https://test-shop.myshopify.com/1/invoices/abc/checkouts/def""#));
}

#[tokio::test]
async fn test_pay_page_without_link_shows_fallback() {
    let server = MockServer::start().await;
    mount_order(&server, partially_paid()).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let (_, _, body) = get(app(&server), "/pay-balance?order_id=5551234").await;
    assert!(body.contains("$40.00"));
    assert!(body.contains("hasn’t been generated yet"));
}

#[tokio::test]
async fn test_proxy_route_sends_invoice_every_time() {
    let server = MockServer::start().await;
    mount_order(&server, partially_paid()).await;
    Mock::given(method("POST"))
        .and(path(INVOICE_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "invoice": {} })))
        .expect(2)
        .mount(&server)
        .await;

    for _ in 0..2 {
        let (status, _, body) = get(app(&server), "/apps/pay-balance?order_id=5551234").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("sent to <strong>a@b.com</strong>"));
    }
}

#[tokio::test]
async fn test_upstream_error_is_passed_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ORDER_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"errors":"[API] Invalid API key or access token"}"#,
        ))
        .mount(&server)
        .await;

    let (status, _, body) = get(app(&server), "/pay-balance?order_id=5551234").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.starts_with("Error fetching order: "));
    assert!(body.contains("Invalid API key"));
}

#[tokio::test]
async fn test_invoice_failure_is_reported_as_such() {
    let server = MockServer::start().await;
    mount_order(&server, partially_paid()).await;
    Mock::given(method("POST"))
        .and(path(INVOICE_PATH))
        .respond_with(ResponseTemplate::new(422).set_body_string(r#"{"errors":"no email"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let (status, _, body) = get(app(&server), "/apps/pay-balance?order_id=5551234").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, r#"Error sending invoice: {"errors":"no email"}"#);
}

#[tokio::test]
async fn test_success_without_order_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ORDER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let (status, _, body) = get(app(&server), "/pay-balance?order_id=5551234").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Order not found.");
}

#[tokio::test]
async fn test_network_failure_is_internal_error() {
    // Bind and release a port so nothing is listening on it.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();

    let (status, _, body) = get(
        app_with(&format!("http://{addr}"), None),
        "/pay-balance?order_id=5551234",
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal Server Error");
}

#[tokio::test]
async fn test_proxy_signature_is_enforced_when_secret_set() {
    let server = MockServer::start().await;
    mount_order(&server, partially_paid()).await;
    Mock::given(method("POST"))
        .and(path(INVOICE_PATH))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    let secret = || Some(AppProxyConfig::new(b"hush".to_vec()));
    let app = |s| app_with(&server.uri(), s);

    let (status, _, _) = get(app(secret()), "/apps/pay-balance?order_id=5551234").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let query = format!(
        "order_id=5551234&shop=test-shop.myshopify.com&timestamp={}",
        time::OffsetDateTime::now_utc().unix_timestamp()
    );
    let signed = format!("{query}&signature={}", sign_query(&query, b"hush"));
    let (status, _, _) = get(app(secret()), &format!("/apps/pay-balance?{signed}")).await;
    assert_eq!(status, StatusCode::OK);

    // Routes that do not ask for it stay open.
    let (status, _, _) = get(app(secret()), "/pay-balance?order_id=5551234").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_and_inject_script() {
    let server = MockServer::start().await;

    let (status, _, body) = get(app(&server), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["status"], "healthy");

    let (status, content_type, body) = get(app(&server), "/inject-script.js").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("application/javascript"));
    assert!(body.contains("/apps/pay-balance?order_id="));
}
