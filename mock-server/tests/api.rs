use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::Value;
use tower::ServiceExt;

// base64("foo:foo")
const AUTH: &str = "Basic Zm9vOmZvbw==";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn authed(method: &str, uri: &str) -> http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, AUTH)
        .header("Accept-Version", "1.0.0")
}

fn get_request(uri: &str) -> Request<String> {
    authed("GET", uri).body(String::new()).unwrap()
}

fn json_request(uri: &str, body: &str) -> Request<String> {
    authed("PUT", uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<String> {
    authed("PUT", uri)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_basic_auth_returns_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/carrier/foo")
                .header("Accept-Version", "1.0.0")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_api_version_returns_400() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/api/carrier/foo")
                .header(http::header::AUTHORIZATION, AUTH)
                .header("Accept-Version", "0.9.0")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- fetch ---

#[tokio::test]
async fn get_carrier_returns_seeded_document() {
    let resp = app().oneshot(get_request("/api/carrier/foo")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let carrier = body_json(resp).await;
    assert_eq!(carrier["carrier_id"], "foo");
    assert_eq!(carrier["type"]["ltl"], true);
}

#[tokio::test]
async fn get_carrier_err_returns_500() {
    let resp = app().oneshot(get_request("/api/carrier/err")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn get_unknown_customer_returns_404() {
    let resp = app().oneshot(get_request("/api/customer/nobody")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_negative_shipment_returns_500() {
    let resp = app().oneshot(get_request("/api/shipment/-1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn get_address_error_returns_500() {
    let resp = app().oneshot(get_request("/api/address/error")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn get_custom_fields_for_known_parent() {
    let resp = app().oneshot(get_request("/api/customfield/shipment")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let fields = body_json(resp).await;
    assert_eq!(fields["parent"], "shipment");
    assert_eq!(fields["fields"][0]["name"], "Region");
}

#[tokio::test]
async fn get_custom_fields_for_unknown_parent_returns_500() {
    let resp = app().oneshot(get_request("/api/customfield/testerror")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// --- save ---

#[tokio::test]
async fn save_without_envelope_returns_400() {
    let resp = app()
        .oneshot(json_request("/api/carrier/foo", r#"{"carrier_id":"foo"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn save_badgateway_returns_502() {
    let resp = app()
        .oneshot(json_request("/api/carrier/badgateway", r#"{"carrier":{}}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

// --- shipment updates ---

#[tokio::test]
async fn lock_requires_boolean_parameter() {
    let resp = app()
        .oneshot(form_request("/api/shipment/readonly/0", "readonly=yes"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn status_on_negative_shipment_returns_500() {
    let resp = app()
        .oneshot(form_request("/api/shipment/status/-1", "status=Archived"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// --- full save/lock/status lifecycle ---

#[tokio::test]
async fn shipment_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // save a replacement document
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "/api/shipment/0",
            r#"{"shipment":{"shipment_id":"0","mode":"LTL"}}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // lock it
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request("/api/shipment/readonly/0", "readonly=true"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // move it along
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(form_request("/api/shipment/status/0", "status=Out+for+Delivery"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // read back
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/api/shipment/0"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let shipment = body_json(resp).await;
    assert_eq!(shipment["mode"], "LTL");
    assert_eq!(shipment["read_only"], true);
    assert_eq!(shipment["status"], "Out for Delivery");
    assert!(shipment.get("items").is_none(), "save replaces the whole document");
}
