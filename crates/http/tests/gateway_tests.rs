//! Integration tests for the session refresh gateway

#![cfg(feature = "client")]

use linkqr_core::QrListQuery;
use linkqr_http::client::{ClientError, GatewayOutcome, LinkQrClient, Navigator, RequestDescriptor};
use reqwest::Method;
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Clone, Default)]
struct RecordingNavigator {
    redirects: Arc<Mutex<Vec<String>>>,
}

impl RecordingNavigator {
    fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_login(&self, login_path: &str) {
        self.redirects.lock().unwrap().push(login_path.to_string());
    }
}

fn client_for(base_url: impl Into<String>, navigator: &RecordingNavigator) -> LinkQrClient {
    LinkQrClient::builder()
        .base_url(base_url)
        .navigator(navigator.clone())
        .build()
        .unwrap()
}

/// A base URL nothing listens on
fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn mount_refresh(server: &MockServer, status: u16, times: u64) {
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(status))
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_success_is_passed_through_without_refresh() {
    let server = MockServer::start().await;
    let navigator = RecordingNavigator::default();

    Mock::given(method("GET"))
        .and(path("/api/v1/qr/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5})))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, 200, 0).await;

    let client = client_for(server.uri(), &navigator);
    let outcome = client
        .request(&RequestDescriptor::get("/api/v1/qr/5"))
        .await
        .unwrap();

    let response = outcome.into_response().unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), r#"{"id":5}"#);
    assert!(navigator.redirects().is_empty());
}

#[tokio::test]
async fn test_other_error_statuses_are_not_intercepted() {
    let server = MockServer::start().await;
    let navigator = RecordingNavigator::default();

    for (route, status) in [("/api/v1/qr/1", 403), ("/api/v1/qr/2", 404), ("/api/v1/qr/3", 500)] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&server)
            .await;
    }
    mount_refresh(&server, 200, 0).await;

    let client = client_for(server.uri(), &navigator);
    for (route, status) in [("/api/v1/qr/1", 403), ("/api/v1/qr/2", 404), ("/api/v1/qr/3", 500)] {
        let response = client
            .request(&RequestDescriptor::get(route))
            .await
            .unwrap()
            .into_response()
            .unwrap();
        assert_eq!(response.status(), status);
    }
    assert!(navigator.redirects().is_empty());
}

#[tokio::test]
async fn test_unauthorized_then_refresh_retries_once() {
    let server = MockServer::start().await;
    let navigator = RecordingNavigator::default();

    Mock::given(method("GET"))
        .and(path("/api/v1/qr"))
        .respond_with(ResponseTemplate::new(401))
        .with_priority(1)
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/qr"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [{"id": 1}]})))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, 200, 1).await;

    let client = client_for(server.uri(), &navigator);
    let outcome = client
        .request(&RequestDescriptor::get("/api/v1/qr"))
        .await
        .unwrap();

    let response = outcome.into_response().unwrap();
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["items"][0]["id"], 1);
    assert!(navigator.redirects().is_empty());
}

#[tokio::test]
async fn test_failed_refresh_redirects_and_never_retries() {
    let server = MockServer::start().await;
    let navigator = RecordingNavigator::default();

    Mock::given(method("DELETE"))
        .and(path("/api/v1/qr"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, 403, 1).await;

    let client = client_for(server.uri(), &navigator);
    let outcome = client
        .request(&RequestDescriptor::delete("/api/v1/qr"))
        .await
        .unwrap();

    assert!(outcome.is_unauthenticated());
    assert_eq!(navigator.redirects(), vec!["/login".to_string()]);
}

#[tokio::test]
async fn test_refresh_transport_failure_counts_as_failed_refresh() {
    let server = MockServer::start().await;
    let navigator = RecordingNavigator::default();

    Mock::given(method("GET"))
        .and(path("/api/v1/qr"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    // The refresh endpoint lives under the base URL, which is unreachable;
    // the request itself targets the mock server directly.
    let client = LinkQrClient::builder()
        .base_url(unreachable_base_url())
        .login_path("/signin")
        .navigator(navigator.clone())
        .build()
        .unwrap();
    let outcome = client
        .request(&RequestDescriptor::get(format!("{}/api/v1/qr", server.uri())))
        .await
        .unwrap();

    assert!(matches!(outcome, GatewayOutcome::Unauthenticated));
    assert_eq!(navigator.redirects(), vec!["/signin".to_string()]);
}

#[tokio::test]
async fn test_retried_unauthorized_is_returned_as_is() {
    let server = MockServer::start().await;
    let navigator = RecordingNavigator::default();

    Mock::given(method("GET"))
        .and(path("/api/v1/qr"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    mount_refresh(&server, 204, 1).await;

    let client = client_for(server.uri(), &navigator);
    let response = client
        .request(&RequestDescriptor::get("/api/v1/qr"))
        .await
        .unwrap()
        .into_response()
        .unwrap();

    assert_eq!(response.status(), 401);
    assert!(navigator.redirects().is_empty());
}

#[tokio::test]
async fn test_retry_repeats_method_headers_and_body() {
    let server = MockServer::start().await;
    let navigator = RecordingNavigator::default();
    let body = json!({"content": "https://example.com", "title": "Menu"});

    Mock::given(method("POST"))
        .and(path("/api/v1/qr"))
        .and(header("content-type", "application/json"))
        .and(header("x-request-tag", "create-42"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(401))
        .with_priority(1)
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/qr"))
        .and(header("content-type", "application/json"))
        .and(header("x-request-tag", "create-42"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 42})))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, 200, 1).await;

    let client = client_for(server.uri(), &navigator);
    let descriptor = RequestDescriptor::post("/api/v1/qr")
        .header("X-Request-Tag", "create-42")
        .json(&body)
        .unwrap();
    let response = client
        .request(&descriptor)
        .await
        .unwrap()
        .into_response()
        .unwrap();

    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn test_caller_content_type_overrides_default() {
    let server = MockServer::start().await;
    let navigator = RecordingNavigator::default();

    Mock::given(method("PUT"))
        .and(path("/api/v1/raw"))
        .and(header("content-type", "text/plain"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(server.uri(), &navigator);
    let descriptor = RequestDescriptor::new("/api/v1/raw")
        .with_method(Method::PUT)
        .header("Content-Type", "text/plain")
        .body("hello");
    let response = client
        .request(&descriptor)
        .await
        .unwrap()
        .into_response()
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_primary_transport_failure_is_returned() {
    let navigator = RecordingNavigator::default();
    let client = client_for(unreachable_base_url(), &navigator);

    let result = client.request(&RequestDescriptor::get("/api/v1/qr")).await;

    assert!(matches!(result, Err(ClientError::Request(_))));
    assert!(navigator.redirects().is_empty());
}

#[tokio::test]
async fn test_invalid_header_fails_before_sending() {
    let server = MockServer::start().await;
    let navigator = RecordingNavigator::default();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(server.uri(), &navigator);
    let result = client
        .request(&RequestDescriptor::get("/api/v1/qr").header("bad header", "x"))
        .await;
    assert!(matches!(result, Err(ClientError::InvalidHeader(_))));
}

#[tokio::test]
async fn test_typed_helper_maps_unauthenticated() {
    let server = MockServer::start().await;
    let navigator = RecordingNavigator::default();

    Mock::given(method("GET"))
        .and(path("/api/v1/qr"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    mount_refresh(&server, 401, 1).await;

    let client = client_for(server.uri(), &navigator);
    let result = client.list_qr_codes(&QrListQuery::default()).await;

    assert!(matches!(result, Err(ClientError::Unauthenticated)));
    assert_eq!(navigator.redirects().len(), 1);
}

#[tokio::test]
async fn test_concurrent_unauthorized_requests_refresh_independently() {
    let server = MockServer::start().await;
    let navigator = RecordingNavigator::default();

    Mock::given(method("GET"))
        .and(path("/api/v1/qr"))
        .respond_with(ResponseTemplate::new(401))
        .expect(4)
        .mount(&server)
        .await;
    mount_refresh(&server, 200, 2).await;

    let client = client_for(server.uri(), &navigator);
    let descriptor = RequestDescriptor::get("/api/v1/qr");
    let (first, second) = tokio::join!(client.request(&descriptor), client.request(&descriptor));

    for outcome in [first.unwrap(), second.unwrap()] {
        assert_eq!(outcome.into_response().unwrap().status(), 401);
    }
}
