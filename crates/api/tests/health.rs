//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, get, FakePlatform};
use gtm_core::error::PlatformError;
use tower::ServiceExt;

fn unreachable_platform() -> Arc<FakePlatform> {
    Arc::new(FakePlatform::failing(PlatformError::Transport(
        "connection refused".into(),
    )))
}

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 even when the platform is unreachable
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_is_independent_of_platform() {
    let platform = unreachable_platform();
    let app = common::build_test_app(Arc::clone(&platform));
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "GTM Alpha Backend");
    assert!(json["version"].is_string());
    assert!(json["timestamp"].is_string());
    assert!(platform.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404 listing the available endpoints
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_lists_endpoints() {
    let app = common::build_test_app(unreachable_platform());
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Endpoint not found");
    let endpoints = json["availableEndpoints"].as_array().unwrap();
    assert_eq!(endpoints.len(), 4);
    assert!(endpoints
        .iter()
        .any(|e| e == "POST /api/gtm-consultation - GTM consultation"));
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app(unreachable_platform());
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // The value should be a UUID string (36 chars with hyphens).
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

// ---------------------------------------------------------------------------
// Test: CORS preflight from an allowed origin
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let app = common::build_test_app(unreachable_platform());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/gtm-consultation")
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    let allow_origin = headers
        .get("access-control-allow-origin")
        .expect("Missing Access-Control-Allow-Origin header")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:3000");

    let allow_methods = headers
        .get("access-control-allow-methods")
        .expect("Missing Access-Control-Allow-Methods header")
        .to_str()
        .unwrap();
    assert!(
        allow_methods.contains("POST"),
        "Allow-Methods should contain POST, got: {allow_methods}"
    );
}

// ---------------------------------------------------------------------------
// Test: CORS does not echo an unknown origin
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_rejects_unknown_origin() {
    let app = common::build_test_app(unreachable_platform());

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header("Origin", "https://evil.example")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .get("access-control-allow-origin")
        .is_none());
}
