//! Integration tests for the reminder dispatch endpoint.
//!
//! The test pool points at a closed port and connects lazily, so an
//! unauthorized request that returned anything but 401 here would have had
//! to touch the store and fail with a 500 -- the assertions below therefore
//! also pin the "no store reads before auth" contract.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, build_test_app, TEST_SECRET};
use tower::ServiceExt;

fn dispatch_request(secret: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/reminders/dispatch");
    if let Some(secret) = secret {
        builder = builder.header("x-reminders-secret", secret);
    }
    builder.body(Body::empty()).unwrap()
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_secret_is_unauthorized() {
    let response = build_test_app()
        .oneshot(dispatch_request(None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "unauthorized");
}

#[tokio::test]
async fn wrong_secret_is_unauthorized() {
    let response = build_test_app()
        .oneshot(dispatch_request(Some("not-the-secret")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "unauthorized");
}

// ---------------------------------------------------------------------------
// Fetch failure semantics
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failure_after_valid_secret_is_a_server_error() {
    let response = build_test_app()
        .oneshot(dispatch_request(Some(TEST_SECRET)))
        .await
        .unwrap();

    // Auth passed, the store fetch failed: the whole batch fails.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(response).await["error"].is_string());
}
