//! Router-level tests exercising the full middleware stack over both
//! versioned trees.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use skyrace::{model::app::AppState, throttle::ThrottleRegistry};
use skyrace_test_utils::{fixtures::insert_category, TestError};
use tower::ServiceExt;

use crate::setup::{body_json, test_state};

fn app(state: AppState) -> Router {
    skyrace::router::routes()
        .with_state(state.clone())
        .layer(axum::middleware::from_fn_with_state(
            state,
            skyrace::throttle::throttle_requests,
        ))
}

/// Ensure the API root lists version-correct collection links
#[tokio::test]
async fn api_root_links_per_version() -> Result<(), TestError> {
    let state = test_state().await?;
    let app = app(state);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/drone")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["drone-categories"], "/api/v1/drone/drone-categories");
    assert_eq!(body["drones"], "/api/v1/drone/drones");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v2/drone")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["drone-categories"], "/api/v2/drone/vehicle-categories");
    assert_eq!(body["drones"], "/api/v2/drone/vehicles");

    Ok(())
}

/// Ensure the v2 tree serves categories under the renamed segment
#[tokio::test]
async fn v2_serves_vehicle_categories() -> Result<(), TestError> {
    let state = test_state().await?;
    insert_category(&state.db, "Hexacopter").await?;
    let app = app(state);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v2/drone/vehicle-categories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
    assert!(body["results"][0]["url"]
        .as_str()
        .unwrap()
        .starts_with("/api/v2/drone/vehicle-categories/"));

    // The v1 spelling is not mounted on the v2 tree
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v2/drone/drone-categories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Ensure requests over the drone scope's rate budget are throttled
#[tokio::test]
async fn drone_requests_are_throttled() -> Result<(), TestError> {
    let mut state = test_state().await?;
    state.throttle = Arc::new(ThrottleRegistry::new(1, 1));
    let app = app(state);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/drone/drones")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/drone/drones")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Request was throttled.");

    // Unthrottled scopes are unaffected
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/drone/competitions")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

/// Ensure a malformed Authorization header is rejected outright
#[tokio::test]
async fn malformed_token_header_is_rejected() -> Result<(), TestError> {
    let state = test_state().await?;
    let app = app(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/drone/pilots")
                .header("Authorization", "Bearer not-a-token-scheme")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid token header.");

    Ok(())
}
