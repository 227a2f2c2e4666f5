//! Tests for registration and the token exchange endpoint.

use axum::{extract::State, http::StatusCode, Json};
use skyrace::{
    controller::auth::{obtain_token, register},
    model::api::CredentialsPayload,
};
use skyrace_test_utils::TestError;

use crate::setup::{body_json, into_response, test_state};

fn credentials(username: &str, password: &str) -> CredentialsPayload {
    CredentialsPayload {
        username: username.to_string(),
        password: password.to_string(),
    }
}

/// Ensure registering and exchanging credentials yields a stable token
#[tokio::test]
async fn register_and_obtain_token() -> Result<(), TestError> {
    let state = test_state().await?;

    let result = register(
        State(state.clone()),
        Json(credentials("dronepilot", "hunter2")),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["username"], "dronepilot");

    let result = obtain_token(
        State(state.clone()),
        Json(credentials("dronepilot", "hunter2")),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(token.len(), 40);

    // A repeated exchange returns the same key
    let result = obtain_token(State(state), Json(credentials("dronepilot", "hunter2"))).await;
    let body = body_json(into_response(result)).await;
    assert_eq!(body["token"], token);

    Ok(())
}

/// Ensure a duplicate username is rejected
#[tokio::test]
async fn register_duplicate_username() -> Result<(), TestError> {
    let state = test_state().await?;

    let result = register(
        State(state.clone()),
        Json(credentials("dronepilot", "hunter2")),
    )
    .await;
    assert_eq!(into_response(result).status(), StatusCode::CREATED);

    let result = register(State(state), Json(credentials("dronepilot", "other"))).await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "A user with that username already exists.");

    Ok(())
}

/// Ensure a wrong password does not yield a token
#[tokio::test]
async fn obtain_token_with_bad_password() -> Result<(), TestError> {
    let state = test_state().await?;

    let result = register(
        State(state.clone()),
        Json(credentials("dronepilot", "hunter2")),
    )
    .await;
    assert_eq!(into_response(result).status(), StatusCode::CREATED);

    let result = obtain_token(State(state), Json(credentials("dronepilot", "wrong"))).await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Unable to log in with provided credentials.");

    Ok(())
}
