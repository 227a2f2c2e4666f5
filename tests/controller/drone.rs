//! Tests for the drone endpoints, including ownership permissions.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use chrono::NaiveDate;
use skyrace::{
    controller::drone::{
        create_drone, delete_drone, get_drone, list_drones, partial_update_drone, update_drone,
    },
    model::api::{ApiVersion, DroneListParams, DronePatch, DronePayload},
};
use skyrace_test_utils::{
    fixtures::{insert_category, insert_drone, insert_token, insert_user},
    TestError,
};

use crate::setup::{body_json, into_response, test_state, token_headers};

fn drone_payload(name: &str, category: &str) -> DronePayload {
    DronePayload {
        name: name.to_string(),
        drone_category: category.to_string(),
        manufacturing_date: NaiveDate::from_ymd_opt(2022, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
        has_it_competed: None,
    }
}

/// Ensure anonymous clients cannot create drones
#[tokio::test]
async fn create_drone_requires_authentication() -> Result<(), TestError> {
    let state = test_state().await?;

    insert_category(&state.db, "Quadcopter").await?;

    let result = create_drone(
        State(state),
        Extension(ApiVersion::V1),
        HeaderMap::new(),
        Json(drone_payload("Atom", "Quadcopter")),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Authentication credentials were not provided.");

    Ok(())
}

/// Ensure the authenticated user becomes the drone's owner
#[tokio::test]
async fn create_drone_assigns_request_user_as_owner() -> Result<(), TestError> {
    let state = test_state().await?;

    insert_category(&state.db, "Quadcopter").await?;
    let user = insert_user(&state.db, "dronepilot").await?;
    let token = insert_token(&state.db, user.id, &"a".repeat(40)).await?;

    let result = create_drone(
        State(state),
        Extension(ApiVersion::V1),
        token_headers(&token.key),
        Json(drone_payload("Atom", "Quadcopter")),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["owner"], "dronepilot");
    assert_eq!(body["drone_category"], "Quadcopter");
    assert_eq!(body["has_it_competed"], false);

    Ok(())
}

/// Ensure an unknown category name is a validation error
#[tokio::test]
async fn create_drone_with_unknown_category() -> Result<(), TestError> {
    let state = test_state().await?;

    let user = insert_user(&state.db, "dronepilot").await?;
    let token = insert_token(&state.db, user.id, &"a".repeat(40)).await?;

    let result = create_drone(
        State(state),
        Extension(ApiVersion::V1),
        token_headers(&token.key),
        Json(drone_payload("Atom", "Ghostcopter")),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Object with name=Ghostcopter does not exist.");

    Ok(())
}

/// Ensure only the owner can update a drone
#[tokio::test]
async fn update_drone_rejects_non_owner() -> Result<(), TestError> {
    let state = test_state().await?;

    let category = insert_category(&state.db, "Quadcopter").await?;
    let owner = insert_user(&state.db, "owner").await?;
    let drone = insert_drone(&state.db, "Atom", category.id, owner.id).await?;

    let intruder = insert_user(&state.db, "intruder").await?;
    let token = insert_token(&state.db, intruder.id, &"b".repeat(40)).await?;

    let result = update_drone(
        State(state),
        Extension(ApiVersion::V1),
        token_headers(&token.key),
        Path(drone.id),
        Json(drone_payload("Stolen", "Quadcopter")),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "You do not have permission to perform this action."
    );

    Ok(())
}

/// Ensure the owner can flip a single field with PATCH
#[tokio::test]
async fn owner_can_patch_has_it_competed() -> Result<(), TestError> {
    let state = test_state().await?;

    let category = insert_category(&state.db, "Quadcopter").await?;
    let owner = insert_user(&state.db, "owner").await?;
    let drone = insert_drone(&state.db, "Atom", category.id, owner.id).await?;
    let token = insert_token(&state.db, owner.id, &"a".repeat(40)).await?;

    let result = partial_update_drone(
        State(state),
        Extension(ApiVersion::V1),
        token_headers(&token.key),
        Path(drone.id),
        Json(DronePatch {
            has_it_competed: Some(true),
            ..Default::default()
        }),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["has_it_competed"], true);
    assert_eq!(body["name"], "Atom");

    Ok(())
}

/// Ensure anonymous reads work but an invalid token is still rejected
#[tokio::test]
async fn list_drones_is_readable_anonymously() -> Result<(), TestError> {
    let state = test_state().await?;

    let category = insert_category(&state.db, "Quadcopter").await?;
    let owner = insert_user(&state.db, "owner").await?;
    insert_drone(&state.db, "Atom", category.id, owner.id).await?;

    let result = list_drones(
        State(state.clone()),
        Extension(ApiVersion::V1),
        HeaderMap::new(),
        Query(DroneListParams::default()),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["count"], 1);

    let result = list_drones(
        State(state),
        Extension(ApiVersion::V1),
        token_headers(&"f".repeat(40)),
        Query(DroneListParams::default()),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid token.");

    Ok(())
}

/// Ensure the starts-with search narrows the listing
#[tokio::test]
async fn search_drones_by_name_prefix() -> Result<(), TestError> {
    let state = test_state().await?;

    let category = insert_category(&state.db, "Quadcopter").await?;
    let owner = insert_user(&state.db, "owner").await?;
    insert_drone(&state.db, "Atom", category.id, owner.id).await?;
    insert_drone(&state.db, "Atomizer", category.id, owner.id).await?;
    insert_drone(&state.db, "Bolt", category.id, owner.id).await?;

    let params = DroneListParams {
        search: Some("Atom".to_string()),
        ..Default::default()
    };
    let result = list_drones(
        State(state),
        Extension(ApiVersion::V1),
        HeaderMap::new(),
        Query(params),
    )
    .await;

    let body = body_json(into_response(result)).await;
    assert_eq!(body["count"], 2);

    Ok(())
}

/// Ensure the owner can delete their drone, after which it is gone
#[tokio::test]
async fn owner_can_delete_drone() -> Result<(), TestError> {
    let state = test_state().await?;

    let category = insert_category(&state.db, "Quadcopter").await?;
    let owner = insert_user(&state.db, "owner").await?;
    let drone = insert_drone(&state.db, "Atom", category.id, owner.id).await?;
    let token = insert_token(&state.db, owner.id, &"a".repeat(40)).await?;

    let result = delete_drone(
        State(state.clone()),
        token_headers(&token.key),
        Path(drone.id),
    )
    .await;
    assert_eq!(into_response(result).status(), StatusCode::NO_CONTENT);

    let result = get_drone(
        State(state),
        Extension(ApiVersion::V1),
        HeaderMap::new(),
        Path(drone.id),
    )
    .await;
    assert_eq!(into_response(result).status(), StatusCode::NOT_FOUND);

    Ok(())
}
