//! Tests for the pilot endpoints, which require token authentication on
//! every operation.

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use chrono::NaiveDate;
use skyrace::{
    controller::pilot::{create_pilot, get_pilot, list_pilots, partial_update_pilot},
    model::api::{ApiVersion, PilotListParams, PilotPatch, PilotPayload},
};
use skyrace_test_utils::{
    fixtures::{
        insert_category, insert_competition, insert_drone, insert_pilot, insert_token,
        insert_user,
    },
    TestError,
};

use crate::setup::{body_json, into_response, test_state, token_headers};

async fn authenticated_state() -> Result<(skyrace::model::app::AppState, HeaderMap), TestError> {
    let state = test_state().await?;
    let user = insert_user(&state.db, "dronepilot").await?;
    let token = insert_token(&state.db, user.id, &"a".repeat(40)).await?;

    Ok((state, token_headers(&token.key)))
}

/// Ensure pilots cannot be listed without a token
#[tokio::test]
async fn list_pilots_requires_token() -> Result<(), TestError> {
    let state = test_state().await?;

    let result = list_pilots(
        State(state),
        Extension(ApiVersion::V1),
        HeaderMap::new(),
        Query(PilotListParams::default()),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Authentication credentials were not provided.");

    Ok(())
}

/// Ensure a pilot can be created with a token and defaults applied
#[tokio::test]
async fn create_pilot_with_defaults() -> Result<(), TestError> {
    let (state, headers) = authenticated_state().await?;

    let result = create_pilot(
        State(state),
        Extension(ApiVersion::V1),
        headers,
        Json(PilotPayload {
            name: "Penelope".to_string(),
            gender: None,
            races_count: None,
        }),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Penelope");
    assert_eq!(body["gender"], "M");
    assert_eq!(body["gender_description"], "Male");
    assert_eq!(body["races_count"], 0);
    assert_eq!(body["competitions"].as_array().unwrap().len(), 0);

    Ok(())
}

/// Ensure an unknown gender code is a validation error
#[tokio::test]
async fn create_pilot_with_invalid_gender() -> Result<(), TestError> {
    let (state, headers) = authenticated_state().await?;

    let result = create_pilot(
        State(state),
        Extension(ApiVersion::V1),
        headers,
        Json(PilotPayload {
            name: "Penelope".to_string(),
            gender: Some("X".to_string()),
            races_count: None,
        }),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "\"X\" is not a valid choice.");

    Ok(())
}

/// Ensure the gender filter narrows the listing
#[tokio::test]
async fn filter_pilots_by_gender() -> Result<(), TestError> {
    let (state, headers) = authenticated_state().await?;

    // Fixture pilots are male
    insert_pilot(&state.db, "Gaston", 2).await?;
    insert_pilot(&state.db, "Guido", 4).await?;

    let params = PilotListParams {
        gender: Some("F".to_string()),
        ..Default::default()
    };
    let result = list_pilots(
        State(state.clone()),
        Extension(ApiVersion::V1),
        headers.clone(),
        Query(params),
    )
    .await;

    let body = body_json(into_response(result)).await;
    assert_eq!(body["count"], 0);

    let params = PilotListParams {
        gender: Some("M".to_string()),
        ..Default::default()
    };
    let result = list_pilots(State(state), Extension(ApiVersion::V1), headers, Query(params)).await;

    let body = body_json(into_response(result)).await;
    assert_eq!(body["count"], 2);

    Ok(())
}

/// Ensure a pilot detail nests the competitions they flew
#[tokio::test]
async fn pilot_detail_nests_competitions() -> Result<(), TestError> {
    let (state, headers) = authenticated_state().await?;

    let category = insert_category(&state.db, "Quadcopter").await?;
    let owner = insert_user(&state.db, "owner").await?;
    let drone = insert_drone(&state.db, "Atom", category.id, owner.id).await?;
    let pilot = insert_pilot(&state.db, "Penelope", 1).await?;

    let date = NaiveDate::from_ymd_opt(2022, 10, 20)
        .unwrap()
        .and_hms_opt(15, 0, 0)
        .unwrap();
    insert_competition(&state.db, pilot.id, drone.id, 800, date).await?;

    let result = get_pilot(State(state), Extension(ApiVersion::V1), headers, Path(pilot.id)).await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let competitions = body["competitions"].as_array().unwrap();
    assert_eq!(competitions.len(), 1);
    assert_eq!(competitions[0]["drone"], "Atom");
    assert_eq!(competitions[0]["pilot"], "Penelope");
    assert_eq!(competitions[0]["distance_in_feet"], 800);

    Ok(())
}

/// Ensure a single field can be updated with PATCH
#[tokio::test]
async fn patch_pilot_races_count() -> Result<(), TestError> {
    let (state, headers) = authenticated_state().await?;

    let pilot = insert_pilot(&state.db, "Penelope", 1).await?;

    let result = partial_update_pilot(
        State(state),
        Extension(ApiVersion::V1),
        headers,
        Path(pilot.id),
        Json(PilotPatch {
            races_count: Some(2),
            ..Default::default()
        }),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["races_count"], 2);
    assert_eq!(body["name"], "Penelope");

    Ok(())
}
