//! Tests for the competition endpoints and their related-name resolution.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{NaiveDate, NaiveDateTime};
use skyrace::{
    controller::competition::{
        create_competition, delete_competition, list_competitions, partial_update_competition,
    },
    model::api::{ApiVersion, CompetitionListParams, CompetitionPatch, CompetitionPayload},
};
use skyrace_test_utils::{
    fixtures::{insert_category, insert_competition, insert_drone, insert_pilot, insert_user},
    TestError,
};

use crate::setup::{body_json, into_response, test_state};

fn achievement_date(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 10, day)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

async fn state_with_entrants() -> Result<skyrace::model::app::AppState, TestError> {
    let state = test_state().await?;

    let category = insert_category(&state.db, "Quadcopter").await?;
    let owner = insert_user(&state.db, "owner").await?;
    insert_drone(&state.db, "Atom", category.id, owner.id).await?;
    insert_pilot(&state.db, "Penelope", 0).await?;

    Ok(state)
}

/// Ensure a competition is created by referencing drone and pilot names
#[tokio::test]
async fn create_competition_by_names() -> Result<(), TestError> {
    let state = state_with_entrants().await?;

    let result = create_competition(
        State(state),
        Extension(ApiVersion::V1),
        Json(CompetitionPayload {
            distance_in_feet: 800,
            distance_achievement_date: achievement_date(20),
            drone: "Atom".to_string(),
            pilot: "Penelope".to_string(),
        }),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["drone"], "Atom");
    assert_eq!(body["pilot"], "Penelope");
    assert_eq!(body["distance_in_feet"], 800);

    Ok(())
}

/// Ensure an unknown drone name is a validation error
#[tokio::test]
async fn create_competition_with_unknown_drone() -> Result<(), TestError> {
    let state = state_with_entrants().await?;

    let result = create_competition(
        State(state),
        Extension(ApiVersion::V1),
        Json(CompetitionPayload {
            distance_in_feet: 800,
            distance_achievement_date: achievement_date(20),
            drone: "Ghost".to_string(),
            pilot: "Penelope".to_string(),
        }),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Object with name=Ghost does not exist.");

    Ok(())
}

/// Ensure distance bounds and related-name filters narrow the listing
#[tokio::test]
async fn filter_competitions() -> Result<(), TestError> {
    let state = state_with_entrants().await?;

    let drone = skyrace::data::drone::DroneRepository::new(&state.db)
        .find_by_name("Atom")
        .await?
        .unwrap();
    let pilot = skyrace::data::pilot::PilotRepository::new(&state.db)
        .find_by_name("Penelope")
        .await?
        .unwrap();

    insert_competition(&state.db, pilot.id, drone.id, 500, achievement_date(1)).await?;
    insert_competition(&state.db, pilot.id, drone.id, 800, achievement_date(10)).await?;
    insert_competition(&state.db, pilot.id, drone.id, 2000, achievement_date(20)).await?;

    let params = CompetitionListParams {
        min_distance_in_feet: Some(600),
        max_distance_in_feet: Some(1000),
        ..Default::default()
    };
    let result = list_competitions(
        State(state.clone()),
        Extension(ApiVersion::V1),
        Query(params),
    )
    .await;

    let body = body_json(into_response(result)).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["distance_in_feet"], 800);

    let params = CompetitionListParams {
        from_achievement_date: Some(achievement_date(15)),
        pilot_name: Some("Penelope".to_string()),
        ..Default::default()
    };
    let result = list_competitions(
        State(state.clone()),
        Extension(ApiVersion::V1),
        Query(params),
    )
    .await;

    let body = body_json(into_response(result)).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["distance_in_feet"], 2000);

    let params = CompetitionListParams {
        drone_name: Some("Ghost".to_string()),
        ..Default::default()
    };
    let result = list_competitions(State(state), Extension(ApiVersion::V1), Query(params)).await;

    let body = body_json(into_response(result)).await;
    assert_eq!(body["count"], 0);

    Ok(())
}

/// Ensure a single field can be updated with PATCH
#[tokio::test]
async fn patch_competition_distance() -> Result<(), TestError> {
    let state = state_with_entrants().await?;

    let drone = skyrace::data::drone::DroneRepository::new(&state.db)
        .find_by_name("Atom")
        .await?
        .unwrap();
    let pilot = skyrace::data::pilot::PilotRepository::new(&state.db)
        .find_by_name("Penelope")
        .await?
        .unwrap();
    let competition =
        insert_competition(&state.db, pilot.id, drone.id, 500, achievement_date(1)).await?;

    let result = partial_update_competition(
        State(state),
        Extension(ApiVersion::V1),
        Path(competition.id),
        Json(CompetitionPatch {
            distance_in_feet: Some(900),
            ..Default::default()
        }),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["distance_in_feet"], 900);
    assert_eq!(body["drone"], "Atom");

    Ok(())
}

/// Ensure delete removes the competition
#[tokio::test]
async fn delete_competition_then_404() -> Result<(), TestError> {
    let state = state_with_entrants().await?;

    let drone = skyrace::data::drone::DroneRepository::new(&state.db)
        .find_by_name("Atom")
        .await?
        .unwrap();
    let pilot = skyrace::data::pilot::PilotRepository::new(&state.db)
        .find_by_name("Penelope")
        .await?
        .unwrap();
    let competition =
        insert_competition(&state.db, pilot.id, drone.id, 500, achievement_date(1)).await?;

    let result = delete_competition(State(state.clone()), Path(competition.id)).await;
    assert_eq!(into_response(result).status(), StatusCode::NO_CONTENT);

    let result = delete_competition(State(state), Path(competition.id)).await;
    assert_eq!(into_response(result).status(), StatusCode::NOT_FOUND);

    Ok(())
}
