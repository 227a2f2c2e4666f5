//! Tests for the drone category endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use skyrace::{
    controller::category::{
        create_category, delete_category, get_category, list_categories,
        partial_update_category, update_category,
    },
    model::api::{
        ApiVersion, DroneCategoryListParams, DroneCategoryPatch, DroneCategoryPayload,
    },
};
use skyrace_test_utils::{fixtures::insert_category, TestError};

use crate::setup::{body_json, into_response, test_state};

/// Ensure we can create a new drone category and then retrieve it
#[tokio::test]
async fn post_and_get_drone_category() -> Result<(), TestError> {
    let state = test_state().await?;

    let result = create_category(
        State(state.clone()),
        Extension(ApiVersion::V1),
        Json(DroneCategoryPayload {
            name: "Hexacopter".to_string(),
        }),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Hexacopter");
    let id = body["id"].as_i64().unwrap() as i32;
    assert_eq!(
        body["url"],
        format!("/api/v1/drone/drone-categories/{}", id)
    );

    let result = get_category(State(state), Extension(ApiVersion::V1), Path(id)).await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Hexacopter");

    Ok(())
}

/// Ensure a duplicate name is rejected with a validation error
#[tokio::test]
async fn post_existing_drone_category_name() -> Result<(), TestError> {
    let state = test_state().await?;

    insert_category(&state.db, "Octocopter").await?;

    let result = create_category(
        State(state),
        Extension(ApiVersion::V1),
        Json(DroneCategoryPayload {
            name: "Octocopter".to_string(),
        }),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "drone category with this name already exists.");

    Ok(())
}

/// Ensure the name filter only returns exact matches
#[tokio::test]
async fn filter_drone_category_by_name() -> Result<(), TestError> {
    let state = test_state().await?;

    insert_category(&state.db, "Hexacopter").await?;
    insert_category(&state.db, "Octocopter").await?;

    let params = DroneCategoryListParams {
        name: Some("Hexacopter".to_string()),
        ..Default::default()
    };
    let result = list_categories(State(state), Extension(ApiVersion::V1), Query(params)).await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["results"][0]["name"], "Hexacopter");

    Ok(())
}

/// Ensure list responses carry the pagination envelope
#[tokio::test]
async fn paginated_drone_category_list() -> Result<(), TestError> {
    let state = test_state().await?;

    for name in ["A", "B", "C", "D", "E"] {
        insert_category(&state.db, name).await?;
    }

    let result = list_categories(
        State(state.clone()),
        Extension(ApiVersion::V1),
        Query(DroneCategoryListParams::default()),
    )
    .await;

    let response = into_response(result);
    let body = body_json(response).await;
    assert_eq!(body["count"], 5);
    assert_eq!(body["results"].as_array().unwrap().len(), 4);
    assert_eq!(
        body["next"],
        "/api/v1/drone/drone-categories?limit=4&offset=4"
    );
    assert!(body["previous"].is_null());

    let params = DroneCategoryListParams {
        offset: Some(4),
        ..Default::default()
    };
    let result = list_categories(State(state), Extension(ApiVersion::V1), Query(params)).await;

    let body = body_json(into_response(result)).await;
    assert_eq!(body["results"].as_array().unwrap().len(), 1);
    assert!(body["next"].is_null());
    assert_eq!(
        body["previous"],
        "/api/v1/drone/drone-categories?limit=4&offset=0"
    );

    Ok(())
}

/// Ensure PUT and PATCH both rename, and renaming onto a taken name fails
#[tokio::test]
async fn update_drone_category_name() -> Result<(), TestError> {
    let state = test_state().await?;

    let category = insert_category(&state.db, "Hexacopter").await?;
    insert_category(&state.db, "Octocopter").await?;

    let result = update_category(
        State(state.clone()),
        Extension(ApiVersion::V1),
        Path(category.id),
        Json(DroneCategoryPayload {
            name: "Quadcopter".to_string(),
        }),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Quadcopter");

    let result = partial_update_category(
        State(state.clone()),
        Extension(ApiVersion::V1),
        Path(category.id),
        Json(DroneCategoryPatch {
            name: Some("Octocopter".to_string()),
        }),
    )
    .await;

    let response = into_response(result);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Ensure delete removes the category and a second delete is a 404
#[tokio::test]
async fn delete_drone_category() -> Result<(), TestError> {
    let state = test_state().await?;

    let category = insert_category(&state.db, "Hexacopter").await?;

    let result = delete_category(State(state.clone()), Path(category.id)).await;
    assert_eq!(into_response(result).status(), StatusCode::NO_CONTENT);

    let result = delete_category(State(state.clone()), Path(category.id)).await;
    assert_eq!(into_response(result).status(), StatusCode::NOT_FOUND);

    let result = get_category(State(state), Extension(ApiVersion::V1), Path(category.id)).await;
    assert_eq!(into_response(result).status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Ensure category detail links its drones
#[tokio::test]
async fn drone_category_links_related_drones() -> Result<(), TestError> {
    let state = test_state().await?;

    let category = insert_category(&state.db, "Hexacopter").await?;
    let owner = skyrace_test_utils::fixtures::insert_user(&state.db, "dronepilot").await?;
    let drone =
        skyrace_test_utils::fixtures::insert_drone(&state.db, "Atom", category.id, owner.id)
            .await?;

    let result = get_category(
        State(state),
        Extension(ApiVersion::V2),
        Path(category.id),
    )
    .await;

    let body = body_json(into_response(result)).await;
    assert_eq!(
        body["drones"][0],
        format!("/api/v2/drone/vehicles/{}", drone.id)
    );

    Ok(())
}
