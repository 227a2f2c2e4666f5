use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    controller::util::get_user::{get_user_from_token, maybe_user_from_token},
    error::Error,
    model::{
        api::{ApiVersion, DroneDto, DroneListParams, DronePatch, DronePayload, ErrorDto, Page},
        app::AppState,
    },
    service::drone::DroneService,
};

pub static DRONE_TAG: &str = "drones";

/// List drones with optional filter, search, and ordering
///
/// Reads are open to anonymous clients, but a presented token must be valid.
#[utoipa::path(
    get,
    path = "/api/v1/drone/drones",
    tag = DRONE_TAG,
    params(DroneListParams),
    responses(
        (status = 200, description = "Page of drones", body = Page<DroneDto>),
        (status = 401, description = "Invalid token", body = ErrorDto)
    ),
)]
pub async fn list_drones(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    headers: HeaderMap,
    Query(params): Query<DroneListParams>,
) -> Result<impl IntoResponse, Error> {
    maybe_user_from_token(&state, &headers).await?;

    let page = DroneService::new(&state.db).list(&params, version).await?;

    Ok((StatusCode::OK, Json(page)).into_response())
}

/// Create a new drone owned by the authenticated user
#[utoipa::path(
    post,
    path = "/api/v1/drone/drones",
    tag = DRONE_TAG,
    request_body = DronePayload,
    responses(
        (status = 201, description = "Drone created", body = DroneDto),
        (status = 400, description = "Name already taken or unknown category", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
)]
pub async fn create_drone(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    headers: HeaderMap,
    Json(payload): Json<DronePayload>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_token(&state, &headers).await?;

    let drone = DroneService::new(&state.db)
        .create(&user, &payload, version)
        .await?;

    Ok((StatusCode::CREATED, Json(drone)).into_response())
}

/// Retrieve a single drone
#[utoipa::path(
    get,
    path = "/api/v1/drone/drones/{id}",
    tag = DRONE_TAG,
    params(("id" = i32, Path, description = "Drone id")),
    responses(
        (status = 200, description = "The drone", body = DroneDto),
        (status = 401, description = "Invalid token", body = ErrorDto),
        (status = 404, description = "Drone not found", body = ErrorDto)
    ),
)]
pub async fn get_drone(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    maybe_user_from_token(&state, &headers).await?;

    let drone = DroneService::new(&state.db)
        .get(id, version)
        .await?
        .ok_or(Error::NotFound)?;

    Ok((StatusCode::OK, Json(drone)).into_response())
}

/// Replace a drone, owner only
#[utoipa::path(
    put,
    path = "/api/v1/drone/drones/{id}",
    tag = DRONE_TAG,
    params(("id" = i32, Path, description = "Drone id")),
    request_body = DronePayload,
    responses(
        (status = 200, description = "The updated drone", body = DroneDto),
        (status = 400, description = "Name already taken or unknown category", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Requesting user is not the owner", body = ErrorDto),
        (status = 404, description = "Drone not found", body = ErrorDto)
    ),
)]
pub async fn update_drone(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<DronePayload>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_token(&state, &headers).await?;

    let drone = DroneService::new(&state.db)
        .update(&user, id, &payload, version)
        .await?
        .ok_or(Error::NotFound)?;

    Ok((StatusCode::OK, Json(drone)).into_response())
}

/// Update individual drone fields, owner only
#[utoipa::path(
    patch,
    path = "/api/v1/drone/drones/{id}",
    tag = DRONE_TAG,
    params(("id" = i32, Path, description = "Drone id")),
    request_body = DronePatch,
    responses(
        (status = 200, description = "The updated drone", body = DroneDto),
        (status = 400, description = "Name already taken or unknown category", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Requesting user is not the owner", body = ErrorDto),
        (status = 404, description = "Drone not found", body = ErrorDto)
    ),
)]
pub async fn partial_update_drone(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(patch): Json<DronePatch>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_token(&state, &headers).await?;

    let drone = DroneService::new(&state.db)
        .partial_update(&user, id, &patch, version)
        .await?
        .ok_or(Error::NotFound)?;

    Ok((StatusCode::OK, Json(drone)).into_response())
}

/// Delete a drone, owner only
#[utoipa::path(
    delete,
    path = "/api/v1/drone/drones/{id}",
    tag = DRONE_TAG,
    params(("id" = i32, Path, description = "Drone id")),
    responses(
        (status = 204, description = "Drone deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Requesting user is not the owner", body = ErrorDto),
        (status = 404, description = "Drone not found", body = ErrorDto)
    ),
)]
pub async fn delete_drone(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_token(&state, &headers).await?;

    if !DroneService::new(&state.db).delete(&user, id).await? {
        return Err(Error::NotFound);
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}
