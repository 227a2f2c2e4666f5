use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    controller::util::get_user::get_user_from_token,
    error::Error,
    model::{
        api::{ApiVersion, ErrorDto, Page, PilotDto, PilotListParams, PilotPatch, PilotPayload},
        app::AppState,
    },
    service::pilot::PilotService,
};

pub static PILOT_TAG: &str = "pilots";

/// List pilots with optional filter, search, and ordering
///
/// Every pilot operation requires token authentication.
#[utoipa::path(
    get,
    path = "/api/v1/drone/pilots",
    tag = PILOT_TAG,
    params(PilotListParams),
    responses(
        (status = 200, description = "Page of pilots", body = Page<PilotDto>),
        (status = 400, description = "Invalid gender choice", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
)]
pub async fn list_pilots(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    headers: HeaderMap,
    Query(params): Query<PilotListParams>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_token(&state, &headers).await?;

    let page = PilotService::new(&state.db).list(&params, version).await?;

    Ok((StatusCode::OK, Json(page)).into_response())
}

/// Create a new pilot
#[utoipa::path(
    post,
    path = "/api/v1/drone/pilots",
    tag = PILOT_TAG,
    request_body = PilotPayload,
    responses(
        (status = 201, description = "Pilot created", body = PilotDto),
        (status = 400, description = "Name already taken or invalid gender", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto)
    ),
)]
pub async fn create_pilot(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    headers: HeaderMap,
    Json(payload): Json<PilotPayload>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_token(&state, &headers).await?;

    let pilot = PilotService::new(&state.db).create(&payload, version).await?;

    Ok((StatusCode::CREATED, Json(pilot)).into_response())
}

/// Retrieve a single pilot with their competitions
#[utoipa::path(
    get,
    path = "/api/v1/drone/pilots/{id}",
    tag = PILOT_TAG,
    params(("id" = i32, Path, description = "Pilot id")),
    responses(
        (status = 200, description = "The pilot", body = PilotDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Pilot not found", body = ErrorDto)
    ),
)]
pub async fn get_pilot(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_token(&state, &headers).await?;

    let pilot = PilotService::new(&state.db)
        .get(id, version)
        .await?
        .ok_or(Error::NotFound)?;

    Ok((StatusCode::OK, Json(pilot)).into_response())
}

/// Replace a pilot
#[utoipa::path(
    put,
    path = "/api/v1/drone/pilots/{id}",
    tag = PILOT_TAG,
    params(("id" = i32, Path, description = "Pilot id")),
    request_body = PilotPayload,
    responses(
        (status = 200, description = "The updated pilot", body = PilotDto),
        (status = 400, description = "Name already taken or invalid gender", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Pilot not found", body = ErrorDto)
    ),
)]
pub async fn update_pilot(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(payload): Json<PilotPayload>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_token(&state, &headers).await?;

    let pilot = PilotService::new(&state.db)
        .update(id, &payload, version)
        .await?
        .ok_or(Error::NotFound)?;

    Ok((StatusCode::OK, Json(pilot)).into_response())
}

/// Update individual pilot fields
#[utoipa::path(
    patch,
    path = "/api/v1/drone/pilots/{id}",
    tag = PILOT_TAG,
    params(("id" = i32, Path, description = "Pilot id")),
    request_body = PilotPatch,
    responses(
        (status = 200, description = "The updated pilot", body = PilotDto),
        (status = 400, description = "Name already taken or invalid gender", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Pilot not found", body = ErrorDto)
    ),
)]
pub async fn partial_update_pilot(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(patch): Json<PilotPatch>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_token(&state, &headers).await?;

    let pilot = PilotService::new(&state.db)
        .partial_update(id, &patch, version)
        .await?
        .ok_or(Error::NotFound)?;

    Ok((StatusCode::OK, Json(pilot)).into_response())
}

/// Delete a pilot
#[utoipa::path(
    delete,
    path = "/api/v1/drone/pilots/{id}",
    tag = PILOT_TAG,
    params(("id" = i32, Path, description = "Pilot id")),
    responses(
        (status = 204, description = "Pilot deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Pilot not found", body = ErrorDto)
    ),
)]
pub async fn delete_pilot(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_token(&state, &headers).await?;

    if !PilotService::new(&state.db).delete(id).await? {
        return Err(Error::NotFound);
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}
