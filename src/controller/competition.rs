use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    error::Error,
    model::{
        api::{
            ApiVersion, CompetitionDto, CompetitionListParams, CompetitionPatch,
            CompetitionPayload, ErrorDto, Page,
        },
        app::AppState,
    },
    service::competition::CompetitionService,
};

pub static COMPETITION_TAG: &str = "competitions";

/// List competitions with optional filter and ordering
#[utoipa::path(
    get,
    path = "/api/v1/drone/competitions",
    tag = COMPETITION_TAG,
    params(CompetitionListParams),
    responses(
        (status = 200, description = "Page of competitions", body = Page<CompetitionDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_competitions(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    Query(params): Query<CompetitionListParams>,
) -> Result<impl IntoResponse, Error> {
    let page = CompetitionService::new(&state.db)
        .list(&params, version)
        .await?;

    Ok((StatusCode::OK, Json(page)).into_response())
}

/// Record a competition, referencing the drone and pilot by name
#[utoipa::path(
    post,
    path = "/api/v1/drone/competitions",
    tag = COMPETITION_TAG,
    request_body = CompetitionPayload,
    responses(
        (status = 201, description = "Competition recorded", body = CompetitionDto),
        (status = 400, description = "Unknown drone or pilot name", body = ErrorDto)
    ),
)]
pub async fn create_competition(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    Json(payload): Json<CompetitionPayload>,
) -> Result<impl IntoResponse, Error> {
    let competition = CompetitionService::new(&state.db)
        .create(&payload, version)
        .await?;

    Ok((StatusCode::CREATED, Json(competition)).into_response())
}

/// Retrieve a single competition
#[utoipa::path(
    get,
    path = "/api/v1/drone/competitions/{id}",
    tag = COMPETITION_TAG,
    params(("id" = i32, Path, description = "Competition id")),
    responses(
        (status = 200, description = "The competition", body = CompetitionDto),
        (status = 404, description = "Competition not found", body = ErrorDto)
    ),
)]
pub async fn get_competition(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let competition = CompetitionService::new(&state.db)
        .get(id, version)
        .await?
        .ok_or(Error::NotFound)?;

    Ok((StatusCode::OK, Json(competition)).into_response())
}

/// Replace a competition
#[utoipa::path(
    put,
    path = "/api/v1/drone/competitions/{id}",
    tag = COMPETITION_TAG,
    params(("id" = i32, Path, description = "Competition id")),
    request_body = CompetitionPayload,
    responses(
        (status = 200, description = "The updated competition", body = CompetitionDto),
        (status = 400, description = "Unknown drone or pilot name", body = ErrorDto),
        (status = 404, description = "Competition not found", body = ErrorDto)
    ),
)]
pub async fn update_competition(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    Path(id): Path<i32>,
    Json(payload): Json<CompetitionPayload>,
) -> Result<impl IntoResponse, Error> {
    let competition = CompetitionService::new(&state.db)
        .update(id, &payload, version)
        .await?
        .ok_or(Error::NotFound)?;

    Ok((StatusCode::OK, Json(competition)).into_response())
}

/// Update individual competition fields
#[utoipa::path(
    patch,
    path = "/api/v1/drone/competitions/{id}",
    tag = COMPETITION_TAG,
    params(("id" = i32, Path, description = "Competition id")),
    request_body = CompetitionPatch,
    responses(
        (status = 200, description = "The updated competition", body = CompetitionDto),
        (status = 400, description = "Unknown drone or pilot name", body = ErrorDto),
        (status = 404, description = "Competition not found", body = ErrorDto)
    ),
)]
pub async fn partial_update_competition(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    Path(id): Path<i32>,
    Json(patch): Json<CompetitionPatch>,
) -> Result<impl IntoResponse, Error> {
    let competition = CompetitionService::new(&state.db)
        .partial_update(id, &patch, version)
        .await?
        .ok_or(Error::NotFound)?;

    Ok((StatusCode::OK, Json(competition)).into_response())
}

/// Delete a competition
#[utoipa::path(
    delete,
    path = "/api/v1/drone/competitions/{id}",
    tag = COMPETITION_TAG,
    params(("id" = i32, Path, description = "Competition id")),
    responses(
        (status = 204, description = "Competition deleted"),
        (status = 404, description = "Competition not found", body = ErrorDto)
    ),
)]
pub async fn delete_competition(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    if !CompetitionService::new(&state.db).delete(id).await? {
        return Err(Error::NotFound);
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}
