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
            ApiVersion, DroneCategoryDto, DroneCategoryListParams, DroneCategoryPatch,
            DroneCategoryPayload, ErrorDto, Page,
        },
        app::AppState,
    },
    service::category::CategoryService,
};

pub static CATEGORY_TAG: &str = "drone-categories";

/// List drone categories with optional filter, search, and ordering
#[utoipa::path(
    get,
    path = "/api/v1/drone/drone-categories",
    tag = CATEGORY_TAG,
    params(DroneCategoryListParams),
    responses(
        (status = 200, description = "Page of drone categories", body = Page<DroneCategoryDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    Query(params): Query<DroneCategoryListParams>,
) -> Result<impl IntoResponse, Error> {
    let page = CategoryService::new(&state.db).list(&params, version).await?;

    Ok((StatusCode::OK, Json(page)).into_response())
}

/// Create a new drone category
#[utoipa::path(
    post,
    path = "/api/v1/drone/drone-categories",
    tag = CATEGORY_TAG,
    request_body = DroneCategoryPayload,
    responses(
        (status = 201, description = "Drone category created", body = DroneCategoryDto),
        (status = 400, description = "Name already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_category(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    Json(payload): Json<DroneCategoryPayload>,
) -> Result<impl IntoResponse, Error> {
    let category = CategoryService::new(&state.db)
        .create(&payload, version)
        .await?;

    Ok((StatusCode::CREATED, Json(category)).into_response())
}

/// Retrieve a single drone category
#[utoipa::path(
    get,
    path = "/api/v1/drone/drone-categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Drone category id")),
    responses(
        (status = 200, description = "The drone category", body = DroneCategoryDto),
        (status = 404, description = "Drone category not found", body = ErrorDto)
    ),
)]
pub async fn get_category(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let category = CategoryService::new(&state.db)
        .get(id, version)
        .await?
        .ok_or(Error::NotFound)?;

    Ok((StatusCode::OK, Json(category)).into_response())
}

/// Replace a drone category
#[utoipa::path(
    put,
    path = "/api/v1/drone/drone-categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Drone category id")),
    request_body = DroneCategoryPayload,
    responses(
        (status = 200, description = "The updated drone category", body = DroneCategoryDto),
        (status = 400, description = "Name already taken", body = ErrorDto),
        (status = 404, description = "Drone category not found", body = ErrorDto)
    ),
)]
pub async fn update_category(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    Path(id): Path<i32>,
    Json(payload): Json<DroneCategoryPayload>,
) -> Result<impl IntoResponse, Error> {
    let category = CategoryService::new(&state.db)
        .update(id, &payload, version)
        .await?
        .ok_or(Error::NotFound)?;

    Ok((StatusCode::OK, Json(category)).into_response())
}

/// Update individual drone category fields
#[utoipa::path(
    patch,
    path = "/api/v1/drone/drone-categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Drone category id")),
    request_body = DroneCategoryPatch,
    responses(
        (status = 200, description = "The updated drone category", body = DroneCategoryDto),
        (status = 400, description = "Name already taken", body = ErrorDto),
        (status = 404, description = "Drone category not found", body = ErrorDto)
    ),
)]
pub async fn partial_update_category(
    State(state): State<AppState>,
    Extension(version): Extension<ApiVersion>,
    Path(id): Path<i32>,
    Json(patch): Json<DroneCategoryPatch>,
) -> Result<impl IntoResponse, Error> {
    let category = CategoryService::new(&state.db)
        .partial_update(id, &patch, version)
        .await?
        .ok_or(Error::NotFound)?;

    Ok((StatusCode::OK, Json(category)).into_response())
}

/// Delete a drone category
#[utoipa::path(
    delete,
    path = "/api/v1/drone/drone-categories/{id}",
    tag = CATEGORY_TAG,
    params(("id" = i32, Path, description = "Drone category id")),
    responses(
        (status = 204, description = "Drone category deleted"),
        (status = 404, description = "Drone category not found", body = ErrorDto)
    ),
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    if !CategoryService::new(&state.db).delete(id).await? {
        return Err(Error::NotFound);
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}
