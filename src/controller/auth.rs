use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    error::Error,
    model::{
        api::{CredentialsPayload, ErrorDto, TokenDto, UserDto},
        app::AppState,
    },
    service::auth::AuthService,
};

pub static AUTH_TAG: &str = "auth";

/// Register a new user account
#[utoipa::path(
    post,
    path = "/api/v1/drone/auth/register",
    tag = AUTH_TAG,
    request_body = CredentialsPayload,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Username already taken", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<impl IntoResponse, Error> {
    let user = AuthService::new(&state.db).register(&payload).await?;

    Ok((StatusCode::CREATED, Json(user)).into_response())
}

/// Exchange username and password for an API token
#[utoipa::path(
    post,
    path = "/api/v1/drone/auth/token",
    tag = AUTH_TAG,
    request_body = CredentialsPayload,
    responses(
        (status = 200, description = "The user's token", body = TokenDto),
        (status = 400, description = "Credential check failed", body = ErrorDto)
    ),
)]
pub async fn obtain_token(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsPayload>,
) -> Result<impl IntoResponse, Error> {
    let token = AuthService::new(&state.db).obtain_token(&payload).await?;

    Ok((StatusCode::OK, Json(token)).into_response())
}
