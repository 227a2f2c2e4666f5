use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication credentials were not provided")]
    MissingCredentials,
    #[error("Authorization header is not a valid token header")]
    InvalidTokenHeader,
    #[error("Token not found in database")]
    InvalidToken,
    #[error("User ID {0:?} does not own the requested resource")]
    NotOwner(i32),
}

impl AuthError {
    fn unauthorized(message: &str) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Token")],
            Json(ErrorDto {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingCredentials => {
                tracing::debug!("{}", self);

                Self::unauthorized("Authentication credentials were not provided.")
            }
            Self::InvalidTokenHeader => {
                tracing::debug!("{}", self);

                Self::unauthorized("Invalid token header.")
            }
            Self::InvalidToken => {
                tracing::debug!("{}", self);

                Self::unauthorized("Invalid token.")
            }
            Self::NotOwner(user_id) => {
                tracing::debug!(user_id = %user_id, "{}", self);

                (
                    StatusCode::FORBIDDEN,
                    Json(ErrorDto {
                        error: "You do not have permission to perform this action.".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
