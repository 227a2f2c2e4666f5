//! Error types for the skyrace server.
//!
//! A root [`Error`] enum aggregates the domain-specific error types
//! (authentication, configuration, validation) plus database errors. All
//! errors implement `IntoResponse` so handlers can return `Result<_, Error>`
//! and get the correct HTTP status and JSON body.

pub mod auth;
pub mod config;
pub mod validation;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    error::{auth::AuthError, config::ConfigError, validation::ValidationError},
    model::api::ErrorDto,
};

#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication or permission error (token, ownership).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Request validation error (uniqueness, unknown related names, choices).
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// The requested resource does not exist.
    #[error("Resource not found")]
    NotFound,
    /// Internal error indicating a bug, such as a row that violates a
    /// foreign key constraint the schema is supposed to enforce.
    #[error("Internal error: {0}")]
    Internal(String),
    /// Database error (query failures, connection issues).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}

/// Maps errors to HTTP responses.
///
/// - 400 Bad Request - validation failures
/// - 401 Unauthorized / 403 Forbidden - authentication and ownership failures
/// - 404 Not Found - missing resources
/// - 500 Internal Server Error - everything else (logged, details hidden)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::AuthError(err) => err.into_response(),
            Self::ValidationError(err) => err.into_response(),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorDto {
                    error: "Not found.".to_string(),
                }),
            )
                .into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper converting any displayable error into a 500 response.
///
/// Logs the full error for debugging but returns a generic message to the
/// client so internal details never leak into API responses.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
