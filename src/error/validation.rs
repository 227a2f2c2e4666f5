use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{resource} with the name {name:?} already exists")]
    AlreadyExists { resource: &'static str, name: String },
    #[error("Username {0:?} is already taken")]
    UsernameTaken(String),
    #[error("No object with name {0:?} exists")]
    RelatedNotFound(String),
    #[error("{0:?} is not a valid choice")]
    InvalidChoice(String),
    #[error("Credential check failed")]
    InvalidCredentials,
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorDto { error: message })).into_response()
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::AlreadyExists { resource, .. } => {
                bad_request(format!("{} with this name already exists.", resource))
            }
            Self::UsernameTaken(_) => {
                bad_request("A user with that username already exists.".to_string())
            }
            Self::RelatedNotFound(name) => {
                bad_request(format!("Object with name={} does not exist.", name))
            }
            Self::InvalidChoice(value) => {
                bad_request(format!("\"{}\" is not a valid choice.", value))
            }
            Self::InvalidCredentials => {
                bad_request("Unable to log in with provided credentials.".to_string())
            }
        }
    }
}
