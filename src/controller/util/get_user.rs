use axum::http::{header, HeaderMap};

use crate::{
    data::token::TokenRepository,
    error::{auth::AuthError, Error},
    model::app::AppState,
};

/// Retrieves the request user from the `Authorization: Token <key>` header
///
/// # Returns
/// - `Ok(user)`: The token resolved to a user
/// - `Err(Error::AuthError(AuthError::MissingCredentials))`: No Authorization header present
/// - `Err(Error::AuthError(AuthError::InvalidTokenHeader))`: Header present but malformed
/// - `Err(Error::AuthError(AuthError::InvalidToken))`: Well-formed key unknown to the database
pub async fn get_user_from_token(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<entity::user::Model, Error> {
    match maybe_user_from_token(state, headers).await? {
        Some(user) => Ok(user),
        None => Err(AuthError::MissingCredentials.into()),
    }
}

/// Like [`get_user_from_token`], but anonymous requests resolve to None
/// instead of an error. A present-but-invalid header is still an error, so
/// read-only endpoints reject bad tokens rather than silently downgrading
/// them to anonymous access.
pub async fn maybe_user_from_token(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<entity::user::Model>, Error> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidTokenHeader)?;

    let Some(key) = value.strip_prefix("Token ") else {
        return Err(AuthError::InvalidTokenHeader.into());
    };

    let key = key.trim();
    if key.is_empty() || key.contains(' ') {
        return Err(AuthError::InvalidTokenHeader.into());
    }

    let Some((token, user)) = TokenRepository::new(&state.db).find_by_key(key).await? else {
        return Err(AuthError::InvalidToken.into());
    };

    let user = user.ok_or_else(|| {
        // Would only occur if the foreign key constraint requiring the token's
        // user to exist is not properly enforced
        Error::Internal(format!(
            "auth token ID {} references a missing user ID {}",
            token.id, token.user_id
        ))
    })?;

    Ok(Some(user))
}
