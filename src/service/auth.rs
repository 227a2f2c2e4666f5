use sea_orm::DatabaseConnection;

use crate::{
    data::{token::TokenRepository, user::UserRepository},
    error::{validation::ValidationError, Error},
    model::api::{CredentialsPayload, TokenDto, UserDto},
    util::password::{generate_token_key, hash_password, verify_password},
};

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new user account with a hashed password.
    pub async fn register(&self, payload: &CredentialsPayload) -> Result<UserDto, Error> {
        let repository = UserRepository::new(self.db);

        if repository
            .find_by_username(&payload.username)
            .await?
            .is_some()
        {
            return Err(ValidationError::UsernameTaken(payload.username.clone()).into());
        }

        let user = repository
            .create(&payload.username, &hash_password(&payload.password))
            .await?;

        Ok(UserDto {
            id: user.id,
            username: user.username,
        })
    }

    /// Exchanges credentials for the user's API token.
    ///
    /// The token is created on first exchange and returned unchanged on
    /// every following one. Unknown usernames and bad passwords produce the
    /// same validation error so the response does not reveal which part was
    /// wrong.
    pub async fn obtain_token(&self, payload: &CredentialsPayload) -> Result<TokenDto, Error> {
        let Some(user) = UserRepository::new(self.db)
            .find_by_username(&payload.username)
            .await?
        else {
            return Err(ValidationError::InvalidCredentials.into());
        };

        if !verify_password(&payload.password, &user.password_hash) {
            tracing::debug!(username = %user.username, "password check failed");

            return Err(ValidationError::InvalidCredentials.into());
        }

        let token_repository = TokenRepository::new(self.db);

        let token = match token_repository.find_by_user_id(user.id).await? {
            Some(token) => token,
            None => {
                token_repository
                    .create(user.id, &generate_token_key())
                    .await?
            }
        };

        Ok(TokenDto { token: token.key })
    }
}
