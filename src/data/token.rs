use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

pub struct TokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TokenRepository<'a> {
    /// Creates a new instance of [`TokenRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a new token key for a user
    pub async fn create(
        &self,
        user_id: i32,
        key: &str,
    ) -> Result<entity::auth_token::Model, DbErr> {
        let token = entity::auth_token::ActiveModel {
            key: ActiveValue::Set(key.to_owned()),
            user_id: ActiveValue::Set(user_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        token.insert(self.db).await
    }

    /// Looks up a token by its key together with the owning user
    pub async fn find_by_key(
        &self,
        key: &str,
    ) -> Result<Option<(entity::auth_token::Model, Option<entity::user::Model>)>, DbErr> {
        entity::prelude::AuthToken::find()
            .filter(entity::auth_token::Column::Key.eq(key))
            .find_also_related(entity::user::Entity)
            .one(self.db)
            .await
    }

    pub async fn find_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::auth_token::Model>, DbErr> {
        entity::prelude::AuthToken::find()
            .filter(entity::auth_token::Column::UserId.eq(user_id))
            .one(self.db)
            .await
    }
}
