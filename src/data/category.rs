use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::model::api::DroneCategoryListParams;

pub struct CategoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryRepository<'a> {
    /// Creates a new instance of [`CategoryRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new drone category
    pub async fn create(&self, name: &str) -> Result<entity::drone_category::Model, DbErr> {
        let category = entity::drone_category::ActiveModel {
            name: ActiveValue::Set(name.to_owned()),
            ..Default::default()
        };

        category.insert(self.db).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::drone_category::Model>, DbErr> {
        entity::prelude::DroneCategory::find_by_id(id)
            .one(self.db)
            .await
    }

    pub async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<entity::drone_category::Model>, DbErr> {
        entity::prelude::DroneCategory::find()
            .filter(entity::drone_category::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    pub async fn list_by_ids(
        &self,
        ids: Vec<i32>,
    ) -> Result<Vec<entity::drone_category::Model>, DbErr> {
        entity::prelude::DroneCategory::find()
            .filter(entity::drone_category::Column::Id.is_in(ids))
            .all(self.db)
            .await
    }

    /// Lists categories matching the filter params within the page window,
    /// returning the page of models and the total match count.
    pub async fn list(
        &self,
        params: &DroneCategoryListParams,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<entity::drone_category::Model>, u64), DbErr> {
        let mut query = entity::prelude::DroneCategory::find();

        if let Some(name) = &params.name {
            query = query.filter(entity::drone_category::Column::Name.eq(name));
        }

        if let Some(search) = &params.search {
            query = query.filter(entity::drone_category::Column::Name.contains(search));
        }

        query = apply_ordering(query, params.ordering.as_deref());

        let count = query.clone().count(self.db).await?;
        let categories = query.offset(offset).limit(limit).all(self.db).await?;

        Ok((categories, count))
    }

    /// Renames a category, returning None if it does not exist
    pub async fn update_name(
        &self,
        id: i32,
        name: &str,
    ) -> Result<Option<entity::drone_category::Model>, DbErr> {
        let Some(category) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let mut category_am = category.into_active_model();
        category_am.name = ActiveValue::Set(name.to_owned());

        let category = category_am.update(self.db).await?;

        Ok(Some(category))
    }

    /// Deletes a category
    ///
    /// Returns OK regardless of the category existing, check
    /// [`DeleteResult::rows_affected`] for the outcome.
    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::DroneCategory::delete_by_id(id)
            .exec(self.db)
            .await
    }
}

fn apply_ordering(
    query: Select<entity::drone_category::Entity>,
    ordering: Option<&str>,
) -> Select<entity::drone_category::Entity> {
    let Some(ordering) = ordering else {
        return query.order_by_asc(entity::drone_category::Column::Id);
    };

    let (key, descending) = match ordering.strip_prefix('-') {
        Some(key) => (key, true),
        None => (ordering, false),
    };

    let column = match key {
        "name" => entity::drone_category::Column::Name,
        // Unknown ordering keys are ignored
        _ => return query.order_by_asc(entity::drone_category::Column::Id),
    };

    let query = if descending {
        query.order_by_desc(column)
    } else {
        query.order_by_asc(column)
    };

    query.order_by_asc(entity::drone_category::Column::Id)
}
