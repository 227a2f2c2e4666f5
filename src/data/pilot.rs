use chrono::Utc;
use entity::pilot::Gender;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::model::api::PilotListParams;

/// Column changes for an existing pilot row, None leaves a column untouched.
#[derive(Default)]
pub struct PilotChanges {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub races_count: Option<i32>,
}

pub struct PilotRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PilotRepository<'a> {
    /// Creates a new instance of [`PilotRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new pilot, stamping the insertion timestamp
    pub async fn create(
        &self,
        name: &str,
        gender: Gender,
        races_count: i32,
    ) -> Result<entity::pilot::Model, DbErr> {
        let pilot = entity::pilot::ActiveModel {
            name: ActiveValue::Set(name.to_owned()),
            gender: ActiveValue::Set(gender),
            races_count: ActiveValue::Set(races_count),
            inserted_timestamp: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        pilot.insert(self.db).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::pilot::Model>, DbErr> {
        entity::prelude::Pilot::find_by_id(id).one(self.db).await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<entity::pilot::Model>, DbErr> {
        entity::prelude::Pilot::find()
            .filter(entity::pilot::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    pub async fn list_by_ids(&self, ids: Vec<i32>) -> Result<Vec<entity::pilot::Model>, DbErr> {
        entity::prelude::Pilot::find()
            .filter(entity::pilot::Column::Id.is_in(ids))
            .all(self.db)
            .await
    }

    /// Lists pilots matching the filter params within the page window,
    /// returning the page of models and the total match count.
    pub async fn list(
        &self,
        params: &PilotListParams,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<entity::pilot::Model>, u64), DbErr> {
        let mut query = entity::prelude::Pilot::find();

        if let Some(name) = &params.name {
            query = query.filter(entity::pilot::Column::Name.eq(name));
        }

        if let Some(gender) = params.gender.as_deref().and_then(Gender::from_code) {
            query = query.filter(entity::pilot::Column::Gender.eq(gender));
        }

        if let Some(races_count) = params.races_count {
            query = query.filter(entity::pilot::Column::RacesCount.eq(races_count));
        }

        if let Some(search) = &params.search {
            query = query.filter(entity::pilot::Column::Name.starts_with(search));
        }

        query = apply_ordering(query, params.ordering.as_deref());

        let count = query.clone().count(self.db).await?;
        let pilots = query.offset(offset).limit(limit).all(self.db).await?;

        Ok((pilots, count))
    }

    /// Applies the given changes to a pilot, returning None if it does not exist
    pub async fn update(
        &self,
        id: i32,
        changes: PilotChanges,
    ) -> Result<Option<entity::pilot::Model>, DbErr> {
        let Some(pilot) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let mut pilot_am = pilot.into_active_model();

        if let Some(name) = changes.name {
            pilot_am.name = ActiveValue::Set(name);
        }
        if let Some(gender) = changes.gender {
            pilot_am.gender = ActiveValue::Set(gender);
        }
        if let Some(races_count) = changes.races_count {
            pilot_am.races_count = ActiveValue::Set(races_count);
        }

        let pilot = pilot_am.update(self.db).await?;

        Ok(Some(pilot))
    }

    /// Deletes a pilot
    ///
    /// Returns OK regardless of the pilot existing, check
    /// [`DeleteResult::rows_affected`] for the outcome.
    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Pilot::delete_by_id(id).exec(self.db).await
    }
}

fn apply_ordering(
    query: Select<entity::pilot::Entity>,
    ordering: Option<&str>,
) -> Select<entity::pilot::Entity> {
    let Some(ordering) = ordering else {
        return query.order_by_asc(entity::pilot::Column::Id);
    };

    let (key, descending) = match ordering.strip_prefix('-') {
        Some(key) => (key, true),
        None => (ordering, false),
    };

    let column = match key {
        "name" => entity::pilot::Column::Name,
        "races_count" => entity::pilot::Column::RacesCount,
        // Unknown ordering keys are ignored
        _ => return query.order_by_asc(entity::pilot::Column::Id),
    };

    let query = if descending {
        query.order_by_desc(column)
    } else {
        query.order_by_asc(column)
    };

    query.order_by_asc(entity::pilot::Column::Id)
}
