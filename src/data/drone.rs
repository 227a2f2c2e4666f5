use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::model::api::DroneListParams;

/// Column values for a new drone row.
pub struct NewDrone {
    pub name: String,
    pub drone_category_id: i32,
    pub owner_id: i32,
    pub manufacturing_date: NaiveDateTime,
    pub has_it_competed: bool,
}

/// Column changes for an existing drone row, None leaves a column untouched.
#[derive(Default)]
pub struct DroneChanges {
    pub name: Option<String>,
    pub drone_category_id: Option<i32>,
    pub manufacturing_date: Option<NaiveDateTime>,
    pub has_it_competed: Option<bool>,
}

pub struct DroneRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DroneRepository<'a> {
    /// Creates a new instance of [`DroneRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new drone, stamping the insertion timestamp
    pub async fn create(&self, new_drone: NewDrone) -> Result<entity::drone::Model, DbErr> {
        let drone = entity::drone::ActiveModel {
            name: ActiveValue::Set(new_drone.name),
            drone_category_id: ActiveValue::Set(new_drone.drone_category_id),
            owner_id: ActiveValue::Set(new_drone.owner_id),
            manufacturing_date: ActiveValue::Set(new_drone.manufacturing_date),
            has_it_competed: ActiveValue::Set(new_drone.has_it_competed),
            inserted_timestamp: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        drone.insert(self.db).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::drone::Model>, DbErr> {
        entity::prelude::Drone::find_by_id(id).one(self.db).await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<entity::drone::Model>, DbErr> {
        entity::prelude::Drone::find()
            .filter(entity::drone::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    pub async fn list_by_ids(&self, ids: Vec<i32>) -> Result<Vec<entity::drone::Model>, DbErr> {
        entity::prelude::Drone::find()
            .filter(entity::drone::Column::Id.is_in(ids))
            .all(self.db)
            .await
    }

    pub async fn list_by_category_ids(
        &self,
        category_ids: Vec<i32>,
    ) -> Result<Vec<entity::drone::Model>, DbErr> {
        entity::prelude::Drone::find()
            .filter(entity::drone::Column::DroneCategoryId.is_in(category_ids))
            .all(self.db)
            .await
    }

    /// Lists drones matching the filter params within the page window,
    /// returning the page of models and the total match count.
    pub async fn list(
        &self,
        params: &DroneListParams,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<entity::drone::Model>, u64), DbErr> {
        let mut query = entity::prelude::Drone::find();

        if let Some(name) = &params.name {
            query = query.filter(entity::drone::Column::Name.eq(name));
        }

        if let Some(category_id) = params.drone_category {
            query = query.filter(entity::drone::Column::DroneCategoryId.eq(category_id));
        }

        if let Some(manufacturing_date) = params.manufacturing_date {
            query = query.filter(entity::drone::Column::ManufacturingDate.eq(manufacturing_date));
        }

        if let Some(has_it_competed) = params.has_it_competed {
            query = query.filter(entity::drone::Column::HasItCompeted.eq(has_it_competed));
        }

        if let Some(search) = &params.search {
            query = query.filter(entity::drone::Column::Name.starts_with(search));
        }

        query = apply_ordering(query, params.ordering.as_deref());

        let count = query.clone().count(self.db).await?;
        let drones = query.offset(offset).limit(limit).all(self.db).await?;

        Ok((drones, count))
    }

    /// Applies the given changes to a drone, returning None if it does not exist
    pub async fn update(
        &self,
        id: i32,
        changes: DroneChanges,
    ) -> Result<Option<entity::drone::Model>, DbErr> {
        let Some(drone) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let mut drone_am = drone.into_active_model();

        if let Some(name) = changes.name {
            drone_am.name = ActiveValue::Set(name);
        }
        if let Some(drone_category_id) = changes.drone_category_id {
            drone_am.drone_category_id = ActiveValue::Set(drone_category_id);
        }
        if let Some(manufacturing_date) = changes.manufacturing_date {
            drone_am.manufacturing_date = ActiveValue::Set(manufacturing_date);
        }
        if let Some(has_it_competed) = changes.has_it_competed {
            drone_am.has_it_competed = ActiveValue::Set(has_it_competed);
        }

        let drone = drone_am.update(self.db).await?;

        Ok(Some(drone))
    }

    /// Deletes a drone
    ///
    /// Returns OK regardless of the drone existing, check
    /// [`DeleteResult::rows_affected`] for the outcome.
    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Drone::delete_by_id(id).exec(self.db).await
    }
}

fn apply_ordering(
    query: Select<entity::drone::Entity>,
    ordering: Option<&str>,
) -> Select<entity::drone::Entity> {
    let Some(ordering) = ordering else {
        return query.order_by_asc(entity::drone::Column::Id);
    };

    let (key, descending) = match ordering.strip_prefix('-') {
        Some(key) => (key, true),
        None => (ordering, false),
    };

    let column = match key {
        "name" => entity::drone::Column::Name,
        "manufacturing_date" => entity::drone::Column::ManufacturingDate,
        // Unknown ordering keys are ignored
        _ => return query.order_by_asc(entity::drone::Column::Id),
    };

    let query = if descending {
        query.order_by_desc(column)
    } else {
        query.order_by_asc(column)
    };

    query.order_by_asc(entity::drone::Column::Id)
}
