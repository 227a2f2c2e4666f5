use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select,
};

use crate::model::api::CompetitionListParams;

/// Column changes for an existing competition row, None leaves a column
/// untouched.
#[derive(Default)]
pub struct CompetitionChanges {
    pub pilot_id: Option<i32>,
    pub drone_id: Option<i32>,
    pub distance_in_feet: Option<i32>,
    pub distance_achievement_date: Option<NaiveDateTime>,
}

pub struct CompetitionRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CompetitionRepository<'a> {
    /// Creates a new instance of [`CompetitionRepository`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new competition entry
    pub async fn create(
        &self,
        pilot_id: i32,
        drone_id: i32,
        distance_in_feet: i32,
        distance_achievement_date: NaiveDateTime,
    ) -> Result<entity::competition::Model, DbErr> {
        let competition = entity::competition::ActiveModel {
            pilot_id: ActiveValue::Set(pilot_id),
            drone_id: ActiveValue::Set(drone_id),
            distance_in_feet: ActiveValue::Set(distance_in_feet),
            distance_achievement_date: ActiveValue::Set(distance_achievement_date),
            ..Default::default()
        };

        competition.insert(self.db).await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::competition::Model>, DbErr> {
        entity::prelude::Competition::find_by_id(id)
            .one(self.db)
            .await
    }

    pub async fn list_by_pilot_ids(
        &self,
        pilot_ids: Vec<i32>,
    ) -> Result<Vec<entity::competition::Model>, DbErr> {
        entity::prelude::Competition::find()
            .filter(entity::competition::Column::PilotId.is_in(pilot_ids))
            .all(self.db)
            .await
    }

    /// Lists competitions matching the filter params within the page window,
    /// returning the page of models and the total match count.
    ///
    /// Name filters join through to the related drone and pilot tables.
    pub async fn list(
        &self,
        params: &CompetitionListParams,
        limit: u64,
        offset: u64,
    ) -> Result<(Vec<entity::competition::Model>, u64), DbErr> {
        let mut query = entity::prelude::Competition::find();

        if let Some(distance) = params.distance_in_feet {
            query = query.filter(entity::competition::Column::DistanceInFeet.eq(distance));
        }

        if let Some(min_distance) = params.min_distance_in_feet {
            query = query.filter(entity::competition::Column::DistanceInFeet.gte(min_distance));
        }

        if let Some(max_distance) = params.max_distance_in_feet {
            query = query.filter(entity::competition::Column::DistanceInFeet.lte(max_distance));
        }

        if let Some(from_date) = params.from_achievement_date {
            query =
                query.filter(entity::competition::Column::DistanceAchievementDate.gte(from_date));
        }

        if let Some(to_date) = params.to_achievement_date {
            query =
                query.filter(entity::competition::Column::DistanceAchievementDate.lte(to_date));
        }

        if let Some(drone_name) = &params.drone_name {
            query = query
                .join(JoinType::InnerJoin, entity::competition::Relation::Drone.def())
                .filter(entity::drone::Column::Name.eq(drone_name));
        }

        if let Some(pilot_name) = &params.pilot_name {
            query = query
                .join(JoinType::InnerJoin, entity::competition::Relation::Pilot.def())
                .filter(entity::pilot::Column::Name.eq(pilot_name));
        }

        query = apply_ordering(query, params.ordering.as_deref());

        let count = query.clone().count(self.db).await?;
        let competitions = query.offset(offset).limit(limit).all(self.db).await?;

        Ok((competitions, count))
    }

    /// Applies the given changes to a competition, returning None if it does
    /// not exist
    pub async fn update(
        &self,
        id: i32,
        changes: CompetitionChanges,
    ) -> Result<Option<entity::competition::Model>, DbErr> {
        let Some(competition) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let mut competition_am = competition.into_active_model();

        if let Some(pilot_id) = changes.pilot_id {
            competition_am.pilot_id = ActiveValue::Set(pilot_id);
        }
        if let Some(drone_id) = changes.drone_id {
            competition_am.drone_id = ActiveValue::Set(drone_id);
        }
        if let Some(distance_in_feet) = changes.distance_in_feet {
            competition_am.distance_in_feet = ActiveValue::Set(distance_in_feet);
        }
        if let Some(distance_achievement_date) = changes.distance_achievement_date {
            competition_am.distance_achievement_date =
                ActiveValue::Set(distance_achievement_date);
        }

        let competition = competition_am.update(self.db).await?;

        Ok(Some(competition))
    }

    /// Deletes a competition
    ///
    /// Returns OK regardless of the competition existing, check
    /// [`DeleteResult::rows_affected`] for the outcome.
    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Competition::delete_by_id(id)
            .exec(self.db)
            .await
    }
}

fn apply_ordering(
    query: Select<entity::competition::Entity>,
    ordering: Option<&str>,
) -> Select<entity::competition::Entity> {
    let Some(ordering) = ordering else {
        return query.order_by_asc(entity::competition::Column::Id);
    };

    let (key, descending) = match ordering.strip_prefix('-') {
        Some(key) => (key, true),
        None => (ordering, false),
    };

    let column = match key {
        "distance_in_feet" => entity::competition::Column::DistanceInFeet,
        "distance_achievement_date" => entity::competition::Column::DistanceAchievementDate,
        // Unknown ordering keys are ignored
        _ => return query.order_by_asc(entity::competition::Column::Id),
    };

    let query = if descending {
        query.order_by_desc(column)
    } else {
        query.order_by_asc(column)
    };

    query.order_by_asc(entity::competition::Column::Id)
}
