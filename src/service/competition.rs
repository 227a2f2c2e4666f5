use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::{
    data::{
        competition::{CompetitionChanges, CompetitionRepository},
        drone::DroneRepository,
        pilot::PilotRepository,
    },
    error::{validation::ValidationError, Error},
    model::api::{
        page_window, ApiVersion, CompetitionDto, CompetitionListParams, CompetitionPatch,
        CompetitionPayload, Page,
    },
};

pub struct CompetitionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CompetitionService<'a> {
    /// Creates a new instance of [`CompetitionService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        params: &CompetitionListParams,
        version: ApiVersion,
    ) -> Result<Page<CompetitionDto>, Error> {
        let (limit, offset) = page_window(params.limit, params.offset);

        let (competitions, count) = CompetitionRepository::new(self.db)
            .list(params, limit, offset)
            .await?;

        let drone_names = self
            .drone_names(competitions.iter().map(|c| c.drone_id).collect())
            .await?;
        let pilot_names = self
            .pilot_names(competitions.iter().map(|c| c.pilot_id).collect())
            .await?;

        let results = competitions
            .into_iter()
            .map(|competition| {
                let drone = drone_names
                    .get(&competition.drone_id)
                    .cloned()
                    .ok_or_else(|| missing_relation("drone", competition.drone_id))?;
                let pilot = pilot_names
                    .get(&competition.pilot_id)
                    .cloned()
                    .ok_or_else(|| missing_relation("pilot", competition.pilot_id))?;

                Ok(competition_dto(competition, drone, pilot, version))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Page::new(
            count,
            limit,
            offset,
            &version.competitions_path(),
            results,
        ))
    }

    /// Records a competition, resolving the drone and pilot by name.
    pub async fn create(
        &self,
        payload: &CompetitionPayload,
        version: ApiVersion,
    ) -> Result<CompetitionDto, Error> {
        let drone = self.resolve_drone(&payload.drone).await?;
        let pilot = self.resolve_pilot(&payload.pilot).await?;

        let competition = CompetitionRepository::new(self.db)
            .create(
                pilot.id,
                drone.id,
                payload.distance_in_feet,
                payload.distance_achievement_date,
            )
            .await?;

        Ok(competition_dto(competition, drone.name, pilot.name, version))
    }

    pub async fn get(
        &self,
        id: i32,
        version: ApiVersion,
    ) -> Result<Option<CompetitionDto>, Error> {
        let Some(competition) = CompetitionRepository::new(self.db).get_by_id(id).await? else {
            return Ok(None);
        };

        Ok(Some(self.to_dto(competition, version).await?))
    }

    pub async fn update(
        &self,
        id: i32,
        payload: &CompetitionPayload,
        version: ApiVersion,
    ) -> Result<Option<CompetitionDto>, Error> {
        let patch = CompetitionPatch {
            distance_in_feet: Some(payload.distance_in_feet),
            distance_achievement_date: Some(payload.distance_achievement_date),
            drone: Some(payload.drone.clone()),
            pilot: Some(payload.pilot.clone()),
        };

        self.partial_update(id, &patch, version).await
    }

    pub async fn partial_update(
        &self,
        id: i32,
        patch: &CompetitionPatch,
        version: ApiVersion,
    ) -> Result<Option<CompetitionDto>, Error> {
        let drone_id = match &patch.drone {
            Some(name) => Some(self.resolve_drone(name).await?.id),
            None => None,
        };
        let pilot_id = match &patch.pilot {
            Some(name) => Some(self.resolve_pilot(name).await?.id),
            None => None,
        };

        let Some(competition) = CompetitionRepository::new(self.db)
            .update(
                id,
                CompetitionChanges {
                    pilot_id,
                    drone_id,
                    distance_in_feet: patch.distance_in_feet,
                    distance_achievement_date: patch.distance_achievement_date,
                },
            )
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(self.to_dto(competition, version).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, Error> {
        let result = CompetitionRepository::new(self.db).delete(id).await?;

        Ok(result.rows_affected > 0)
    }

    async fn resolve_drone(&self, name: &str) -> Result<entity::drone::Model, Error> {
        DroneRepository::new(self.db)
            .find_by_name(name)
            .await?
            .ok_or_else(|| ValidationError::RelatedNotFound(name.to_owned()).into())
    }

    async fn resolve_pilot(&self, name: &str) -> Result<entity::pilot::Model, Error> {
        PilotRepository::new(self.db)
            .find_by_name(name)
            .await?
            .ok_or_else(|| ValidationError::RelatedNotFound(name.to_owned()).into())
    }

    async fn drone_names(&self, ids: Vec<i32>) -> Result<HashMap<i32, String>, Error> {
        let drones = DroneRepository::new(self.db).list_by_ids(ids).await?;

        Ok(drones.into_iter().map(|d| (d.id, d.name)).collect())
    }

    async fn pilot_names(&self, ids: Vec<i32>) -> Result<HashMap<i32, String>, Error> {
        let pilots = PilotRepository::new(self.db).list_by_ids(ids).await?;

        Ok(pilots.into_iter().map(|p| (p.id, p.name)).collect())
    }

    async fn to_dto(
        &self,
        competition: entity::competition::Model,
        version: ApiVersion,
    ) -> Result<CompetitionDto, Error> {
        let drone = DroneRepository::new(self.db)
            .get_by_id(competition.drone_id)
            .await?
            .ok_or_else(|| missing_relation("drone", competition.drone_id))?;
        let pilot = PilotRepository::new(self.db)
            .get_by_id(competition.pilot_id)
            .await?
            .ok_or_else(|| missing_relation("pilot", competition.pilot_id))?;

        Ok(competition_dto(competition, drone.name, pilot.name, version))
    }
}

// Would only occur if a foreign key constraint is not properly enforced
fn missing_relation(relation: &str, id: i32) -> Error {
    Error::Internal(format!(
        "competition references a missing {} ID {}",
        relation, id
    ))
}

pub(crate) fn competition_dto(
    competition: entity::competition::Model,
    drone: String,
    pilot: String,
    version: ApiVersion,
) -> CompetitionDto {
    CompetitionDto {
        id: competition.id,
        url: version.competition_url(competition.id),
        distance_in_feet: competition.distance_in_feet,
        distance_achievement_date: competition.distance_achievement_date,
        drone,
        pilot,
    }
}
