use std::collections::HashMap;

use entity::pilot::Gender;
use sea_orm::DatabaseConnection;

use crate::{
    data::{
        competition::CompetitionRepository,
        drone::DroneRepository,
        pilot::{PilotChanges, PilotRepository},
    },
    error::{validation::ValidationError, Error},
    model::api::{
        page_window, ApiVersion, CompetitionDto, Page, PilotDto, PilotListParams, PilotPatch,
        PilotPayload,
    },
    service::competition::competition_dto,
};

pub struct PilotService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PilotService<'a> {
    /// Creates a new instance of [`PilotService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        params: &PilotListParams,
        version: ApiVersion,
    ) -> Result<Page<PilotDto>, Error> {
        if let Some(code) = &params.gender {
            if Gender::from_code(code).is_none() {
                return Err(ValidationError::InvalidChoice(code.clone()).into());
            }
        }

        let (limit, offset) = page_window(params.limit, params.offset);

        let (pilots, count) = PilotRepository::new(self.db)
            .list(params, limit, offset)
            .await?;

        let mut competitions = self
            .competitions_by_pilot(pilots.iter().map(|p| p.id).collect(), &pilots, version)
            .await?;

        let results = pilots
            .into_iter()
            .map(|pilot| {
                let flown = competitions.remove(&pilot.id).unwrap_or_default();
                pilot_dto(pilot, flown, version)
            })
            .collect();

        Ok(Page::new(
            count,
            limit,
            offset,
            &version.pilots_path(),
            results,
        ))
    }

    pub async fn create(
        &self,
        payload: &PilotPayload,
        version: ApiVersion,
    ) -> Result<PilotDto, Error> {
        let repository = PilotRepository::new(self.db);

        let gender = match &payload.gender {
            Some(code) => Gender::from_code(code)
                .ok_or_else(|| ValidationError::InvalidChoice(code.clone()))?,
            None => Gender::Male,
        };

        if repository.find_by_name(&payload.name).await?.is_some() {
            return Err(ValidationError::AlreadyExists {
                resource: "pilot",
                name: payload.name.clone(),
            }
            .into());
        }

        let pilot = repository
            .create(&payload.name, gender, payload.races_count.unwrap_or(0))
            .await?;

        Ok(pilot_dto(pilot, Vec::new(), version))
    }

    pub async fn get(&self, id: i32, version: ApiVersion) -> Result<Option<PilotDto>, Error> {
        let Some(pilot) = PilotRepository::new(self.db).get_by_id(id).await? else {
            return Ok(None);
        };

        Ok(Some(self.to_dto(pilot, version).await?))
    }

    pub async fn update(
        &self,
        id: i32,
        payload: &PilotPayload,
        version: ApiVersion,
    ) -> Result<Option<PilotDto>, Error> {
        let patch = PilotPatch {
            name: Some(payload.name.clone()),
            gender: payload.gender.clone().or(Some("M".to_string())),
            races_count: Some(payload.races_count.unwrap_or(0)),
        };

        self.partial_update(id, &patch, version).await
    }

    pub async fn partial_update(
        &self,
        id: i32,
        patch: &PilotPatch,
        version: ApiVersion,
    ) -> Result<Option<PilotDto>, Error> {
        let repository = PilotRepository::new(self.db);

        let gender = match &patch.gender {
            Some(code) => Some(
                Gender::from_code(code)
                    .ok_or_else(|| ValidationError::InvalidChoice(code.clone()))?,
            ),
            None => None,
        };

        if let Some(name) = &patch.name {
            if let Some(existing) = repository.find_by_name(name).await? {
                if existing.id != id {
                    return Err(ValidationError::AlreadyExists {
                        resource: "pilot",
                        name: name.clone(),
                    }
                    .into());
                }
            }
        }

        let Some(pilot) = repository
            .update(
                id,
                PilotChanges {
                    name: patch.name.clone(),
                    gender,
                    races_count: patch.races_count,
                },
            )
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(self.to_dto(pilot, version).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, Error> {
        let result = PilotRepository::new(self.db).delete(id).await?;

        Ok(result.rows_affected > 0)
    }

    /// Nested competition DTOs for each pilot in the page.
    async fn competitions_by_pilot(
        &self,
        pilot_ids: Vec<i32>,
        pilots: &[entity::pilot::Model],
        version: ApiVersion,
    ) -> Result<HashMap<i32, Vec<CompetitionDto>>, Error> {
        let competitions = CompetitionRepository::new(self.db)
            .list_by_pilot_ids(pilot_ids)
            .await?;

        let drones = DroneRepository::new(self.db)
            .list_by_ids(competitions.iter().map(|c| c.drone_id).collect())
            .await?;
        let drone_names: HashMap<i32, String> =
            drones.into_iter().map(|d| (d.id, d.name)).collect();
        let pilot_names: HashMap<i32, String> = pilots
            .iter()
            .map(|p| (p.id, p.name.clone()))
            .collect();

        let mut by_pilot: HashMap<i32, Vec<CompetitionDto>> = HashMap::new();
        for competition in competitions {
            let drone = drone_names
                .get(&competition.drone_id)
                .cloned()
                .ok_or_else(|| missing_drone(competition.drone_id))?;
            let pilot = pilot_names
                .get(&competition.pilot_id)
                .cloned()
                .unwrap_or_default();

            by_pilot
                .entry(competition.pilot_id)
                .or_default()
                .push(competition_dto(competition, drone, pilot, version));
        }

        Ok(by_pilot)
    }

    async fn to_dto(
        &self,
        pilot: entity::pilot::Model,
        version: ApiVersion,
    ) -> Result<PilotDto, Error> {
        let competitions = self
            .competitions_by_pilot(vec![pilot.id], std::slice::from_ref(&pilot), version)
            .await?
            .remove(&pilot.id)
            .unwrap_or_default();

        Ok(pilot_dto(pilot, competitions, version))
    }
}

// Would only occur if a foreign key constraint is not properly enforced
fn missing_drone(id: i32) -> Error {
    Error::Internal(format!("competition references a missing drone ID {}", id))
}

fn pilot_dto(
    pilot: entity::pilot::Model,
    competitions: Vec<CompetitionDto>,
    version: ApiVersion,
) -> PilotDto {
    PilotDto {
        id: pilot.id,
        url: version.pilot_url(pilot.id),
        name: pilot.name,
        gender: pilot.gender.code().to_string(),
        gender_description: pilot.gender.description().to_string(),
        races_count: pilot.races_count,
        inserted_timestamp: pilot.inserted_timestamp,
        competitions,
    }
}
