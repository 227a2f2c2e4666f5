use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::{
    data::{
        category::CategoryRepository,
        drone::{DroneChanges, DroneRepository, NewDrone},
        user::UserRepository,
    },
    error::{auth::AuthError, validation::ValidationError, Error},
    model::api::{
        page_window, ApiVersion, DroneDto, DroneListParams, DronePatch, DronePayload, Page,
    },
};

pub struct DroneService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DroneService<'a> {
    /// Creates a new instance of [`DroneService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        params: &DroneListParams,
        version: ApiVersion,
    ) -> Result<Page<DroneDto>, Error> {
        let (limit, offset) = page_window(params.limit, params.offset);

        let (drones, count) = DroneRepository::new(self.db)
            .list(params, limit, offset)
            .await?;

        let category_names = self
            .category_names(drones.iter().map(|d| d.drone_category_id).collect())
            .await?;
        let owner_names = self
            .owner_names(drones.iter().map(|d| d.owner_id).collect())
            .await?;

        let results = drones
            .into_iter()
            .map(|drone| {
                let category = category_names
                    .get(&drone.drone_category_id)
                    .cloned()
                    .ok_or_else(|| missing_relation("category", drone.drone_category_id))?;
                let owner = owner_names
                    .get(&drone.owner_id)
                    .cloned()
                    .ok_or_else(|| missing_relation("owner", drone.owner_id))?;

                Ok(drone_dto(drone, category, owner, version))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Page::new(
            count,
            limit,
            offset,
            &version.drones_path(),
            results,
        ))
    }

    /// Creates a drone owned by the requesting user.
    pub async fn create(
        &self,
        owner: &entity::user::Model,
        payload: &DronePayload,
        version: ApiVersion,
    ) -> Result<DroneDto, Error> {
        let repository = DroneRepository::new(self.db);

        let category = self.resolve_category(&payload.drone_category).await?;

        if repository.find_by_name(&payload.name).await?.is_some() {
            return Err(ValidationError::AlreadyExists {
                resource: "drone",
                name: payload.name.clone(),
            }
            .into());
        }

        let drone = repository
            .create(NewDrone {
                name: payload.name.clone(),
                drone_category_id: category.id,
                owner_id: owner.id,
                manufacturing_date: payload.manufacturing_date,
                has_it_competed: payload.has_it_competed.unwrap_or(false),
            })
            .await?;

        Ok(drone_dto(
            drone,
            category.name,
            owner.username.clone(),
            version,
        ))
    }

    pub async fn get(&self, id: i32, version: ApiVersion) -> Result<Option<DroneDto>, Error> {
        let Some(drone) = DroneRepository::new(self.db).get_by_id(id).await? else {
            return Ok(None);
        };

        Ok(Some(self.to_dto(drone, version).await?))
    }

    /// Replaces a drone's writable fields. Only the owner may update.
    pub async fn update(
        &self,
        user: &entity::user::Model,
        id: i32,
        payload: &DronePayload,
        version: ApiVersion,
    ) -> Result<Option<DroneDto>, Error> {
        let patch = DronePatch {
            name: Some(payload.name.clone()),
            drone_category: Some(payload.drone_category.clone()),
            manufacturing_date: Some(payload.manufacturing_date),
            has_it_competed: Some(payload.has_it_competed.unwrap_or(false)),
        };

        self.partial_update(user, id, &patch, version).await
    }

    /// Applies the provided fields to a drone. Only the owner may update.
    pub async fn partial_update(
        &self,
        user: &entity::user::Model,
        id: i32,
        patch: &DronePatch,
        version: ApiVersion,
    ) -> Result<Option<DroneDto>, Error> {
        let repository = DroneRepository::new(self.db);

        let Some(drone) = repository.get_by_id(id).await? else {
            return Ok(None);
        };

        if drone.owner_id != user.id {
            return Err(AuthError::NotOwner(user.id).into());
        }

        let drone_category_id = match &patch.drone_category {
            Some(name) => Some(self.resolve_category(name).await?.id),
            None => None,
        };

        if let Some(name) = &patch.name {
            if let Some(existing) = repository.find_by_name(name).await? {
                if existing.id != id {
                    return Err(ValidationError::AlreadyExists {
                        resource: "drone",
                        name: name.clone(),
                    }
                    .into());
                }
            }
        }

        let Some(drone) = repository
            .update(
                id,
                DroneChanges {
                    name: patch.name.clone(),
                    drone_category_id,
                    manufacturing_date: patch.manufacturing_date,
                    has_it_competed: patch.has_it_competed,
                },
            )
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(self.to_dto(drone, version).await?))
    }

    /// Deletes a drone. Only the owner may delete.
    pub async fn delete(&self, user: &entity::user::Model, id: i32) -> Result<bool, Error> {
        let repository = DroneRepository::new(self.db);

        let Some(drone) = repository.get_by_id(id).await? else {
            return Ok(false);
        };

        if drone.owner_id != user.id {
            return Err(AuthError::NotOwner(user.id).into());
        }

        let result = repository.delete(id).await?;

        Ok(result.rows_affected > 0)
    }

    async fn resolve_category(
        &self,
        name: &str,
    ) -> Result<entity::drone_category::Model, Error> {
        CategoryRepository::new(self.db)
            .find_by_name(name)
            .await?
            .ok_or_else(|| ValidationError::RelatedNotFound(name.to_owned()).into())
    }

    async fn category_names(&self, ids: Vec<i32>) -> Result<HashMap<i32, String>, Error> {
        let categories = CategoryRepository::new(self.db).list_by_ids(ids).await?;

        Ok(categories.into_iter().map(|c| (c.id, c.name)).collect())
    }

    async fn owner_names(&self, ids: Vec<i32>) -> Result<HashMap<i32, String>, Error> {
        let users = UserRepository::new(self.db).list_by_ids(ids).await?;

        Ok(users.into_iter().map(|u| (u.id, u.username)).collect())
    }

    async fn to_dto(
        &self,
        drone: entity::drone::Model,
        version: ApiVersion,
    ) -> Result<DroneDto, Error> {
        let category = CategoryRepository::new(self.db)
            .get_by_id(drone.drone_category_id)
            .await?
            .ok_or_else(|| missing_relation("category", drone.drone_category_id))?;
        let owner = UserRepository::new(self.db)
            .get_by_id(drone.owner_id)
            .await?
            .ok_or_else(|| missing_relation("owner", drone.owner_id))?;

        Ok(drone_dto(drone, category.name, owner.username, version))
    }
}

// Would only occur if a foreign key constraint is not properly enforced
fn missing_relation(relation: &str, id: i32) -> Error {
    Error::Internal(format!("drone references a missing {} ID {}", relation, id))
}

fn drone_dto(
    drone: entity::drone::Model,
    drone_category: String,
    owner: String,
    version: ApiVersion,
) -> DroneDto {
    DroneDto {
        id: drone.id,
        url: version.drone_url(drone.id),
        name: drone.name,
        drone_category,
        owner,
        manufacturing_date: drone.manufacturing_date,
        has_it_competed: drone.has_it_competed,
        inserted_timestamp: drone.inserted_timestamp,
    }
}
