use std::collections::HashMap;

use sea_orm::DatabaseConnection;

use crate::{
    data::{category::CategoryRepository, drone::DroneRepository},
    error::{validation::ValidationError, Error},
    model::api::{
        page_window, ApiVersion, DroneCategoryDto, DroneCategoryListParams, DroneCategoryPatch,
        DroneCategoryPayload, Page,
    },
};

pub struct CategoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryService<'a> {
    /// Creates a new instance of [`CategoryService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(
        &self,
        params: &DroneCategoryListParams,
        version: ApiVersion,
    ) -> Result<Page<DroneCategoryDto>, Error> {
        let (limit, offset) = page_window(params.limit, params.offset);

        let (categories, count) = CategoryRepository::new(self.db)
            .list(params, limit, offset)
            .await?;

        let category_ids: Vec<i32> = categories.iter().map(|c| c.id).collect();
        let drones = DroneRepository::new(self.db)
            .list_by_category_ids(category_ids)
            .await?;

        let mut drone_urls: HashMap<i32, Vec<String>> = HashMap::new();
        for drone in drones {
            drone_urls
                .entry(drone.drone_category_id)
                .or_default()
                .push(version.drone_url(drone.id));
        }

        let results = categories
            .into_iter()
            .map(|category| {
                let drones = drone_urls.remove(&category.id).unwrap_or_default();
                category_dto(category, drones, version)
            })
            .collect();

        Ok(Page::new(
            count,
            limit,
            offset,
            &version.categories_path(),
            results,
        ))
    }

    pub async fn create(
        &self,
        payload: &DroneCategoryPayload,
        version: ApiVersion,
    ) -> Result<DroneCategoryDto, Error> {
        let repository = CategoryRepository::new(self.db);

        if repository.find_by_name(&payload.name).await?.is_some() {
            return Err(ValidationError::AlreadyExists {
                resource: "drone category",
                name: payload.name.clone(),
            }
            .into());
        }

        let category = repository.create(&payload.name).await?;

        Ok(category_dto(category, Vec::new(), version))
    }

    pub async fn get(
        &self,
        id: i32,
        version: ApiVersion,
    ) -> Result<Option<DroneCategoryDto>, Error> {
        let Some(category) = CategoryRepository::new(self.db).get_by_id(id).await? else {
            return Ok(None);
        };

        Ok(Some(self.to_dto(category, version).await?))
    }

    pub async fn update(
        &self,
        id: i32,
        payload: &DroneCategoryPayload,
        version: ApiVersion,
    ) -> Result<Option<DroneCategoryDto>, Error> {
        self.rename(id, &payload.name, version).await
    }

    pub async fn partial_update(
        &self,
        id: i32,
        patch: &DroneCategoryPatch,
        version: ApiVersion,
    ) -> Result<Option<DroneCategoryDto>, Error> {
        match &patch.name {
            Some(name) => self.rename(id, name, version).await,
            None => self.get(id, version).await,
        }
    }

    pub async fn delete(&self, id: i32) -> Result<bool, Error> {
        let result = CategoryRepository::new(self.db).delete(id).await?;

        Ok(result.rows_affected > 0)
    }

    async fn rename(
        &self,
        id: i32,
        name: &str,
        version: ApiVersion,
    ) -> Result<Option<DroneCategoryDto>, Error> {
        let repository = CategoryRepository::new(self.db);

        if let Some(existing) = repository.find_by_name(name).await? {
            if existing.id != id {
                return Err(ValidationError::AlreadyExists {
                    resource: "drone category",
                    name: name.to_owned(),
                }
                .into());
            }
        }

        let Some(category) = repository.update_name(id, name).await? else {
            return Ok(None);
        };

        Ok(Some(self.to_dto(category, version).await?))
    }

    async fn to_dto(
        &self,
        category: entity::drone_category::Model,
        version: ApiVersion,
    ) -> Result<DroneCategoryDto, Error> {
        let drones = DroneRepository::new(self.db)
            .list_by_category_ids(vec![category.id])
            .await?
            .into_iter()
            .map(|drone| version.drone_url(drone.id))
            .collect();

        Ok(category_dto(category, drones, version))
    }
}

fn category_dto(
    category: entity::drone_category::Model,
    drones: Vec<String>,
    version: ApiVersion,
) -> DroneCategoryDto {
    DroneCategoryDto {
        id: category.id,
        url: version.category_url(category.id),
        name: category.name,
        drones,
    }
}
