//! API data transfer objects, request payloads, and list query parameters.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Default number of results per list page.
pub const DEFAULT_PAGE_SIZE: u64 = 4;
/// Upper bound for the `limit` query parameter.
pub const MAX_PAGE_SIZE: u64 = 100;

/// API tree version a request was routed through.
///
/// Both versions share handlers; v2 renames the category and drone path
/// segments, so every hyperlink in a response is built through this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiVersion {
    V1,
    V2,
}

impl ApiVersion {
    pub fn root_path(&self) -> &'static str {
        match self {
            Self::V1 => "/api/v1/drone",
            Self::V2 => "/api/v2/drone",
        }
    }

    pub fn categories_path(&self) -> String {
        let segment = match self {
            Self::V1 => "drone-categories",
            Self::V2 => "vehicle-categories",
        };

        format!("{}/{}", self.root_path(), segment)
    }

    pub fn drones_path(&self) -> String {
        let segment = match self {
            Self::V1 => "drones",
            Self::V2 => "vehicles",
        };

        format!("{}/{}", self.root_path(), segment)
    }

    pub fn pilots_path(&self) -> String {
        format!("{}/pilots", self.root_path())
    }

    pub fn competitions_path(&self) -> String {
        format!("{}/competitions", self.root_path())
    }

    pub fn category_url(&self, id: i32) -> String {
        format!("{}/{}", self.categories_path(), id)
    }

    pub fn drone_url(&self, id: i32) -> String {
        format!("{}/{}", self.drones_path(), id)
    }

    pub fn pilot_url(&self, id: i32) -> String {
        format!("{}/{}", self.pilots_path(), id)
    }

    pub fn competition_url(&self, id: i32) -> String {
        format!("{}/{}", self.competitions_path(), id)
    }
}

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Pagination envelope for list responses.
///
/// `next` and `previous` are path-relative hyperlinks carrying the
/// limit/offset window, or null at either end of the result set.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(count: u64, limit: u64, offset: u64, base_path: &str, results: Vec<T>) -> Self {
        let next = if offset + limit < count {
            Some(format!(
                "{}?limit={}&offset={}",
                base_path,
                limit,
                offset + limit
            ))
        } else {
            None
        };

        let previous = if offset > 0 {
            Some(format!(
                "{}?limit={}&offset={}",
                base_path,
                limit,
                offset.saturating_sub(limit)
            ))
        } else {
            None
        };

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}

/// Clamp raw limit/offset query values to an effective page window.
pub fn page_window(limit: Option<u64>, offset: Option<u64>) -> (u64, u64) {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = offset.unwrap_or(0);

    (limit, offset)
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct DroneCategoryDto {
    pub id: i32,
    pub url: String,
    pub name: String,
    /// Hyperlinks to the drones in this category
    pub drones: Vec<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct DroneDto {
    pub id: i32,
    pub url: String,
    pub name: String,
    /// Name of the category this drone belongs to
    pub drone_category: String,
    /// Username of the owning user, assigned by the server on creation
    pub owner: String,
    pub manufacturing_date: NaiveDateTime,
    pub has_it_competed: bool,
    pub inserted_timestamp: NaiveDateTime,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CompetitionDto {
    pub id: i32,
    pub url: String,
    pub distance_in_feet: i32,
    pub distance_achievement_date: NaiveDateTime,
    /// Name of the drone that achieved the distance
    pub drone: String,
    /// Name of the pilot that flew the drone
    pub pilot: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PilotDto {
    pub id: i32,
    pub url: String,
    pub name: String,
    /// Gender code, `M` or `F`
    pub gender: String,
    pub gender_description: String,
    pub races_count: i32,
    pub inserted_timestamp: NaiveDateTime,
    /// Competitions flown by this pilot
    pub competitions: Vec<CompetitionDto>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct TokenDto {
    pub token: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DroneCategoryPayload {
    pub name: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DroneCategoryPatch {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DronePayload {
    pub name: String,
    /// Name of an existing drone category
    pub drone_category: String,
    pub manufacturing_date: NaiveDateTime,
    pub has_it_competed: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DronePatch {
    pub name: Option<String>,
    pub drone_category: Option<String>,
    pub manufacturing_date: Option<NaiveDateTime>,
    pub has_it_competed: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PilotPayload {
    pub name: String,
    /// Gender code, `M` or `F`, defaults to `M`
    pub gender: Option<String>,
    pub races_count: Option<i32>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PilotPatch {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub races_count: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CompetitionPayload {
    pub distance_in_feet: i32,
    pub distance_achievement_date: NaiveDateTime,
    /// Name of an existing drone
    pub drone: String,
    /// Name of an existing pilot
    pub pilot: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CompetitionPatch {
    pub distance_in_feet: Option<i32>,
    pub distance_achievement_date: Option<NaiveDateTime>,
    pub drone: Option<String>,
    pub pilot: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CredentialsPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DroneCategoryListParams {
    /// Exact name filter
    pub name: Option<String>,
    /// Substring search on the name
    pub search: Option<String>,
    /// Ordering key (`name`), prefix with `-` for descending
    pub ordering: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DroneListParams {
    /// Exact name filter
    pub name: Option<String>,
    /// Filter by category id
    pub drone_category: Option<i32>,
    pub manufacturing_date: Option<NaiveDateTime>,
    pub has_it_competed: Option<bool>,
    /// Starts-with search on the name
    pub search: Option<String>,
    /// Ordering key (`name`, `manufacturing_date`), prefix with `-` for descending
    pub ordering: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PilotListParams {
    /// Exact name filter
    pub name: Option<String>,
    /// Gender code filter, `M` or `F`
    pub gender: Option<String>,
    pub races_count: Option<i32>,
    /// Starts-with search on the name
    pub search: Option<String>,
    /// Ordering key (`name`, `races_count`), prefix with `-` for descending
    pub ordering: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompetitionListParams {
    pub distance_in_feet: Option<i32>,
    /// Achievement date lower bound (inclusive)
    pub from_achievement_date: Option<NaiveDateTime>,
    /// Achievement date upper bound (inclusive)
    pub to_achievement_date: Option<NaiveDateTime>,
    pub min_distance_in_feet: Option<i32>,
    pub max_distance_in_feet: Option<i32>,
    /// Filter by the related drone's name
    pub drone_name: Option<String>,
    /// Filter by the related pilot's name
    pub pilot_name: Option<String>,
    /// Ordering key (`distance_in_feet`, `distance_achievement_date`),
    /// prefix with `-` for descending
    pub ordering: Option<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}
