use axum::{response::IntoResponse, Extension, Json};

use crate::model::api::ApiVersion;

pub static ROOT_TAG: &str = "api-root";

/// Named hyperlinks to the four collection endpoints of this API version
#[utoipa::path(
    get,
    path = "/api/v1/drone",
    tag = ROOT_TAG,
    responses(
        (status = 200, description = "Links to the collection endpoints")
    ),
)]
pub async fn api_root(Extension(version): Extension<ApiVersion>) -> impl IntoResponse {
    Json(serde_json::json!({
        "drone-categories": version.categories_path(),
        "drones": version.drones_path(),
        "pilots": version.pilots_path(),
        "competitions": version.competitions_path(),
    }))
}
