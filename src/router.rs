//! HTTP routing and OpenAPI documentation configuration.
//!
//! The API is mounted twice: the v1 tree under `/api/v1/drone/` and the v2
//! tree under `/api/v2/drone/`, which renames the category and drone path
//! segments to `vehicle-categories` and `vehicles`. Both trees share the
//! same handlers; an [`ApiVersion`] extension tells them which spelling to
//! use when building hyperlinks. OpenAPI documentation covers the v1 tree
//! and Swagger UI is served at `/api/docs`.

use axum::{
    routing::{get, post},
    Extension, Router,
};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    controller,
    model::{api::ApiVersion, app::AppState},
};

/// Builds the application's HTTP router with both API versions and Swagger UI.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Skyrace", description = "Drone racing REST API"), tags(
        (name = controller::root::ROOT_TAG, description = "API entry point"),
        (name = controller::category::CATEGORY_TAG, description = "Drone category API routes"),
        (name = controller::drone::DRONE_TAG, description = "Drone API routes"),
        (name = controller::pilot::PILOT_TAG, description = "Pilot API routes"),
        (name = controller::competition::COMPETITION_TAG, description = "Competition API routes"),
        (name = controller::auth::AUTH_TAG, description = "Authentication API routes"),
    ))]
    struct ApiDoc;

    let (v1, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::root::api_root))
        .routes(routes!(
            controller::category::list_categories,
            controller::category::create_category
        ))
        .routes(routes!(
            controller::category::get_category,
            controller::category::update_category,
            controller::category::partial_update_category,
            controller::category::delete_category
        ))
        .routes(routes!(
            controller::drone::list_drones,
            controller::drone::create_drone
        ))
        .routes(routes!(
            controller::drone::get_drone,
            controller::drone::update_drone,
            controller::drone::partial_update_drone,
            controller::drone::delete_drone
        ))
        .routes(routes!(
            controller::pilot::list_pilots,
            controller::pilot::create_pilot
        ))
        .routes(routes!(
            controller::pilot::get_pilot,
            controller::pilot::update_pilot,
            controller::pilot::partial_update_pilot,
            controller::pilot::delete_pilot
        ))
        .routes(routes!(
            controller::competition::list_competitions,
            controller::competition::create_competition
        ))
        .routes(routes!(
            controller::competition::get_competition,
            controller::competition::update_competition,
            controller::competition::partial_update_competition,
            controller::competition::delete_competition
        ))
        .routes(routes!(controller::auth::register))
        .routes(routes!(controller::auth::obtain_token))
        .split_for_parts();

    let v1 = v1.layer(Extension(ApiVersion::V1));
    let v2 = v2_routes().layer(Extension(ApiVersion::V2));

    Router::new()
        .merge(v1)
        .merge(v2)
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}

/// The v2 tree: same handlers, renamed category and drone path segments.
fn v2_routes() -> Router<AppState> {
    use controller::{auth, category, competition, drone, pilot, root};

    Router::new()
        .route("/api/v2/drone", get(root::api_root))
        .route(
            "/api/v2/drone/vehicle-categories",
            get(category::list_categories).post(category::create_category),
        )
        .route(
            "/api/v2/drone/vehicle-categories/{id}",
            get(category::get_category)
                .put(category::update_category)
                .patch(category::partial_update_category)
                .delete(category::delete_category),
        )
        .route(
            "/api/v2/drone/vehicles",
            get(drone::list_drones).post(drone::create_drone),
        )
        .route(
            "/api/v2/drone/vehicles/{id}",
            get(drone::get_drone)
                .put(drone::update_drone)
                .patch(drone::partial_update_drone)
                .delete(drone::delete_drone),
        )
        .route(
            "/api/v2/drone/pilots",
            get(pilot::list_pilots).post(pilot::create_pilot),
        )
        .route(
            "/api/v2/drone/pilots/{id}",
            get(pilot::get_pilot)
                .put(pilot::update_pilot)
                .patch(pilot::partial_update_pilot)
                .delete(pilot::delete_pilot),
        )
        .route(
            "/api/v2/drone/competitions",
            get(competition::list_competitions).post(competition::create_competition),
        )
        .route(
            "/api/v2/drone/competitions/{id}",
            get(competition::get_competition)
                .put(competition::update_competition)
                .patch(competition::partial_update_competition)
                .delete(competition::delete_competition),
        )
        .route("/api/v2/drone/auth/register", post(auth::register))
        .route("/api/v2/drone/auth/token", post(auth::obtain_token))
}
