use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use skyrace::{
    config::Config,
    model::app::AppState,
    router, startup,
    throttle::{self, ThrottleRegistry},
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let db = startup::connect_to_database(&config)
        .await
        .expect("Failed to connect to database");

    let throttle = Arc::new(ThrottleRegistry::new(
        config.throttle_drones_per_minute,
        config.throttle_pilots_per_minute,
    ));

    let state = AppState { db, throttle };

    let app = router::routes()
        .with_state(state.clone())
        .layer(axum::middleware::from_fn_with_state(
            state,
            throttle::throttle_requests,
        ));

    tracing::info!("Starting server on {}", config.bind_address);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .expect("Failed to bind address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}
