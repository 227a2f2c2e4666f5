use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::throttle::ThrottleRegistry;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub throttle: Arc<ThrottleRegistry>,
}
