pub use sea_orm_migration::prelude::*;

mod m20260807_000001_user;
mod m20260807_000002_auth_token;
mod m20260807_000003_drone_category;
mod m20260807_000004_drone;
mod m20260807_000005_pilot;
mod m20260807_000006_competition;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260807_000001_user::Migration),
            Box::new(m20260807_000002_auth_token::Migration),
            Box::new(m20260807_000003_drone_category::Migration),
            Box::new(m20260807_000004_drone::Migration),
            Box::new(m20260807_000005_pilot::Migration),
            Box::new(m20260807_000006_competition::Migration),
        ]
    }
}
