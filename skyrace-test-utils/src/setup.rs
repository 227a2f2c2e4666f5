use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

pub struct TestSetup {
    pub db: DatabaseConnection,
}

impl TestSetup {
    /// Connects to a fresh in-memory sqlite database
    pub async fn new() -> Result<Self, TestError> {
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestSetup { db })
    }

    /// Creates the given tables in the test database
    pub async fn with_tables(&self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }
}

/// Builds a [`TestSetup`] with tables created from entity definitions.
///
/// With no arguments all six tables are created; otherwise only the listed
/// entities are, keeping unrelated tables out of focused repository tests.
#[macro_export]
macro_rules! test_setup_with_tables {
    // Pattern 1: No entities provided, create every table
    () => {{
        async {
            let setup = $crate::setup::TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                schema.create_table_from_entity(entity::prelude::User),
                schema.create_table_from_entity(entity::prelude::AuthToken),
                schema.create_table_from_entity(entity::prelude::DroneCategory),
                schema.create_table_from_entity(entity::prelude::Drone),
                schema.create_table_from_entity(entity::prelude::Pilot),
                schema.create_table_from_entity(entity::prelude::Competition),
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }
        .await
    }};

    // Pattern 2: Entities provided
    ($($entity:expr),+ $(,)?) => {{
        async {
            let setup = $crate::setup::TestSetup::new().await?;

            let schema = sea_orm::Schema::new(sea_orm::DbBackend::Sqlite);
            let stmts = vec![
                $(schema.create_table_from_entity($entity),)+
            ];
            setup.with_tables(stmts).await?;

            Ok::<_, $crate::error::TestError>(setup)
        }
        .await
    }};
}
