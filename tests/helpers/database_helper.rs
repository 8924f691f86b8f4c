//! Test database helper utilities
//!
//! Starts a throwaway PostgreSQL container (or connects to
//! `TEST_DATABASE_URL` when set) and runs the crate's migrations on it.

use std::error::Error;
use std::sync::Once;
use standup_bot::database::{create_pool, run_migrations, DatabaseConfig, DatabasePool};
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres as PostgresImage;

static INIT: Once = Once::new();

/// PostgreSQL test database with migrations applied
pub struct TestDatabase {
    pub pool: DatabasePool,
    pub database_url: String,
    _container: Option<ContainerAsync<PostgresImage>>,
}

impl TestDatabase {
    /// Create a new test database instance
    pub async fn new() -> Result<Self, Box<dyn Error>> {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt::try_init();
        });

        // CI provides a database; local runs start a container
        let (database_url, container) = match std::env::var("TEST_DATABASE_URL") {
            Ok(url) => (url, None),
            Err(_) => {
                let container = PostgresImage::default()
                    .with_db_name("test_standup_bot")
                    .with_user("test_user")
                    .with_password("test_password")
                    .start()
                    .await?;
                let host = container.get_host().await?;
                let port = container.get_host_port_ipv4(5432).await?;
                let url = format!(
                    "postgresql://test_user:test_password@{}:{}/test_standup_bot",
                    host, port
                );
                (url, Some(container))
            }
        };

        let config = DatabaseConfig {
            url: database_url.clone(),
            max_connections: 8,
            ..DatabaseConfig::default()
        };
        let pool = create_pool(&config).await?;
        run_migrations(&pool).await?;
        sqlx::query("TRUNCATE standups, standupers, groups RESTART IDENTITY")
            .execute(&pool)
            .await?;

        Ok(Self {
            pool,
            database_url,
            _container: container,
        })
    }

    /// Count records in a table belonging to one chat
    pub async fn count_for_chat(&self, table: &str, chat_id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {} WHERE chat_id = $1", table))
            .bind(chat_id)
            .fetch_one(&self.pool)
            .await
    }
}

/// Test database, or `None` when neither Docker nor `TEST_DATABASE_URL` is
/// available
pub async fn test_database() -> Option<TestDatabase> {
    match TestDatabase::new().await {
        Ok(db) => Some(db),
        Err(e) => {
            eprintln!("skipping database test, no PostgreSQL available: {}", e);
            None
        }
    }
}
