//! Database module providing connection management, migrations, and queries.

pub mod assignments;
pub mod library;
pub mod profiles;
pub mod seed_lookup;
pub mod service_reports;
pub mod service_types;

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use secrecy::ExposeSecret;

use crate::config::DatabaseSettings;
use crate::error::{AppError, AppResult};
use crate::migration::Migrator;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect to PostgreSQL with the configured pool bounds.
    pub async fn new(settings: &DatabaseSettings) -> AppResult<Self> {
        let mut options = ConnectOptions::new(settings.url.expose_secret().to_string());
        options
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        Ok(DbPool { conn })
    }

    /// Get access to the connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Apply pending migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None).await?;
        Ok(())
    }

    /// Round-trip a trivial statement to check the database is reachable.
    pub async fn ping(&self) -> AppResult<()> {
        self.conn.execute_unprepared("SELECT 1").await?;
        Ok(())
    }
}

impl From<DatabaseConnection> for DbPool {
    fn from(conn: DatabaseConnection) -> Self {
        DbPool { conn }
    }
}
