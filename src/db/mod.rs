//! Database module providing connection management, the record store and query compilation.

pub mod memory;
pub mod query_compiler;
pub mod store;

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

pub use memory::MemoryStore;
pub use store::{Page, SortKey, TestStore};

/// Table holding every test record.
pub const TESTS_TABLE: &str = "oar_tests";

/// Idempotent schema bootstrap for the tests table.
const SCHEMA_STATEMENTS: [&str; 4] = [
    "CREATE TABLE IF NOT EXISTS oar_tests (
        id BIGSERIAL PRIMARY KEY,
        summary TEXT NOT NULL,
        outcome TEXT NOT NULL,
        analysis TEXT NOT NULL DEFAULT 'NotAnalyzed',
        resolution TEXT NOT NULL DEFAULT 'Unresolved',
        created TIMESTAMPTZ NOT NULL DEFAULT now(),
        modified TIMESTAMPTZ NOT NULL DEFAULT now(),
        doc JSONB NOT NULL DEFAULT '{}'::jsonb
    )",
    "CREATE INDEX IF NOT EXISTS idx_oar_tests_created ON oar_tests (created DESC)",
    "CREATE INDEX IF NOT EXISTS idx_oar_tests_modified ON oar_tests (modified DESC)",
    "CREATE INDEX IF NOT EXISTS idx_oar_tests_doc ON oar_tests USING GIN (doc)",
];

/// PostgreSQL connection pool wrapper.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect to PostgreSQL using the pool settings from configuration.
    pub async fn new(config: &DatabaseConfig) -> AppResult<Self> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .sqlx_logging(false);

        let conn = Database::connect(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        Ok(DbPool { conn })
    }

    /// Get access to the underlying connection pool.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Create the tests table and its indexes if they do not exist yet.
    pub async fn ensure_schema(&self) -> AppResult<()> {
        for statement in SCHEMA_STATEMENTS {
            self.conn
                .execute_unprepared(statement)
                .await
                .map_err(|e| AppError::Database(format!("Failed to prepare schema: {}", e)))?;
        }
        info!("Table {} is ready", TESTS_TABLE);
        Ok(())
    }
}
