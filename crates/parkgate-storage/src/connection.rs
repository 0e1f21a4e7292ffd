#![allow(async_fn_in_trait)]

//! Pool setup for the SQLite backend.

use crate::error::{StorageError, StorageResult};
use parkgate_core::StorageConfig;
use parkgate_core::constants::DEFAULT_DATABASE_PATH;
use sqlx::ConnectOptions;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// How to open the lot database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub database_path: PathBuf,
    pub max_connections: u32,
    /// How long a writer waits on a locked database before failing.
    pub busy_timeout: Duration,
    /// Apply pending migrations when the pool opens.
    pub migrate_on_open: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            max_connections: 4,
            busy_timeout: Duration::from_secs(5),
            migrate_on_open: true,
        }
    }
}

impl DatabaseConfig {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            ..Self::default()
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn migrate_on_open(mut self, migrate: bool) -> Self {
        self.migrate_on_open = migrate;
        self
    }

    fn connect_options(&self) -> SqliteConnectOptions {
        SqliteConnectOptions::new()
            .filename(&self.database_path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(self.busy_timeout)
            .disable_statement_logging()
    }
}

impl From<&StorageConfig> for DatabaseConfig {
    fn from(config: &StorageConfig) -> Self {
        Self::new(config.database_path.clone()).max_connections(config.max_connections)
    }
}

/// Shared handle on the lot database. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database file, creating it and its directory if needed.
    ///
    /// ```no_run
    /// use parkgate_storage::{Database, DatabaseConfig};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let db = Database::new(DatabaseConfig::new("/var/lib/parkgate/lot.db")).await?;
    /// db.health_check().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn new(config: DatabaseConfig) -> StorageResult<Self> {
        if let Some(dir) = config.database_path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(|e| {
                StorageError::Configuration(format!("cannot create {}: {e}", dir.display()))
            })?;
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.connect_options())
            .await?;
        let db = Self { pool };

        if config.migrate_on_open {
            db.migrate().await?;
        }

        info!(
            path = %config.database_path.display(),
            max_connections = config.max_connections,
            "lot database open"
        );
        Ok(db)
    }

    /// Fresh, migrated database that lives as long as the pool.
    ///
    /// Limited to one connection: every SQLite `:memory:` connection is its
    /// own database.
    pub async fn in_memory() -> StorageResult<Self> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Apply the embedded schema migrations. Safe to call repeatedly.
    pub async fn migrate(&self) -> StorageResult<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        debug!("schema up to date");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn health_check(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// `"SQLite <version>"`.
    pub async fn server_version(&self) -> StorageResult<String> {
        let version: String = sqlx::query_scalar("SELECT sqlite_version()")
            .fetch_one(&self.pool)
            .await?;
        Ok(format!("SQLite {version}"))
    }
}

/// Reachability probe for the maintenance connection test.
pub trait ServerProbe: Send + Sync {
    /// Version string reported by the backend.
    async fn server_version(&self) -> StorageResult<String>;
}

impl ServerProbe for Database {
    async fn server_version(&self) -> StorageResult<String> {
        Database::server_version(self).await
    }
}
