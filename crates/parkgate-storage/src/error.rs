use thiserror::Error;

/// Backend failures.
///
/// Every variant means the backend could not answer. Business outcomes such
/// as "no vehicle inside" or "inactive operator" come back as values.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored plate, ticket or role no longer passes domain validation.
    #[error("Invalid stored value: {0}")]
    InvalidRow(#[from] parkgate_core::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type StorageResult<T> = Result<T, StorageError>;
