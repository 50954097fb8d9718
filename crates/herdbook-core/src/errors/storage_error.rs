//! Storage-layer errors.

/// Errors that can occur inside the SQLite persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("malformed row: {message}")]
    InvalidRow { message: String },
}

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
