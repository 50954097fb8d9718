//! Connection lifecycle: open, configure, migrate.

pub mod pragmas;

use std::path::Path;

use herdbook_core::errors::{StorageError, StorageResult};
use rusqlite::Connection;

/// Open (creating if needed) a file-backed database, apply pragmas, and run
/// any pending migrations.
pub fn open(path: &Path) -> StorageResult<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| StorageError::SqliteError {
                message: format!("failed to create database directory: {e}"),
            })?;
        }
    }

    let conn = Connection::open(path).map_err(|e| StorageError::SqliteError {
        message: format!("failed to open {}: {e}", path.display()),
    })?;
    pragmas::apply_pragmas(&conn)?;
    crate::migrations::run_migrations(&conn)?;
    Ok(conn)
}

/// Open an in-memory database with the full schema (for tests).
pub fn open_in_memory() -> StorageResult<Connection> {
    let conn = Connection::open_in_memory().map_err(|e| StorageError::SqliteError {
        message: format!("failed to open in-memory database: {e}"),
    })?;
    pragmas::apply_pragmas(&conn)?;
    crate::migrations::run_migrations(&conn)?;
    Ok(conn)
}
