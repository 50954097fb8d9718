//! herds queries.

use herdbook_core::errors::StorageResult;
use herdbook_core::models::Herd;
use rusqlite::{params, Connection, OptionalExtension};

use super::util::sqlite_err;

pub fn insert(conn: &Connection, herd: &Herd) -> StorageResult<()> {
    conn.prepare_cached("INSERT INTO herds (id, name, property_id) VALUES (?1, ?2, ?3)")
        .map_err(sqlite_err)?
        .execute(params![herd.id, herd.name, herd.property_id])
        .map_err(sqlite_err)?;
    Ok(())
}

pub fn get(conn: &Connection, herd_id: &str) -> StorageResult<Option<Herd>> {
    conn.prepare_cached("SELECT id, name, property_id FROM herds WHERE id = ?1")
        .map_err(sqlite_err)?
        .query_row(params![herd_id], |row| {
            Ok(Herd {
                id: row.get(0)?,
                name: row.get(1)?,
                property_id: row.get(2)?,
            })
        })
        .optional()
        .map_err(sqlite_err)
}
