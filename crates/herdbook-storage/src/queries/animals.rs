//! animals queries.

use herdbook_core::errors::StorageResult;
use herdbook_core::models::{Animal, NewAnimal};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::util::{opt_date_col, opt_date_to_sql, sex_col, sqlite_err};

const COLUMNS: &str =
    "id, herd_id, identification, name, category, sex, birth_date, status, father_id, mother_id";

fn row_to_animal(row: &Row<'_>) -> rusqlite::Result<Animal> {
    Ok(Animal {
        id: row.get(0)?,
        herd_id: row.get(1)?,
        identification: row.get(2)?,
        name: row.get(3)?,
        category: row.get(4)?,
        sex: sex_col(5, row.get(5)?)?,
        birth_date: opt_date_col(6, row.get(6)?)?,
        status: row.get(7)?,
        father_id: row.get(8)?,
        mother_id: row.get(9)?,
    })
}

/// Insert a new animal, returning its assigned id.
pub fn insert(conn: &Connection, animal: &NewAnimal) -> StorageResult<i64> {
    conn.prepare_cached(
        "INSERT INTO animals
             (herd_id, identification, name, category, sex, birth_date, status,
              father_id, mother_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .map_err(sqlite_err)?
    .execute(params![
        animal.herd_id,
        animal.identification,
        animal.name,
        animal.category,
        animal.sex.as_str(),
        opt_date_to_sql(animal.birth_date),
        animal.status,
        animal.father_id,
        animal.mother_id,
    ])
    .map_err(sqlite_err)?;
    Ok(conn.last_insert_rowid())
}

pub fn get(conn: &Connection, animal_id: i64) -> StorageResult<Option<Animal>> {
    conn.prepare_cached(&format!("SELECT {COLUMNS} FROM animals WHERE id = ?1"))
        .map_err(sqlite_err)?
        .query_row(params![animal_id], row_to_animal)
        .optional()
        .map_err(sqlite_err)
}

/// All animals of a herd, id order.
pub fn list_by_herd(conn: &Connection, herd_id: &str) -> StorageResult<Vec<Animal>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM animals WHERE herd_id = ?1 ORDER BY id"
        ))
        .map_err(sqlite_err)?;

    let rows = stmt
        .query_map(params![herd_id], row_to_animal)
        .map_err(sqlite_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sqlite_err)
}

/// Active animals of a herd, id order.
pub fn list_active_by_herd(conn: &Connection, herd_id: &str) -> StorageResult<Vec<Animal>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM animals
             WHERE herd_id = ?1 AND status = 'active'
             ORDER BY id"
        ))
        .map_err(sqlite_err)?;

    let rows = stmt
        .query_map(params![herd_id], row_to_animal)
        .map_err(sqlite_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sqlite_err)
}

/// Males of a herd whose category marks them as breeding sires, id order.
pub fn list_breeding_sires(conn: &Connection, herd_id: &str) -> StorageResult<Vec<Animal>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM animals
             WHERE herd_id = ?1 AND sex = 'M' AND category IN (?2, ?3)
             ORDER BY id"
        ))
        .map_err(sqlite_err)?;

    let [first, second] = herdbook_core::constants::SIRE_CATEGORIES;
    let rows = stmt
        .query_map(params![herd_id, first, second], row_to_animal)
        .map_err(sqlite_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sqlite_err)
}
