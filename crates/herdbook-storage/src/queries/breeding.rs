//! breeding_records queries.

use chrono::NaiveDate;
use herdbook_core::errors::StorageResult;
use herdbook_core::models::{BreedingRecord, NewBreedingRecord};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::util::{
    date_col, date_to_sql, opt_date_col, opt_date_to_sql, parturition_status_col, sqlite_err,
};

const COLUMNS: &str = "id, herd_id, dam_id, sire_id, coverage_date, dam_weight, \
                       dam_body_condition_score, sire_scrotal_perimeter, \
                       parturition_status, birth_date, observations";

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<BreedingRecord> {
    Ok(BreedingRecord {
        id: row.get(0)?,
        herd_id: row.get(1)?,
        dam_id: row.get(2)?,
        sire_id: row.get(3)?,
        coverage_date: date_col(4, row.get(4)?)?,
        dam_weight: row.get(5)?,
        dam_body_condition_score: row.get(6)?,
        sire_scrotal_perimeter: row.get(7)?,
        parturition_status: parturition_status_col(8, row.get(8)?)?,
        birth_date: opt_date_col(9, row.get(9)?)?,
        observations: row.get(10)?,
    })
}

pub fn insert(conn: &Connection, record: &NewBreedingRecord) -> StorageResult<i64> {
    conn.prepare_cached(
        "INSERT INTO breeding_records
             (herd_id, dam_id, sire_id, coverage_date, dam_weight,
              dam_body_condition_score, sire_scrotal_perimeter,
              parturition_status, birth_date, observations)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )
    .map_err(sqlite_err)?
    .execute(params![
        record.herd_id,
        record.dam_id,
        record.sire_id,
        date_to_sql(record.coverage_date),
        record.dam_weight,
        record.dam_body_condition_score,
        record.sire_scrotal_perimeter,
        record.parturition_status.as_str(),
        opt_date_to_sql(record.birth_date),
        record.observations,
    ])
    .map_err(sqlite_err)?;
    Ok(conn.last_insert_rowid())
}

pub fn get(conn: &Connection, id: i64) -> StorageResult<Option<BreedingRecord>> {
    conn.prepare_cached(&format!(
        "SELECT {COLUMNS} FROM breeding_records WHERE id = ?1"
    ))
    .map_err(sqlite_err)?
    .query_row(params![id], row_to_record)
    .optional()
    .map_err(sqlite_err)
}

/// Whether a coverage already exists for this dam, sire and date. The
/// conversion path checks the triple before inserting and reports a clash
/// as a per-item error.
pub fn exists_for_triple(
    conn: &Connection,
    dam_id: i64,
    sire_id: i64,
    coverage_date: NaiveDate,
) -> StorageResult<bool> {
    let found: Option<i64> = conn
        .prepare_cached(
            "SELECT 1 FROM breeding_records
             WHERE dam_id = ?1 AND sire_id = ?2 AND coverage_date = ?3
             LIMIT 1",
        )
        .map_err(sqlite_err)?
        .query_row(
            params![dam_id, sire_id, date_to_sql(coverage_date)],
            |row| row.get(0),
        )
        .optional()
        .map_err(sqlite_err)?;
    Ok(found.is_some())
}

/// Coverages still awaiting parturition, soonest coverage first.
pub fn list_in_progress_by_herd(
    conn: &Connection,
    herd_id: &str,
) -> StorageResult<Vec<BreedingRecord>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM breeding_records
             WHERE herd_id = ?1 AND parturition_status = 'em_andamento'
             ORDER BY coverage_date, id"
        ))
        .map_err(sqlite_err)?;

    let rows = stmt
        .query_map(params![herd_id], row_to_record)
        .map_err(sqlite_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sqlite_err)
}

/// Total coverages recorded for one sire, any parturition status.
pub fn count_by_sire(conn: &Connection, sire_id: i64) -> StorageResult<i64> {
    conn.prepare_cached("SELECT COUNT(*) FROM breeding_records WHERE sire_id = ?1")
        .map_err(sqlite_err)?
        .query_row(params![sire_id], |row| row.get(0))
        .map_err(sqlite_err)
}

/// Coverages of one sire that ended in a confirmed birth.
pub fn count_births_by_sire(conn: &Connection, sire_id: i64) -> StorageResult<i64> {
    conn.prepare_cached(
        "SELECT COUNT(*) FROM breeding_records
         WHERE sire_id = ?1 AND parturition_status = 'sim'",
    )
    .map_err(sqlite_err)?
    .query_row(params![sire_id], |row| row.get(0))
    .map_err(sqlite_err)
}

/// Coverages of one dam that ended in a confirmed birth.
pub fn count_births_by_dam(conn: &Connection, dam_id: i64) -> StorageResult<i64> {
    conn.prepare_cached(
        "SELECT COUNT(*) FROM breeding_records
         WHERE dam_id = ?1 AND parturition_status = 'sim'",
    )
    .map_err(sqlite_err)?
    .query_row(params![dam_id], |row| row.get(0))
    .map_err(sqlite_err)
}

/// Coverages of one sire still awaiting parturition.
pub fn count_in_progress_by_sire(conn: &Connection, sire_id: i64) -> StorageResult<i64> {
    conn.prepare_cached(
        "SELECT COUNT(*) FROM breeding_records
         WHERE sire_id = ?1 AND parturition_status = 'em_andamento'",
    )
    .map_err(sqlite_err)?
    .query_row(params![sire_id], |row| row.get(0))
    .map_err(sqlite_err)
}
