//! weight_records queries.

use herdbook_core::errors::StorageResult;
use herdbook_core::models::{NewWeightRecord, WeightRecord};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::util::{date_col, date_to_sql, sqlite_err};

const COLUMNS: &str = "id, animal_id, measurement_date, weight, conformation_score, \
                       precocity_score, musculature_score, cpm_average";

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<WeightRecord> {
    Ok(WeightRecord {
        id: row.get(0)?,
        animal_id: row.get(1)?,
        measurement_date: date_col(2, row.get(2)?)?,
        weight: row.get(3)?,
        conformation_score: row.get(4)?,
        precocity_score: row.get(5)?,
        musculature_score: row.get(6)?,
        cpm_average: row.get(7)?,
    })
}

/// Append a weighing. The composite appraisal average is derived here so the
/// stored row never disagrees with its three scores.
pub fn insert(conn: &Connection, record: &NewWeightRecord) -> StorageResult<i64> {
    conn.prepare_cached(
        "INSERT INTO weight_records
             (animal_id, measurement_date, weight, conformation_score,
              precocity_score, musculature_score, cpm_average)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .map_err(sqlite_err)?
    .execute(params![
        record.animal_id,
        date_to_sql(record.measurement_date),
        record.weight,
        record.conformation_score,
        record.precocity_score,
        record.musculature_score,
        record.cpm_average(),
    ])
    .map_err(sqlite_err)?;
    Ok(conn.last_insert_rowid())
}

/// Weighing history of one animal in chronological order. Insertion order
/// breaks same-day ties, which the closest-weighing selection relies on.
pub fn list_by_animal(conn: &Connection, animal_id: i64) -> StorageResult<Vec<WeightRecord>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM weight_records
             WHERE animal_id = ?1
             ORDER BY measurement_date, id"
        ))
        .map_err(sqlite_err)?;

    let rows = stmt
        .query_map(params![animal_id], row_to_record)
        .map_err(sqlite_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sqlite_err)
}

/// The most recent weighing of one animal, if any.
pub fn latest_for_animal(conn: &Connection, animal_id: i64) -> StorageResult<Option<WeightRecord>> {
    conn.prepare_cached(&format!(
        "SELECT {COLUMNS} FROM weight_records
         WHERE animal_id = ?1
         ORDER BY measurement_date DESC, id DESC
         LIMIT 1"
    ))
    .map_err(sqlite_err)?
    .query_row(params![animal_id], row_to_record)
    .optional()
    .map_err(sqlite_err)
}

/// Mean weight across every weighing of every animal in the herd, whatever
/// the animals' statuses. `None` when the herd has no weighings at all.
pub fn herd_mean_weight(conn: &Connection, herd_id: &str) -> StorageResult<Option<f64>> {
    conn.prepare_cached(
        "SELECT AVG(w.weight)
         FROM weight_records w
         JOIN animals a ON a.id = w.animal_id
         WHERE a.herd_id = ?1",
    )
    .map_err(sqlite_err)?
    .query_row(params![herd_id], |row| row.get::<_, Option<f64>>(0))
    .map_err(sqlite_err)
}
