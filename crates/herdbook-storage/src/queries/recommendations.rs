//! mating_recommendations queries.

use chrono::NaiveDate;
use herdbook_core::errors::StorageResult;
use herdbook_core::models::{MatingRecommendation, NewRecommendation, RecommendationStatus};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::util::{opt_date_col, opt_date_to_sql, recommendation_status_col, sqlite_err};

const COLUMNS: &str = "id, simulation_id, herd_id, sire_id, dam_id, predicted_dep, \
                       predicted_index, predicted_inbreeding, predicted_genetic_gain, \
                       status, adopted_date";

fn row_to_recommendation(row: &Row<'_>) -> rusqlite::Result<MatingRecommendation> {
    Ok(MatingRecommendation {
        id: row.get(0)?,
        simulation_id: row.get(1)?,
        herd_id: row.get(2)?,
        sire_id: row.get(3)?,
        dam_id: row.get(4)?,
        predicted_dep: row.get(5)?,
        predicted_index: row.get(6)?,
        predicted_inbreeding: row.get(7)?,
        predicted_genetic_gain: row.get(8)?,
        status: recommendation_status_col(9, row.get(9)?)?,
        adopted_date: opt_date_col(10, row.get(10)?)?,
    })
}

pub fn insert(conn: &Connection, recommendation: &NewRecommendation) -> StorageResult<i64> {
    conn.prepare_cached(
        "INSERT INTO mating_recommendations
             (simulation_id, herd_id, sire_id, dam_id, predicted_dep,
              predicted_index, predicted_inbreeding, predicted_genetic_gain,
              status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 'pending')",
    )
    .map_err(sqlite_err)?
    .execute(params![
        recommendation.simulation_id,
        recommendation.herd_id,
        recommendation.sire_id,
        recommendation.dam_id,
        recommendation.predicted_dep,
        recommendation.predicted_index,
        recommendation.predicted_inbreeding,
        recommendation.predicted_genetic_gain,
    ])
    .map_err(sqlite_err)?;
    Ok(conn.last_insert_rowid())
}

pub fn get(conn: &Connection, id: i64) -> StorageResult<Option<MatingRecommendation>> {
    conn.prepare_cached(&format!(
        "SELECT {COLUMNS} FROM mating_recommendations WHERE id = ?1"
    ))
    .map_err(sqlite_err)?
    .query_row(params![id], row_to_recommendation)
    .optional()
    .map_err(sqlite_err)
}

/// All recommendations of one simulation, best pairing first.
pub fn list_by_simulation(
    conn: &Connection,
    simulation_id: i64,
) -> StorageResult<Vec<MatingRecommendation>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM mating_recommendations
             WHERE simulation_id = ?1
             ORDER BY predicted_genetic_gain DESC, id"
        ))
        .map_err(sqlite_err)?;

    let rows = stmt
        .query_map(params![simulation_id], row_to_recommendation)
        .map_err(sqlite_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sqlite_err)
}

/// Adopted recommendations of one simulation, in adoption insert order.
pub fn list_adopted(
    conn: &Connection,
    simulation_id: i64,
) -> StorageResult<Vec<MatingRecommendation>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM mating_recommendations
             WHERE simulation_id = ?1 AND status = 'adopted'
             ORDER BY id"
        ))
        .map_err(sqlite_err)?;

    let rows = stmt
        .query_map(params![simulation_id], row_to_recommendation)
        .map_err(sqlite_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sqlite_err)
}

/// Move a recommendation to a new status. Returns the number of rows touched,
/// so callers can tell a missing id from a successful update.
pub fn set_status(
    conn: &Connection,
    id: i64,
    status: RecommendationStatus,
    adopted_date: Option<NaiveDate>,
) -> StorageResult<usize> {
    conn.prepare_cached(
        "UPDATE mating_recommendations
         SET status = ?2, adopted_date = ?3
         WHERE id = ?1",
    )
    .map_err(sqlite_err)?
    .execute(params![id, status.as_str(), opt_date_to_sql(adopted_date)])
    .map_err(sqlite_err)
}
