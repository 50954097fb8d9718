//! genetic_evaluations queries.

use herdbook_core::errors::StorageResult;
use herdbook_core::models::{EvaluationUpdate, GeneticEvaluation};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::util::{date_col, date_to_sql, sqlite_err};

const COLUMNS: &str = "id, animal_id, herd_id, inbreeding_coefficient, dep, selection_index, \
                       number_of_offspring, last_evaluation_date, adjusted_weight_60d, \
                       adjusted_weight_120d, adjusted_weight_180d, scrotal_perimeter, observations";

fn row_to_evaluation(row: &Row<'_>) -> rusqlite::Result<GeneticEvaluation> {
    Ok(GeneticEvaluation {
        id: row.get(0)?,
        animal_id: row.get(1)?,
        herd_id: row.get(2)?,
        inbreeding_coefficient: row.get(3)?,
        dep: row.get(4)?,
        selection_index: row.get(5)?,
        number_of_offspring: row.get(6)?,
        last_evaluation_date: date_col(7, row.get(7)?)?,
        adjusted_weight_60d: row.get(8)?,
        adjusted_weight_120d: row.get(9)?,
        adjusted_weight_180d: row.get(10)?,
        scrotal_perimeter: row.get(11)?,
        observations: row.get(12)?,
    })
}

/// Write one animal's evaluator-owned columns, inserting the row if this is
/// the animal's first evaluation. Manually curated columns (adjusted weights,
/// scrotal perimeter, observations) are untouched on update, so re-running an
/// evaluation never erases hand-entered data.
pub fn upsert(conn: &Connection, update: &EvaluationUpdate) -> StorageResult<()> {
    conn.prepare_cached(
        "INSERT INTO genetic_evaluations
             (animal_id, herd_id, inbreeding_coefficient, dep, selection_index,
              number_of_offspring, last_evaluation_date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(animal_id) DO UPDATE SET
             inbreeding_coefficient = excluded.inbreeding_coefficient,
             dep = excluded.dep,
             selection_index = excluded.selection_index,
             number_of_offspring = excluded.number_of_offspring,
             last_evaluation_date = excluded.last_evaluation_date",
    )
    .map_err(sqlite_err)?
    .execute(params![
        update.animal_id,
        update.herd_id,
        update.inbreeding_coefficient,
        update.dep,
        update.selection_index,
        update.number_of_offspring,
        date_to_sql(update.last_evaluation_date),
    ])
    .map_err(sqlite_err)?;
    Ok(())
}

pub fn get_by_animal(
    conn: &Connection,
    animal_id: i64,
) -> StorageResult<Option<GeneticEvaluation>> {
    conn.prepare_cached(&format!(
        "SELECT {COLUMNS} FROM genetic_evaluations WHERE animal_id = ?1"
    ))
    .map_err(sqlite_err)?
    .query_row(params![animal_id], row_to_evaluation)
    .optional()
    .map_err(sqlite_err)
}

pub fn list_by_herd(conn: &Connection, herd_id: &str) -> StorageResult<Vec<GeneticEvaluation>> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM genetic_evaluations
             WHERE herd_id = ?1
             ORDER BY animal_id"
        ))
        .map_err(sqlite_err)?;

    let rows = stmt
        .query_map(params![herd_id], row_to_evaluation)
        .map_err(sqlite_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(sqlite_err)
}
