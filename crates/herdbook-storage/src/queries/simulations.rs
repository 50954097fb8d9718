//! simulation_parameters queries.

use herdbook_core::errors::StorageResult;
use herdbook_core::models::{NewSimulation, SimulationParameters};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::util::{date_col, date_to_sql, horizon_col, sqlite_err, strategy_col};

const COLUMNS: &str = "id, herd_id, simulation_date, heritability, min_age_male_months, \
                       min_age_female_months, weight_adjustment_days, \
                       max_female_percentage_per_male, strategy";

fn row_to_simulation(row: &Row<'_>) -> rusqlite::Result<SimulationParameters> {
    Ok(SimulationParameters {
        id: row.get(0)?,
        herd_id: row.get(1)?,
        simulation_date: date_col(2, row.get(2)?)?,
        heritability: row.get(3)?,
        min_age_male_months: row.get(4)?,
        min_age_female_months: row.get(5)?,
        weight_adjustment: horizon_col(6, row.get(6)?)?,
        max_female_percentage_per_male: row.get(7)?,
        strategy: strategy_col(8, row.get(8)?)?,
    })
}

pub fn insert(conn: &Connection, simulation: &NewSimulation) -> StorageResult<i64> {
    conn.prepare_cached(
        "INSERT INTO simulation_parameters
             (herd_id, simulation_date, heritability, min_age_male_months,
              min_age_female_months, weight_adjustment_days,
              max_female_percentage_per_male, strategy)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .map_err(sqlite_err)?
    .execute(params![
        simulation.herd_id,
        date_to_sql(simulation.simulation_date),
        simulation.heritability,
        simulation.min_age_male_months,
        simulation.min_age_female_months,
        i64::from(simulation.weight_adjustment),
        simulation.max_female_percentage_per_male,
        simulation.strategy.as_str(),
    ])
    .map_err(sqlite_err)?;
    Ok(conn.last_insert_rowid())
}

pub fn get(conn: &Connection, id: i64) -> StorageResult<Option<SimulationParameters>> {
    conn.prepare_cached(&format!(
        "SELECT {COLUMNS} FROM simulation_parameters WHERE id = ?1"
    ))
    .map_err(sqlite_err)?
    .query_row(params![id], row_to_simulation)
    .optional()
    .map_err(sqlite_err)
}
