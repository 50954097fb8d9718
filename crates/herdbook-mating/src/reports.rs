//! Herd reports over breeding records.

use chrono::{Duration, NaiveDate};
use herdbook_core::constants::GESTATION_DAYS;
use herdbook_core::errors::MatingResult;
use herdbook_storage::queries::{animals, breeding};
use rusqlite::Connection;
use serde::Serialize;

use crate::evaluation::round2;

/// One in-progress coverage with its projected parturition date.
#[derive(Debug, Clone, Serialize)]
pub struct BirthForecast {
    pub breeding_record_id: i64,
    pub dam_id: i64,
    pub dam_name: Option<String>,
    pub sire_id: i64,
    pub sire_name: Option<String>,
    pub coverage_date: NaiveDate,
    pub predicted_birth_date: NaiveDate,
    /// Negative once the predicted date has passed.
    pub days_until_birth: i64,
}

/// Every in-progress coverage of the herd, soonest coverage first, with the
/// birth date projected at a fixed gestation length past the coverage.
pub fn birth_forecast(
    conn: &Connection,
    herd_id: &str,
    today: NaiveDate,
) -> MatingResult<Vec<BirthForecast>> {
    let mut forecasts = Vec::new();
    for record in breeding::list_in_progress_by_herd(conn, herd_id)? {
        let predicted_birth_date = record.coverage_date + Duration::days(GESTATION_DAYS);
        let dam_name = animals::get(conn, record.dam_id)?.and_then(|a| a.name);
        let sire_name = animals::get(conn, record.sire_id)?.and_then(|a| a.name);

        forecasts.push(BirthForecast {
            breeding_record_id: record.id,
            dam_id: record.dam_id,
            dam_name,
            sire_id: record.sire_id,
            sire_name,
            coverage_date: record.coverage_date,
            predicted_birth_date,
            days_until_birth: (predicted_birth_date - today).num_days(),
        });
    }
    Ok(forecasts)
}

/// Coverage totals and resulting birth rate for one breeding sire.
#[derive(Debug, Clone, Serialize)]
pub struct SireCoverageStats {
    pub sire_id: i64,
    pub sire_name: Option<String>,
    pub total_coverages: i64,
    pub total_births: i64,
    pub total_in_progress: i64,
    /// Births per coverage as a percentage, two decimals; 0 with no
    /// coverages.
    pub birth_rate: f64,
}

/// Consolidated coverage counts for every breeding sire of the herd, in
/// registry order.
pub fn sire_coverage_stats(
    conn: &Connection,
    herd_id: &str,
) -> MatingResult<Vec<SireCoverageStats>> {
    let mut stats = Vec::new();
    for sire in animals::list_breeding_sires(conn, herd_id)? {
        let total_coverages = breeding::count_by_sire(conn, sire.id)?;
        let total_births = breeding::count_births_by_sire(conn, sire.id)?;
        let total_in_progress = breeding::count_in_progress_by_sire(conn, sire.id)?;

        let birth_rate = if total_coverages > 0 {
            round2(total_births as f64 / total_coverages as f64 * 100.0)
        } else {
            0.0
        };

        stats.push(SireCoverageStats {
            sire_id: sire.id,
            sire_name: sire.name,
            total_coverages,
            total_births,
            total_in_progress,
            birth_rate,
        });
    }
    Ok(stats)
}
