//! Growth-based breeding value (dep) from weighing history.

use chrono::NaiveDate;
use herdbook_core::errors::MatingResult;
use herdbook_core::models::{AdjustmentHorizon, WeightRecord};
use herdbook_storage::queries::weights;
use rusqlite::Connection;
use rustc_hash::FxHashMap;

use super::round3;

/// The weighing whose age-at-measurement is closest to `target_days`.
///
/// `records` must be in chronological order; the comparison is strict, so a
/// tie keeps the earlier record. Ages can be negative for weighings recorded
/// before the birth date; they still compete on absolute distance.
pub fn closest_record(
    birth_date: NaiveDate,
    records: &[WeightRecord],
    target_days: i64,
) -> Option<&WeightRecord> {
    let mut best: Option<&WeightRecord> = None;
    let mut best_distance = i64::MAX;

    for record in records {
        let age_days = (record.measurement_date - birth_date).num_days();
        let distance = (age_days - target_days).abs();
        if distance < best_distance {
            best_distance = distance;
            best = Some(record);
        }
    }
    best
}

/// Expected progeny difference for growth, derived from the weighing closest
/// to the adjustment horizon, relative to the herd mean weight.
///
/// `None` only when the animal has no birth date (ages cannot be computed);
/// every other degenerate case resolves to `Some(0.0)`: no weighings, or a
/// zero herd mean.
pub fn dep(
    birth_date: Option<NaiveDate>,
    records: &[WeightRecord],
    herd_mean: f64,
    horizon: AdjustmentHorizon,
) -> Option<f64> {
    let birth_date = birth_date?;
    let Some(best) = closest_record(birth_date, records, horizon.days()) else {
        return Some(0.0);
    };
    if herd_mean == 0.0 {
        return Some(0.0);
    }
    Some(round3((best.weight - herd_mean) / herd_mean))
}

/// Per-herd mean weights, loaded lazily and cached for the duration of one
/// operation. The mean spans every weighing of every animal in the herd,
/// whatever the animals' statuses; a herd with no weighings resolves to 0.
#[derive(Debug, Default)]
pub struct HerdMeans {
    cache: FxHashMap<String, f64>,
}

impl HerdMeans {
    pub fn mean(&mut self, conn: &Connection, herd_id: &str) -> MatingResult<f64> {
        if let Some(mean) = self.cache.get(herd_id) {
            return Ok(*mean);
        }
        let mean = weights::herd_mean_weight(conn, herd_id)?.unwrap_or(0.0);
        self.cache.insert(herd_id.to_string(), mean);
        Ok(mean)
    }
}
