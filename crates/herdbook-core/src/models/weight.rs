use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One weighing of one animal. Append-only: rows are never mutated after
/// insert, except that `cpm_average` is derived once at insert time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightRecord {
    pub id: i64,
    pub animal_id: i64,
    pub measurement_date: NaiveDate,
    /// Live weight in kilograms.
    pub weight: f64,
    /// Conformation score (1-6), when visually appraised.
    pub conformation_score: Option<i32>,
    /// Precocity score (1-6).
    pub precocity_score: Option<i32>,
    /// Musculature score (1-6).
    pub musculature_score: Option<i32>,
    /// Mean of the three appraisal scores, present only when all three are.
    pub cpm_average: Option<f64>,
}

/// Insert payload for a new weighing.
#[derive(Debug, Clone)]
pub struct NewWeightRecord {
    pub animal_id: i64,
    pub measurement_date: NaiveDate,
    pub weight: f64,
    pub conformation_score: Option<i32>,
    pub precocity_score: Option<i32>,
    pub musculature_score: Option<i32>,
}

impl NewWeightRecord {
    /// Plain weighing without visual appraisal scores.
    pub fn bare(animal_id: i64, measurement_date: NaiveDate, weight: f64) -> Self {
        Self {
            animal_id,
            measurement_date,
            weight,
            conformation_score: None,
            precocity_score: None,
            musculature_score: None,
        }
    }

    /// Composite appraisal average, defined only when all three scores are.
    pub fn cpm_average(&self) -> Option<f64> {
        match (
            self.conformation_score,
            self.precocity_score,
            self.musculature_score,
        ) {
            (Some(c), Some(p), Some(m)) => Some(f64::from(c + p + m) / 3.0),
            _ => None,
        }
    }
}
