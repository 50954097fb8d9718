use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Genetic evaluation of one animal: exactly one row per animal, refreshed
/// in place on every evaluation run (last-write-wins, no history).
///
/// The adjusted-weight, scrotal-perimeter, and observations fields are
/// recorded manually by technicians; the evaluator never writes them and the
/// refresh must leave them untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneticEvaluation {
    pub id: i64,
    pub animal_id: i64,
    pub herd_id: String,
    /// Shared-ancestor inbreeding estimate as a percentage in [0, 100].
    pub inbreeding_coefficient: f64,
    /// Growth-based breeding value; `None` when it could not be derived.
    pub dep: Option<f64>,
    /// Composite selection index; `None` when it could not be derived.
    pub selection_index: Option<f64>,
    /// Completed parturitions where this animal was sire or dam.
    pub number_of_offspring: i64,
    pub last_evaluation_date: NaiveDate,
    pub adjusted_weight_60d: Option<f64>,
    pub adjusted_weight_120d: Option<f64>,
    pub adjusted_weight_180d: Option<f64>,
    /// Scrotal perimeter in cm, males only.
    pub scrotal_perimeter: Option<f64>,
    pub observations: Option<String>,
}

/// The evaluator-owned slice of a [`GeneticEvaluation`], applied as an
/// idempotent upsert keyed on `animal_id`.
#[derive(Debug, Clone)]
pub struct EvaluationUpdate {
    pub animal_id: i64,
    pub herd_id: String,
    pub inbreeding_coefficient: f64,
    pub dep: Option<f64>,
    pub selection_index: Option<f64>,
    pub number_of_offspring: i64,
    pub last_evaluation_date: NaiveDate,
}
