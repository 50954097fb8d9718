use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Review status of a recommendation.
///
/// `pending --adopt--> adopted` and `pending --ignore--> ignored`; the two
/// right-hand states are terminal. Re-adoption is not guarded: adopting an
/// already-adopted recommendation merely refreshes `adopted_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    Pending,
    Adopted,
    Ignored,
}

impl RecommendationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationStatus::Pending => "pending",
            RecommendationStatus::Adopted => "adopted",
            RecommendationStatus::Ignored => "ignored",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(RecommendationStatus::Pending),
            "adopted" => Some(RecommendationStatus::Adopted),
            "ignored" => Some(RecommendationStatus::Ignored),
            _ => None,
        }
    }
}

/// One sire×dam pairing accepted by the optimizer for a given simulation.
///
/// Created in bulk by the simulation run; only the lifecycle operations may
/// mutate `status`/`adopted_date`; the optimizer never deletes rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatingRecommendation {
    pub id: i64,
    pub simulation_id: i64,
    pub herd_id: String,
    pub sire_id: i64,
    pub dam_id: i64,
    /// Mean of the two candidates' growth-based breeding values.
    pub predicted_dep: f64,
    /// Mean of the two candidates' selection indexes.
    pub predicted_index: f64,
    /// Shared-ancestor estimate between the two candidates, percent.
    pub predicted_inbreeding: f64,
    /// The pairing objective: `predicted_index - predicted_inbreeding * 0.5`.
    /// Recommendation listings rank by this value, descending.
    pub predicted_genetic_gain: f64,
    pub status: RecommendationStatus,
    pub adopted_date: Option<NaiveDate>,
}

/// Insert payload for one accepted pairing.
#[derive(Debug, Clone)]
pub struct NewRecommendation {
    pub simulation_id: i64,
    pub herd_id: String,
    pub sire_id: i64,
    pub dam_id: i64,
    pub predicted_dep: f64,
    pub predicted_index: f64,
    pub predicted_inbreeding: f64,
    pub predicted_genetic_gain: f64,
}
