use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weight-adjustment horizon for growth comparisons. Closed set: weighings
/// are compared at 60, 120, or 180 days of age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum AdjustmentHorizon {
    Days60,
    Days120,
    Days180,
}

impl AdjustmentHorizon {
    /// Target age in days.
    pub fn days(&self) -> i64 {
        match self {
            AdjustmentHorizon::Days60 => 60,
            AdjustmentHorizon::Days120 => 120,
            AdjustmentHorizon::Days180 => 180,
        }
    }

    pub fn from_days(days: i64) -> Option<Self> {
        match days {
            60 => Some(AdjustmentHorizon::Days60),
            120 => Some(AdjustmentHorizon::Days120),
            180 => Some(AdjustmentHorizon::Days180),
            _ => None,
        }
    }
}

impl From<AdjustmentHorizon> for i64 {
    fn from(value: AdjustmentHorizon) -> Self {
        value.days()
    }
}

impl TryFrom<i64> for AdjustmentHorizon {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        AdjustmentHorizon::from_days(value)
            .ok_or_else(|| format!("adjustment horizon must be 60, 120 or 180 days, got {value}"))
    }
}

/// Pair-assignment strategy used by the optimizer.
///
/// `Greedy` walks the score-ranked pair list once, accepting a pair when the
/// dam is free and the sire below capacity. It is deliberately a heuristic:
/// a locally better pairing can be skipped because its dam or sire was
/// consumed by a higher-scoring alternative, so the result is conflict-free
/// but not a maximum-weight matching. The ordering and tie-break behavior
/// are observable contract and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingStrategy {
    Greedy,
}

impl MatchingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchingStrategy::Greedy => "greedy",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "greedy" => Some(MatchingStrategy::Greedy),
            _ => None,
        }
    }
}

/// Parameters of one optimizer invocation. Immutable once stored; a new run
/// gets a new row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub id: i64,
    pub herd_id: String,
    pub simulation_date: NaiveDate,
    /// Heritability coefficient for growth traits. Deliberately unvalidated:
    /// any float the caller supplies flows into the index formula.
    pub heritability: f64,
    pub min_age_male_months: u32,
    pub min_age_female_months: u32,
    pub weight_adjustment: AdjustmentHorizon,
    /// Share of the dam pool one sire may cover, as a percentage.
    pub max_female_percentage_per_male: f64,
    pub strategy: MatchingStrategy,
}

/// Insert payload for a simulation run (id and date assigned at insert).
#[derive(Debug, Clone)]
pub struct NewSimulation {
    pub herd_id: String,
    pub simulation_date: NaiveDate,
    pub heritability: f64,
    pub min_age_male_months: u32,
    pub min_age_female_months: u32,
    pub weight_adjustment: AdjustmentHorizon,
    pub max_female_percentage_per_male: f64,
    pub strategy: MatchingStrategy,
}
