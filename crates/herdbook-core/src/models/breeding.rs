use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parturition outcome of a coverage. The wire values key existing herd
/// data and must not be translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParturitionStatus {
    /// `"em_andamento"`: coverage done, gestation presumed ongoing.
    #[serde(rename = "em_andamento")]
    InProgress,
    /// `"sim"`: parturition completed.
    #[serde(rename = "sim")]
    Completed,
    /// `"não"`: coverage did not result in a parturition.
    #[serde(rename = "não")]
    NotCompleted,
}

impl ParturitionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParturitionStatus::InProgress => "em_andamento",
            ParturitionStatus::Completed => "sim",
            ParturitionStatus::NotCompleted => "não",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "em_andamento" => Some(ParturitionStatus::InProgress),
            "sim" => Some(ParturitionStatus::Completed),
            "não" => Some(ParturitionStatus::NotCompleted),
            _ => None,
        }
    }
}

/// One reproductive-management entry: a coverage of a dam by a sire on a
/// date, plus the dam's condition at coverage and the eventual outcome.
///
/// At most one record may exist per `(dam_id, sire_id, coverage_date)`
/// triple; conversion from recommendations checks the triple and reports a
/// per-item error instead of re-creating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedingRecord {
    pub id: i64,
    pub herd_id: String,
    pub dam_id: i64,
    pub sire_id: i64,
    pub coverage_date: NaiveDate,
    /// Dam live weight (kg) at coverage.
    pub dam_weight: f64,
    /// Dam body condition score (1-5) at coverage.
    pub dam_body_condition_score: i32,
    /// Sire scrotal perimeter (cm) when measured.
    pub sire_scrotal_perimeter: Option<f64>,
    pub parturition_status: ParturitionStatus,
    /// Actual birth date once the parturition is recorded.
    pub birth_date: Option<NaiveDate>,
    pub observations: Option<String>,
}

/// Insert payload for a new coverage record.
#[derive(Debug, Clone)]
pub struct NewBreedingRecord {
    pub herd_id: String,
    pub dam_id: i64,
    pub sire_id: i64,
    pub coverage_date: NaiveDate,
    pub dam_weight: f64,
    pub dam_body_condition_score: i32,
    pub sire_scrotal_perimeter: Option<f64>,
    pub parturition_status: ParturitionStatus,
    pub birth_date: Option<NaiveDate>,
    pub observations: Option<String>,
}
