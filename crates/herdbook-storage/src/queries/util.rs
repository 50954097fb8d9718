//! Shared helpers for the query modules: error mapping and TEXT column
//! conversions for dates and closed string sets.

use chrono::NaiveDate;
use herdbook_core::errors::StorageError;
use herdbook_core::models::{
    AdjustmentHorizon, MatchingStrategy, ParturitionStatus, RecommendationStatus, Sex,
};
use rusqlite::types::Type;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Map a rusqlite error, keeping malformed stored values distinct from
/// engine-level failures.
pub(crate) fn sqlite_err(e: rusqlite::Error) -> StorageError {
    match e {
        rusqlite::Error::FromSqlConversionFailure(_, _, source) => StorageError::InvalidRow {
            message: source.to_string(),
        },
        other => StorageError::SqliteError {
            message: other.to_string(),
        },
    }
}

pub(crate) fn date_to_sql(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn opt_date_to_sql(date: Option<NaiveDate>) -> Option<String> {
    date.map(date_to_sql)
}

/// Error for TEXT columns whose value falls outside the expected set.
#[derive(Debug)]
pub(crate) struct BadColumn {
    what: &'static str,
    value: String,
}

impl std::fmt::Display for BadColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unexpected {} value: {}", self.what, self.value)
    }
}

impl std::error::Error for BadColumn {}

fn bad_column(idx: usize, what: &'static str, value: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(BadColumn { what, value }))
}

/// Parse an ISO date from a TEXT column inside a row-mapping closure.
pub(crate) fn date_col(idx: usize, text: String) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(&text, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn opt_date_col(
    idx: usize,
    text: Option<String>,
) -> rusqlite::Result<Option<NaiveDate>> {
    text.map(|t| date_col(idx, t)).transpose()
}

pub(crate) fn sex_col(idx: usize, text: String) -> rusqlite::Result<Sex> {
    Sex::parse(&text).ok_or_else(|| bad_column(idx, "sex", text))
}

pub(crate) fn recommendation_status_col(
    idx: usize,
    text: String,
) -> rusqlite::Result<RecommendationStatus> {
    RecommendationStatus::parse(&text)
        .ok_or_else(|| bad_column(idx, "recommendation status", text))
}

pub(crate) fn parturition_status_col(
    idx: usize,
    text: String,
) -> rusqlite::Result<ParturitionStatus> {
    ParturitionStatus::parse(&text).ok_or_else(|| bad_column(idx, "parturition status", text))
}

pub(crate) fn strategy_col(idx: usize, text: String) -> rusqlite::Result<MatchingStrategy> {
    MatchingStrategy::parse(&text).ok_or_else(|| bad_column(idx, "matching strategy", text))
}

pub(crate) fn horizon_col(idx: usize, days: i64) -> rusqlite::Result<AdjustmentHorizon> {
    AdjustmentHorizon::from_days(days)
        .ok_or_else(|| bad_column(idx, "weight adjustment horizon", days.to_string()))
}
