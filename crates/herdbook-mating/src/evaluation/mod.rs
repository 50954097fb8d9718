//! Genetic evaluation: inbreeding, growth dep, and the composite index.

pub mod growth;
pub mod inbreeding;
pub mod runner;

pub use runner::evaluate_herd;

use herdbook_core::constants::INDEX_INBREEDING_PENALTY;

/// Round to three decimals, half away from zero.
pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Round to two decimals, half away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Composite selection index: heritability-scaled dep, penalized by the
/// inbreeding percentage.
///
/// Heritability is taken as given, without bounds validation; out-of-range
/// values scale the index accordingly.
pub fn selection_index(dep: f64, inbreeding: f64, heritability: f64) -> f64 {
    round3(dep * heritability - inbreeding * INDEX_INBREEDING_PENALTY)
}
