//! Mating optimizer: exhaustive pair scoring plus constrained assignment.

pub mod matching;
pub mod scoring;

pub use matching::{assign, max_per_sire};
pub use scoring::{score_pairs, CandidateMetrics, PairScore};
