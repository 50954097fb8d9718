//! # herdbook-core
//!
//! Foundation crate for the Herdbook mating recommendation engine.
//! Defines all domain types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::HerdbookConfig;
pub use errors::{ConfigError, MatingError, MatingResult, StorageError, StorageResult};
pub use models::{
    Animal, BreedingRecord, GeneticEvaluation, Herd, MatchingStrategy, MatingRecommendation,
    ParturitionStatus, RecommendationStatus, Sex, SimulationParameters, WeightRecord,
};
pub use traits::AccessPolicy;
