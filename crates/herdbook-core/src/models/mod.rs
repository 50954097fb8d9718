//! Domain models for herds, animals, weighings, genetic evaluations,
//! simulations, recommendations, and breeding records.
//!
//! Parent links between animals are plain optional ids resolved by lookup,
//! never owned references; an animal row is valid even when its pedigree
//! does not resolve.

mod animal;
mod breeding;
mod evaluation;
mod herd;
mod recommendation;
mod simulation;
mod weight;

pub use animal::{age_in_months, Animal, NewAnimal, Sex};
pub use breeding::{BreedingRecord, NewBreedingRecord, ParturitionStatus};
pub use evaluation::{EvaluationUpdate, GeneticEvaluation};
pub use herd::Herd;
pub use recommendation::{MatingRecommendation, NewRecommendation, RecommendationStatus};
pub use simulation::{AdjustmentHorizon, MatchingStrategy, NewSimulation, SimulationParameters};
pub use weight::{NewWeightRecord, WeightRecord};
