//! # herdbook-mating
//!
//! The mating recommendation engine: genetic evaluation, candidate
//! eligibility, pair scoring and assignment, recommendation lifecycle, and
//! reproductive reports over the `herdbook-storage` schema.
//!
//! ## Pipeline
//!
//! | Stage | Module |
//! |-------|--------|
//! | Evaluate herd (inbreeding, dep, selection index) | [`evaluation`] |
//! | Select candidate pools by age and sex | [`eligibility`] |
//! | Score sire×dam pairs and assign under capacity | [`optimizer`] |
//! | Adopt / ignore / convert recommendations | [`lifecycle`] |
//! | Birth forecasts and sire coverage stats | [`reports`] |
//!
//! [`MatingService`] fronts the pipeline with access control and
//! per-operation transactions.

pub mod eligibility;
pub mod evaluation;
pub mod genealogy;
pub mod lifecycle;
pub mod optimizer;
pub mod reports;
pub mod service;

pub use eligibility::{EligibleAnimal, EligibleAnimals};
pub use genealogy::AnimalArena;
pub use lifecycle::ConversionOutcome;
pub use reports::{BirthForecast, SireCoverageStats};
pub use service::{MatingService, SimulationOutcome, SimulationRequest};
