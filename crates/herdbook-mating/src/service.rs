//! The engine facade: one connection, one access policy, authorization-gated
//! operations.

use std::path::Path;

use chrono::NaiveDate;
use herdbook_core::config::{EngineConfig, HerdbookConfig};
use herdbook_core::errors::{MatingError, MatingResult, StorageError};
use herdbook_core::models::{
    AdjustmentHorizon, Animal, Herd, MatchingStrategy, MatingRecommendation, NewRecommendation,
    NewSimulation, Sex,
};
use herdbook_core::traits::AccessPolicy;
use herdbook_storage::queries::{animals, herds, recommendations, simulations};
use rusqlite::Connection;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::eligibility::{self, EligibleAnimals};
use crate::evaluation::{growth, runner};
use crate::genealogy;
use crate::lifecycle::{self, ConversionOutcome};
use crate::optimizer::{matching, scoring};
use crate::reports::{self, BirthForecast, SireCoverageStats};

/// Inputs of one optimizer run. The minimum ages are recorded with the
/// parameters but not re-applied: the candidate lists are the caller's
/// selection, normally taken from an eligibility query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub herd_id: String,
    pub heritability: f64,
    pub min_age_male_months: u32,
    pub min_age_female_months: u32,
    pub weight_adjustment: AdjustmentHorizon,
    pub max_female_percentage_per_male: f64,
    pub strategy: MatchingStrategy,
    pub sire_ids: Vec<i64>,
    pub dam_ids: Vec<i64>,
}

impl SimulationRequest {
    /// Build a request from configured engine defaults. Assumes a validated
    /// configuration; an out-of-set adjustment horizon falls back to 60
    /// days.
    pub fn with_defaults(
        herd_id: impl Into<String>,
        sire_ids: Vec<i64>,
        dam_ids: Vec<i64>,
        engine: &EngineConfig,
    ) -> Self {
        Self {
            herd_id: herd_id.into(),
            heritability: engine.heritability(),
            min_age_male_months: engine.min_age_male_months(),
            min_age_female_months: engine.min_age_female_months(),
            weight_adjustment: AdjustmentHorizon::from_days(i64::from(
                engine.weight_adjustment_days(),
            ))
            .unwrap_or(AdjustmentHorizon::Days60),
            max_female_percentage_per_male: engine.max_female_percentage_per_male(),
            strategy: MatchingStrategy::Greedy,
            sire_ids,
            dam_ids,
        }
    }
}

/// What one simulation produced.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutcome {
    pub simulation_id: i64,
    pub recommendation_count: usize,
}

/// Synchronous, single-connection mating service.
///
/// Every operation resolves the target herd's property and consults the
/// [`AccessPolicy`] before touching herd data. Operations that write commit
/// one transaction at the end; there is no cross-operation locking, so two
/// interleaved simulations on the same herd may read the same evaluations
/// and both succeed.
pub struct MatingService {
    conn: Connection,
    policy: Box<dyn AccessPolicy>,
}

impl MatingService {
    pub fn new(conn: Connection, policy: Box<dyn AccessPolicy>) -> Self {
        Self { conn, policy }
    }

    /// Open (or create) the database at `path` and wrap it in a service.
    pub fn open(path: &Path, policy: Box<dyn AccessPolicy>) -> MatingResult<Self> {
        Ok(Self::new(herdbook_storage::open(path)?, policy))
    }

    /// Fully-migrated in-memory service, for tests.
    pub fn open_in_memory(policy: Box<dyn AccessPolicy>) -> MatingResult<Self> {
        Ok(Self::new(herdbook_storage::open_in_memory()?, policy))
    }

    /// Open the database named by the configuration.
    pub fn from_config(
        config: &HerdbookConfig,
        policy: Box<dyn AccessPolicy>,
    ) -> MatingResult<Self> {
        Self::open(&config.storage.path(), policy)
    }

    /// The underlying connection, for callers that seed or inspect data
    /// directly.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Recompute the genetic evaluations of every active animal in the herd.
    pub fn evaluate_herd(
        &self,
        user_id: &str,
        herd_id: &str,
        heritability: f64,
        horizon: AdjustmentHorizon,
    ) -> MatingResult<usize> {
        self.authorize_herd(user_id, herd_id)?;
        let tx = self.begin()?;
        let evaluated = runner::evaluate_herd(&tx, herd_id, heritability, horizon, today())?;
        tx.commit().map_err(tx_err)?;
        Ok(evaluated)
    }

    /// The herd's candidate pools under the given per-sex minimum ages.
    pub fn eligible_animals(
        &self,
        user_id: &str,
        herd_id: &str,
        min_age_male_months: u32,
        min_age_female_months: u32,
    ) -> MatingResult<EligibleAnimals> {
        self.authorize_herd(user_id, herd_id)?;
        eligibility::eligible_animals(
            &self.conn,
            herd_id,
            min_age_male_months,
            min_age_female_months,
            today(),
        )
    }

    /// Score every sire × dam combination, assign pairs under the capacity
    /// constraint, and persist the parameters plus one pending
    /// recommendation per accepted pair, all in one transaction.
    pub fn simulate(
        &self,
        user_id: &str,
        request: &SimulationRequest,
    ) -> MatingResult<SimulationOutcome> {
        self.authorize_herd(user_id, &request.herd_id)?;
        if request.sire_ids.is_empty() || request.dam_ids.is_empty() {
            return Err(MatingError::invalid_input(
                "at least one sire and one dam must be selected",
            ));
        }

        let sires = self.load_candidates(&request.sire_ids, Sex::Male)?;
        let dams = self.load_candidates(&request.dam_ids, Sex::Female)?;
        let sire_ids: Vec<i64> = sires.iter().map(|a| a.id).collect();
        let dam_ids: Vec<i64> = dams.iter().map(|a| a.id).collect();

        let mut candidates = sires;
        candidates.extend(dams);
        let arena = genealogy::load_pedigree(&self.conn, candidates)?;

        let mut means = growth::HerdMeans::default();
        let sire_metrics = self.metrics_for(&arena, &mut means, &sire_ids, request)?;
        let dam_metrics = self.metrics_for(&arena, &mut means, &dam_ids, request)?;

        let pairs = scoring::score_pairs(&sire_metrics, &dam_metrics);
        let capacity =
            matching::max_per_sire(dam_ids.len(), request.max_female_percentage_per_male);
        let accepted = matching::assign(request.strategy, pairs, dam_ids.len(), capacity);

        let tx = self.begin()?;
        let simulation_id = simulations::insert(
            &tx,
            &NewSimulation {
                herd_id: request.herd_id.clone(),
                simulation_date: today(),
                heritability: request.heritability,
                min_age_male_months: request.min_age_male_months,
                min_age_female_months: request.min_age_female_months,
                weight_adjustment: request.weight_adjustment,
                max_female_percentage_per_male: request.max_female_percentage_per_male,
                strategy: request.strategy,
            },
        )?;
        for pair in &accepted {
            recommendations::insert(
                &tx,
                &NewRecommendation {
                    simulation_id,
                    herd_id: request.herd_id.clone(),
                    sire_id: pair.sire_id,
                    dam_id: pair.dam_id,
                    predicted_dep: pair.predicted_dep,
                    predicted_index: pair.predicted_index,
                    predicted_inbreeding: pair.predicted_inbreeding,
                    predicted_genetic_gain: pair.objective_score,
                },
            )?;
        }
        tx.commit().map_err(tx_err)?;

        tracing::info!(
            herd_id = %request.herd_id,
            simulation_id,
            recommendations = accepted.len(),
            "mating simulation complete"
        );
        Ok(SimulationOutcome {
            simulation_id,
            recommendation_count: accepted.len(),
        })
    }

    /// A simulation's recommendations, best predicted gain first.
    pub fn list_recommendations(
        &self,
        user_id: &str,
        simulation_id: i64,
    ) -> MatingResult<Vec<MatingRecommendation>> {
        let simulation = simulations::get(&self.conn, simulation_id)?
            .ok_or_else(|| MatingError::not_found("simulation", simulation_id))?;
        self.authorize_herd(user_id, &simulation.herd_id)?;
        Ok(recommendations::list_by_simulation(&self.conn, simulation_id)?)
    }

    pub fn adopt(&self, user_id: &str, recommendation_id: i64) -> MatingResult<()> {
        self.authorize_recommendation(user_id, recommendation_id)?;
        lifecycle::adopt(&self.conn, recommendation_id, today())
    }

    pub fn ignore(&self, user_id: &str, recommendation_id: i64) -> MatingResult<()> {
        self.authorize_recommendation(user_id, recommendation_id)?;
        lifecycle::ignore(&self.conn, recommendation_id)
    }

    /// Convert every adopted recommendation of the simulation into a
    /// breeding record. Per-item failures land in the outcome's error list;
    /// the whole batch commits together.
    pub fn batch_convert(
        &self,
        user_id: &str,
        simulation_id: i64,
        coverage_date: NaiveDate,
        default_dam_weight: f64,
        default_body_condition: i32,
    ) -> MatingResult<ConversionOutcome> {
        let simulation = simulations::get(&self.conn, simulation_id)?
            .ok_or_else(|| MatingError::not_found("simulation", simulation_id))?;
        self.authorize_herd(user_id, &simulation.herd_id)?;

        let tx = self.begin()?;
        let outcome = lifecycle::convert_adopted(
            &tx,
            simulation_id,
            coverage_date,
            default_dam_weight,
            default_body_condition,
        )?;
        tx.commit().map_err(tx_err)?;
        Ok(outcome)
    }

    /// Projected parturitions for every in-progress coverage of the herd.
    pub fn birth_forecast(&self, user_id: &str, herd_id: &str) -> MatingResult<Vec<BirthForecast>> {
        self.authorize_herd(user_id, herd_id)?;
        reports::birth_forecast(&self.conn, herd_id, today())
    }

    /// Coverage counts and birth rates per breeding sire of the herd.
    pub fn sire_coverage_stats(
        &self,
        user_id: &str,
        herd_id: &str,
    ) -> MatingResult<Vec<SireCoverageStats>> {
        self.authorize_herd(user_id, herd_id)?;
        reports::sire_coverage_stats(&self.conn, herd_id)
    }

    /// Resolve the herd and check the caller against its property.
    fn authorize_herd(&self, user_id: &str, herd_id: &str) -> MatingResult<Herd> {
        let herd = herds::get(&self.conn, herd_id)?.ok_or_else(|| MatingError::NotFound {
            entity: "herd",
            id: herd_id.to_string(),
        })?;
        if !self.policy.authorize(user_id, &herd.property_id) {
            return Err(MatingError::AccessDenied {
                user_id: user_id.to_string(),
                property_id: herd.property_id,
            });
        }
        Ok(herd)
    }

    fn authorize_recommendation(&self, user_id: &str, recommendation_id: i64) -> MatingResult<()> {
        let rec = recommendations::get(&self.conn, recommendation_id)?
            .ok_or_else(|| MatingError::not_found("recommendation", recommendation_id))?;
        self.authorize_herd(user_id, &rec.herd_id)?;
        Ok(())
    }

    /// Fetch candidates by id, keeping first occurrences of duplicates.
    /// Unknown ids abort with `NotFound`, wrong-sex ids with `InvalidInput`.
    fn load_candidates(&self, ids: &[i64], expected_sex: Sex) -> MatingResult<Vec<Animal>> {
        let role = match expected_sex {
            Sex::Male => "sire",
            Sex::Female => "dam",
        };
        let mut seen = FxHashSet::default();
        let mut candidates = Vec::with_capacity(ids.len());
        for &id in ids {
            if !seen.insert(id) {
                continue;
            }
            let animal = animals::get(&self.conn, id)?
                .ok_or_else(|| MatingError::not_found("animal", id))?;
            if animal.sex != expected_sex {
                return Err(MatingError::invalid_input(format!(
                    "animal {id} is not a valid {role}"
                )));
            }
            candidates.push(animal);
        }
        Ok(candidates)
    }

    fn metrics_for(
        &self,
        arena: &genealogy::AnimalArena,
        means: &mut growth::HerdMeans,
        ids: &[i64],
        request: &SimulationRequest,
    ) -> MatingResult<Vec<scoring::CandidateMetrics>> {
        let mut metrics = Vec::with_capacity(ids.len());
        for &id in ids {
            let animal = arena
                .get(id)
                .ok_or_else(|| MatingError::not_found("animal", id))?;
            metrics.push(scoring::candidate_metrics(
                &self.conn,
                arena,
                means,
                animal,
                request.heritability,
                request.weight_adjustment,
            )?);
        }
        Ok(metrics)
    }

    fn begin(&self) -> MatingResult<rusqlite::Transaction<'_>> {
        self.conn.unchecked_transaction().map_err(tx_err)
    }
}

fn tx_err(e: rusqlite::Error) -> MatingError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
    .into()
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
