//! Pair scoring: full enumeration of sire × dam combinations.

use herdbook_core::constants::OBJECTIVE_INBREEDING_PENALTY;
use herdbook_core::errors::MatingResult;
use herdbook_core::models::{AdjustmentHorizon, Animal};
use herdbook_storage::queries::weights;
use rusqlite::Connection;
use serde::Serialize;

use crate::evaluation::{growth, inbreeding, selection_index};
use crate::genealogy::AnimalArena;

/// Per-candidate metrics, computed once and shared by every pairing the
/// candidate appears in.
#[derive(Debug, Clone)]
pub struct CandidateMetrics {
    pub animal_id: i64,
    pub dep: f64,
    pub index: f64,
    pub father_id: Option<i64>,
    pub mother_id: Option<i64>,
}

pub fn candidate_metrics(
    conn: &Connection,
    arena: &AnimalArena,
    means: &mut growth::HerdMeans,
    animal: &Animal,
    heritability: f64,
    horizon: AdjustmentHorizon,
) -> MatingResult<CandidateMetrics> {
    let records = weights::list_by_animal(conn, animal.id)?;
    let herd_mean = means.mean(conn, &animal.herd_id)?;
    // A candidate without a birth date scores like one without weighings.
    let dep = growth::dep(animal.birth_date, &records, herd_mean, horizon).unwrap_or(0.0);
    let inbreeding = inbreeding::coefficient(animal, arena);
    let index = selection_index(dep, inbreeding, heritability);

    Ok(CandidateMetrics {
        animal_id: animal.id,
        dep,
        index,
        father_id: animal.father_id,
        mother_id: animal.mother_id,
    })
}

/// One scored sire × dam combination. `objective_score` ranks pairings:
/// higher is better, the inbreeding term pulling it down.
#[derive(Debug, Clone, Serialize)]
pub struct PairScore {
    pub sire_id: i64,
    pub dam_id: i64,
    pub predicted_dep: f64,
    pub predicted_index: f64,
    pub predicted_inbreeding: f64,
    pub objective_score: f64,
}

/// Score every combination, sires outer and dams inner, in input order. The
/// enumeration order is observable: it is the tie-break of the assignment
/// sort downstream.
pub fn score_pairs(sires: &[CandidateMetrics], dams: &[CandidateMetrics]) -> Vec<PairScore> {
    let mut pairs = Vec::with_capacity(sires.len() * dams.len());
    for sire in sires {
        for dam in dams {
            let predicted_inbreeding = inbreeding::predicted(
                (sire.father_id, sire.mother_id),
                (dam.father_id, dam.mother_id),
            );
            let predicted_index = (sire.index + dam.index) / 2.0;
            pairs.push(PairScore {
                sire_id: sire.animal_id,
                dam_id: dam.animal_id,
                predicted_dep: (sire.dep + dam.dep) / 2.0,
                predicted_index,
                predicted_inbreeding,
                objective_score: predicted_index
                    - predicted_inbreeding * OBJECTIVE_INBREEDING_PENALTY,
            });
        }
    }
    pairs
}
