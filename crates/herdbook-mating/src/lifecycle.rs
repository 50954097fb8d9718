//! Recommendation lifecycle: adoption, dismissal, and batch conversion of
//! adopted recommendations into breeding records.

use chrono::NaiveDate;
use herdbook_core::errors::{MatingError, MatingResult};
use herdbook_core::models::{NewBreedingRecord, ParturitionStatus, RecommendationStatus};
use herdbook_storage::queries::{animals, breeding, recommendations, weights};
use rusqlite::Connection;
use serde::Serialize;

/// Mark a recommendation adopted as of `today`.
///
/// Re-adoption is not guarded: adopting an already-adopted (or ignored)
/// recommendation simply overwrites the status and date.
pub fn adopt(conn: &Connection, recommendation_id: i64, today: NaiveDate) -> MatingResult<()> {
    let touched = recommendations::set_status(
        conn,
        recommendation_id,
        RecommendationStatus::Adopted,
        Some(today),
    )?;
    if touched == 0 {
        return Err(MatingError::not_found("recommendation", recommendation_id));
    }
    tracing::debug!(recommendation_id, "recommendation adopted");
    Ok(())
}

/// Mark a recommendation ignored, clearing any adoption date.
pub fn ignore(conn: &Connection, recommendation_id: i64) -> MatingResult<()> {
    let touched =
        recommendations::set_status(conn, recommendation_id, RecommendationStatus::Ignored, None)?;
    if touched == 0 {
        return Err(MatingError::not_found("recommendation", recommendation_id));
    }
    tracing::debug!(recommendation_id, "recommendation ignored");
    Ok(())
}

/// Result of one batch conversion: how many breeding records were created,
/// and one message per recommendation that was skipped.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutcome {
    pub created_count: usize,
    pub errors: Vec<String>,
}

/// Turn every adopted recommendation of `simulation_id` into a breeding
/// record with `coverage_date`.
///
/// Per-item failures (an existing record for the same dam, sire and date, or
/// a dam/sire id that no longer resolves) are reported in the outcome and
/// never abort the batch. A simulation with no adopted recommendations at
/// all is `NotFound`.
///
/// The dam's weight is her most recent weighing, falling back to
/// `default_dam_weight`. The caller owns the transaction scope.
pub fn convert_adopted(
    conn: &Connection,
    simulation_id: i64,
    coverage_date: NaiveDate,
    default_dam_weight: f64,
    default_body_condition: i32,
) -> MatingResult<ConversionOutcome> {
    let adopted = recommendations::list_adopted(conn, simulation_id)?;
    if adopted.is_empty() {
        return Err(MatingError::not_found(
            "adopted recommendations",
            simulation_id,
        ));
    }

    let mut created_count = 0usize;
    let mut errors = Vec::new();

    for rec in adopted {
        if breeding::exists_for_triple(conn, rec.dam_id, rec.sire_id, coverage_date)? {
            tracing::warn!(
                recommendation_id = rec.id,
                dam_id = rec.dam_id,
                sire_id = rec.sire_id,
                "conversion skipped, coverage already recorded"
            );
            errors.push(format!(
                "coverage already exists for dam {} x sire {}",
                rec.dam_id, rec.sire_id
            ));
            continue;
        }

        let dam = animals::get(conn, rec.dam_id)?;
        let sire = animals::get(conn, rec.sire_id)?;
        if dam.is_none() || sire.is_none() {
            tracing::warn!(
                recommendation_id = rec.id,
                dam_id = rec.dam_id,
                sire_id = rec.sire_id,
                "conversion skipped, dam or sire no longer registered"
            );
            errors.push(format!(
                "animal not found (dam {}, sire {})",
                rec.dam_id, rec.sire_id
            ));
            continue;
        }

        let dam_weight = weights::latest_for_animal(conn, rec.dam_id)?
            .map(|w| w.weight)
            .unwrap_or(default_dam_weight);

        breeding::insert(
            conn,
            &NewBreedingRecord {
                herd_id: rec.herd_id.clone(),
                dam_id: rec.dam_id,
                sire_id: rec.sire_id,
                coverage_date,
                dam_weight,
                dam_body_condition_score: default_body_condition,
                // TODO: source from the sire's evaluation once scrotal
                // measurements carry a measurement date.
                sire_scrotal_perimeter: None,
                parturition_status: ParturitionStatus::InProgress,
                birth_date: None,
                observations: Some(format!(
                    "Created automatically from recommendation #{}",
                    rec.id
                )),
            },
        )?;
        created_count += 1;
    }

    tracing::info!(
        simulation_id,
        created = created_count,
        skipped = errors.len(),
        "adopted recommendations converted"
    );
    Ok(ConversionOutcome {
        created_count,
        errors,
    })
}
