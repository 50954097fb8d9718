//! Herd-wide evaluation refresh.

use chrono::NaiveDate;
use herdbook_core::errors::MatingResult;
use herdbook_core::models::{AdjustmentHorizon, EvaluationUpdate, Sex};
use herdbook_storage::queries::{animals, breeding, evaluations, weights};
use rusqlite::Connection;

use crate::evaluation::{growth, inbreeding, selection_index};
use crate::genealogy;

/// Recompute and upsert the evaluation of every active animal in the herd.
/// Returns how many animals were processed.
///
/// One evaluation row per animal, last write wins. An animal with no birth
/// date is still processed: its inbreeding and offspring count are stored
/// while `dep` and `selection_index` stay `NULL`.
///
/// The caller owns the transaction scope; all upserts here should commit or
/// roll back together.
pub fn evaluate_herd(
    conn: &Connection,
    herd_id: &str,
    heritability: f64,
    horizon: AdjustmentHorizon,
    today: NaiveDate,
) -> MatingResult<usize> {
    let herd_animals = animals::list_active_by_herd(conn, herd_id)?;
    let active_ids: Vec<i64> = herd_animals.iter().map(|a| a.id).collect();
    let arena = genealogy::load_pedigree(conn, herd_animals)?;
    let mut means = growth::HerdMeans::default();

    let mut evaluated = 0usize;
    for animal_id in active_ids {
        let Some(animal) = arena.get(animal_id) else {
            continue;
        };

        let inbreeding = inbreeding::coefficient(animal, &arena);
        let records = weights::list_by_animal(conn, animal.id)?;
        let herd_mean = means.mean(conn, &animal.herd_id)?;
        let dep = growth::dep(animal.birth_date, &records, herd_mean, horizon);
        let index = dep.map(|d| selection_index(d, inbreeding, heritability));

        let number_of_offspring = match animal.sex {
            Sex::Male => breeding::count_births_by_sire(conn, animal.id)?,
            Sex::Female => breeding::count_births_by_dam(conn, animal.id)?,
        };

        evaluations::upsert(
            conn,
            &EvaluationUpdate {
                animal_id: animal.id,
                herd_id: herd_id.to_string(),
                inbreeding_coefficient: inbreeding,
                dep,
                selection_index: index,
                number_of_offspring,
                last_evaluation_date: today,
            },
        )?;
        evaluated += 1;
    }

    tracing::info!(herd_id = herd_id, evaluated = evaluated, "herd evaluation complete");
    Ok(evaluated)
}
