//! Breeding eligibility: which animals of a herd qualify as candidates.

use chrono::NaiveDate;
use herdbook_core::errors::MatingResult;
use herdbook_core::models::{Animal, GeneticEvaluation, Sex};
use herdbook_storage::queries::{animals, evaluations};
use rusqlite::Connection;
use serde::Serialize;

/// One eligible candidate, enriched with its stored evaluation when present.
#[derive(Debug, Clone, Serialize)]
pub struct EligibleAnimal {
    pub id: i64,
    pub identification: String,
    pub name: Option<String>,
    pub sex: Sex,
    pub birth_date: NaiveDate,
    pub age_months: i32,
    pub dep: Option<f64>,
    pub inbreeding_coefficient: f64,
    pub selection_index: Option<f64>,
    /// Males only; left out for dams even when measured.
    pub scrotal_perimeter: Option<f64>,
    pub number_of_offspring: i64,
}

impl EligibleAnimal {
    fn from_parts(
        animal: &Animal,
        birth_date: NaiveDate,
        age_months: i32,
        evaluation: Option<&GeneticEvaluation>,
    ) -> Self {
        Self {
            id: animal.id,
            identification: animal.identification.clone(),
            name: animal.name.clone(),
            sex: animal.sex,
            birth_date,
            age_months,
            dep: evaluation.and_then(|e| e.dep),
            inbreeding_coefficient: evaluation.map_or(0.0, |e| e.inbreeding_coefficient),
            selection_index: evaluation.and_then(|e| e.selection_index),
            scrotal_perimeter: match animal.sex {
                Sex::Male => evaluation.and_then(|e| e.scrotal_perimeter),
                Sex::Female => None,
            },
            number_of_offspring: evaluation.map_or(0, |e| e.number_of_offspring),
        }
    }
}

/// Candidate pools of one herd, split by role.
#[derive(Debug, Clone, Serialize)]
pub struct EligibleAnimals {
    pub herd_id: String,
    pub males: Vec<EligibleAnimal>,
    pub females: Vec<EligibleAnimal>,
}

/// Age in months when the animal clears the per-sex minimum. Animals without
/// a birth date never qualify.
fn qualifying_age(
    animal: &Animal,
    minimum_months: u32,
    today: NaiveDate,
) -> Option<(NaiveDate, i32)> {
    let birth_date = animal.birth_date?;
    let age = herdbook_core::models::age_in_months(birth_date, today);
    (age >= minimum_months as i32).then_some((birth_date, age))
}

/// Partition the herd's active animals into eligible sires and dams.
pub fn eligible_animals(
    conn: &Connection,
    herd_id: &str,
    min_age_male_months: u32,
    min_age_female_months: u32,
    today: NaiveDate,
) -> MatingResult<EligibleAnimals> {
    let mut males = Vec::new();
    let mut females = Vec::new();

    for animal in animals::list_active_by_herd(conn, herd_id)? {
        let minimum = match animal.sex {
            Sex::Male => min_age_male_months,
            Sex::Female => min_age_female_months,
        };
        let Some((birth_date, age_months)) = qualifying_age(&animal, minimum, today) else {
            continue;
        };

        let evaluation = evaluations::get_by_animal(conn, animal.id)?;
        let candidate =
            EligibleAnimal::from_parts(&animal, birth_date, age_months, evaluation.as_ref());
        match animal.sex {
            Sex::Male => males.push(candidate),
            Sex::Female => females.push(candidate),
        }
    }

    Ok(EligibleAnimals {
        herd_id: herd_id.to_string(),
        males,
        females,
    })
}
