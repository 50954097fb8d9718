use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::ANIMAL_STATUS_ACTIVE;

/// Biological sex of an animal. Stored as `"M"` / `"F"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }

    /// Parse the stored single-letter code.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "M" => Some(Sex::Male),
            "F" => Some(Sex::Female),
            _ => None,
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered animal.
///
/// `father_id`/`mother_id` are self-referential keys into the same registry.
/// They are not validated against the parent's sex; bad links are a data
/// quality condition the pedigree math tolerates, not a constraint violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    pub id: i64,
    pub herd_id: String,
    /// Ear-tag identification, unique within a property in practice.
    pub identification: String,
    pub name: Option<String>,
    /// Free-form husbandry category (e.g. the sire categories of
    /// [`crate::constants::SIRE_CATEGORIES`]).
    pub category: Option<String>,
    pub sex: Sex,
    /// Missing birth dates occur in imported herds; every consumer treats
    /// `None` as "age unknown" rather than an error.
    pub birth_date: Option<NaiveDate>,
    /// Free-form status; only [`ANIMAL_STATUS_ACTIVE`] qualifies for breeding.
    pub status: String,
    pub father_id: Option<i64>,
    pub mother_id: Option<i64>,
}

impl Animal {
    pub fn is_active(&self) -> bool {
        self.status == ANIMAL_STATUS_ACTIVE
    }

    /// Calendar age in months at `today`, or `None` without a birth date.
    pub fn age_in_months(&self, today: NaiveDate) -> Option<i32> {
        self.birth_date.map(|birth| age_in_months(birth, today))
    }
}

/// Insert payload for a new animal (id assigned by storage).
#[derive(Debug, Clone)]
pub struct NewAnimal {
    pub herd_id: String,
    pub identification: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub sex: Sex,
    pub birth_date: Option<NaiveDate>,
    pub status: String,
    pub father_id: Option<i64>,
    pub mother_id: Option<i64>,
}

/// Calendar-based age in months.
///
/// `(today.year - birth.year) * 12 + (today.month - birth.month)`, minus one
/// when today's day-of-month has not yet reached the birth day, clamped to
/// zero. Two animals born in the same month can round differently depending
/// on the day; that asymmetry is part of the contract.
pub fn age_in_months(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut months =
        (today.year() - birth.year()) * 12 + today.month() as i32 - birth.month() as i32;
    if today.day() < birth.day() {
        months -= 1;
    }
    months.max(0)
}
