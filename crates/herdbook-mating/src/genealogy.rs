//! Pedigree resolution over an in-memory arena of animals.
//!
//! Parent links are plain ids into the registry and may dangle (imported
//! herds, deleted ancestors). Every resolver here treats an unresolvable id
//! as an absent ancestor, never as an error.

use herdbook_core::errors::MatingResult;
use herdbook_core::models::Animal;
use herdbook_storage::queries::animals;
use rusqlite::Connection;
use rustc_hash::{FxHashMap, FxHashSet};

/// Animals keyed by id, loaded once per operation so pedigree lookups stay
/// off the database.
#[derive(Debug, Default)]
pub struct AnimalArena {
    animals: FxHashMap<i64, Animal>,
}

impl AnimalArena {
    pub fn from_animals(animals: impl IntoIterator<Item = Animal>) -> Self {
        Self {
            animals: animals.into_iter().map(|a| (a.id, a)).collect(),
        }
    }

    pub fn insert(&mut self, animal: Animal) {
        self.animals.insert(animal.id, animal);
    }

    pub fn get(&self, id: i64) -> Option<&Animal> {
        self.animals.get(&id)
    }

    pub fn len(&self) -> usize {
        self.animals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }

    /// Both parents of `animal`, where resolvable.
    pub fn parents(&self, animal: &Animal) -> (Option<&Animal>, Option<&Animal>) {
        let father = animal.father_id.and_then(|id| self.get(id));
        let mother = animal.mother_id.and_then(|id| self.get(id));
        (father, mother)
    }

    /// Up to four grandparents in fixed slot order: father's father,
    /// father's mother, mother's father, mother's mother.
    pub fn grandparents(&self, animal: &Animal) -> [Option<&Animal>; 4] {
        let (father, mother) = self.parents(animal);
        [
            father.and_then(|p| p.father_id).and_then(|id| self.get(id)),
            father.and_then(|p| p.mother_id).and_then(|id| self.get(id)),
            mother.and_then(|p| p.father_id).and_then(|id| self.get(id)),
            mother.and_then(|p| p.mother_id).and_then(|id| self.get(id)),
        ]
    }

    /// Parent ids referenced by arena members but not present themselves,
    /// in ascending order.
    pub fn unresolved_parent_ids(&self) -> Vec<i64> {
        let mut missing: FxHashSet<i64> = FxHashSet::default();
        for animal in self.animals.values() {
            for id in [animal.father_id, animal.mother_id].into_iter().flatten() {
                if !self.animals.contains_key(&id) {
                    missing.insert(id);
                }
            }
        }
        let mut ids: Vec<i64> = missing.into_iter().collect();
        ids.sort_unstable();
        ids
    }
}

/// Build an arena from `animals` and pull in their parents from storage.
///
/// One level is enough: grandparent ids are columns on the parent rows, so
/// the inbreeding comparisons never need the grandparents as rows. Parent
/// ids that do not resolve are simply left out of the arena.
pub fn load_pedigree(conn: &Connection, animals: Vec<Animal>) -> MatingResult<AnimalArena> {
    let mut arena = AnimalArena::from_animals(animals);
    for id in arena.unresolved_parent_ids() {
        if let Some(parent) = animals::get(conn, id)? {
            arena.insert(parent);
        }
    }
    Ok(arena)
}
