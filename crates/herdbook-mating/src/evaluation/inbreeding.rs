//! Shared-ancestor inbreeding estimates.
//!
//! Deliberately simplified: a single-generation comparison of parent ids,
//! not a full relationship matrix (Meuwissen & Luo). Each of the four
//! cross-comparisons that matches contributes 25 percentage points.

use herdbook_core::models::Animal;

use crate::genealogy::AnimalArena;

/// Parent-id pair of one animal, father first.
pub type ParentIds = (Option<i64>, Option<i64>);

/// How many of the four cross-comparisons between two parent-id pairs match.
/// A comparison counts only when both sides are present and equal.
pub fn shared_parent_count(a: ParentIds, b: ParentIds) -> u32 {
    let mut count = 0;
    for left in [a.0, a.1] {
        for right in [b.0, b.1] {
            if let (Some(left), Some(right)) = (left, right) {
                if left == right {
                    count += 1;
                }
            }
        }
    }
    count
}

fn percentage(count: u32) -> f64 {
    (f64::from(count) / 4.0) * 100.0
}

/// Inbreeding coefficient of one animal, as a percentage in [0, 100].
///
/// Zero when either parent id is missing or does not resolve. Otherwise the
/// shared-parent count between the father's and mother's own parent ids.
pub fn coefficient(animal: &Animal, arena: &AnimalArena) -> f64 {
    if animal.father_id.is_none() || animal.mother_id.is_none() {
        return 0.0;
    }
    let (father, mother) = arena.parents(animal);
    let (Some(father), Some(mother)) = (father, mother) else {
        return 0.0;
    };
    percentage(shared_parent_count(
        (father.father_id, father.mother_id),
        (mother.father_id, mother.mother_id),
    ))
}

/// Predicted inbreeding of a prospective pairing, comparing the candidates'
/// own parent ids.
///
/// Note the generation skew against [`coefficient`]: there the compared ids
/// are the subject's grandparents, here they are the progeny's grandparents
/// expressed through its parents. The two are kept as-is because stored
/// coefficients and pairing history depend on both.
pub fn predicted(sire_parents: ParentIds, dam_parents: ParentIds) -> f64 {
    percentage(shared_parent_count(sire_parents, dam_parents))
}
