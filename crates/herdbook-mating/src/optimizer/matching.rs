//! Pair assignment under capacity constraints.

use herdbook_core::models::MatchingStrategy;
use rustc_hash::{FxHashMap, FxHashSet};

use super::scoring::PairScore;

/// Dams one sire may cover: a ceiling share of the dam pool. A share of 50%
/// over 5 dams allows 3 per sire.
pub fn max_per_sire(num_dams: usize, max_female_percentage_per_male: f64) -> usize {
    ((num_dams as f64) * (max_female_percentage_per_male / 100.0)).ceil() as usize
}

/// Run the configured assignment strategy over the scored pairs, returning
/// the accepted pairs in acceptance order.
pub fn assign(
    strategy: MatchingStrategy,
    pairs: Vec<PairScore>,
    num_dams: usize,
    capacity: usize,
) -> Vec<PairScore> {
    match strategy {
        MatchingStrategy::Greedy => greedy(pairs, num_dams, capacity),
    }
}

/// Stable sort by objective score descending (ties keep enumeration order),
/// then a single walk accepting a pair when its dam is still free and its
/// sire below `capacity`. Stops once every dam is assigned. A sire or dam
/// skipped here is never revisited; the result is conflict-free, not a
/// maximum-weight matching.
fn greedy(mut pairs: Vec<PairScore>, num_dams: usize, capacity: usize) -> Vec<PairScore> {
    pairs.sort_by(|a, b| b.objective_score.total_cmp(&a.objective_score));

    let mut assigned_dams: FxHashSet<i64> = FxHashSet::default();
    let mut sire_load: FxHashMap<i64, usize> = FxHashMap::default();
    let mut accepted = Vec::new();

    for pair in pairs {
        if assigned_dams.contains(&pair.dam_id) {
            continue;
        }
        let load = sire_load.entry(pair.sire_id).or_insert(0);
        if *load >= capacity {
            continue;
        }
        *load += 1;
        assigned_dams.insert(pair.dam_id);
        accepted.push(pair);

        if assigned_dams.len() == num_dams {
            break;
        }
    }
    accepted
}
