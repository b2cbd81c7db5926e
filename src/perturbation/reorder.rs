//! Reorder perturbation: reassign a scattered subset of signed positions.

use rand::seq::index::sample;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Instance, Solution};
use crate::schedule::rebuild;

use super::{rank_by_efficiency, touch_count};

/// Picks a stagnation-scaled random subset of signed positions and either
/// shuffles their occupants among themselves or reassigns them in
/// efficiency-descending order, then rebuilds.
pub fn reorder<R: Rng>(
    solution: &Solution,
    instance: &Instance,
    level: f64,
    small: bool,
    rng: &mut R,
) -> Solution {
    let signed = solution.signed_libraries();
    if signed.len() < 2 {
        return solution.clone();
    }
    let count = touch_count(signed.len(), level, small);

    let mut positions = sample(rng, signed.len(), count).into_vec();
    positions.sort_unstable();

    let mut occupants: Vec<usize> = positions.iter().map(|&p| signed[p]).collect();
    if rng.random_bool(0.5) {
        occupants.shuffle(rng);
    } else {
        occupants = rank_by_efficiency(instance, solution, &occupants);
    }

    let mut order = signed.to_vec();
    for (&pos, &lib) in positions.iter().zip(occupants.iter()) {
        order[pos] = lib;
    }
    rebuild(instance, &order, solution.unsigned_libraries())
}
