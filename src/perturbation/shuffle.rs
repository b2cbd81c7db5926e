//! Segment perturbation: disturb a contiguous run of the signed sequence.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Instance, Solution};
use crate::schedule::rebuild;

use super::{rank_by_efficiency, touch_count};

/// Picks a stagnation-scaled contiguous segment of the signed sequence and
/// either shuffles it in place or replaces it with its members sorted by
/// descending efficiency, then rebuilds.
pub fn shuffle<R: Rng>(
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
    let len = touch_count(signed.len(), level, small);
    let start = rng.random_range(0..=signed.len() - len);

    let mut order = signed.to_vec();
    if rng.random_bool(0.5) {
        order[start..start + len].shuffle(rng);
    } else {
        let ranked = rank_by_efficiency(instance, solution, &order[start..start + len]);
        order[start..start + len].copy_from_slice(&ranked);
    }

    rebuild(instance, &order, solution.unsigned_libraries())
}
