//! Membership operator: promote an unsigned library into the schedule.

use rand::Rng;

use crate::models::{Instance, Solution};
use crate::schedule::rebuild;

/// Moves one randomly chosen unsigned library into a random position of
/// the signed sequence and rebuilds.
///
/// The promoted library still has to pass the feasibility walk; if it does
/// not fit at its new position it falls back out during the rebuild.
pub fn insert_library<R: Rng>(solution: &Solution, instance: &Instance, rng: &mut R) -> Solution {
    let unsigned = solution.unsigned_libraries();
    if unsigned.is_empty() {
        return solution.clone();
    }

    let mut pool = unsigned.to_vec();
    let promoted = pool.swap_remove(rng.random_range(0..pool.len()));

    let signed = solution.signed_libraries();
    let mut order = signed.to_vec();
    let position = rng.random_range(0..=order.len());
    order.insert(position, promoted);

    rebuild(instance, &order, &pool)
}
