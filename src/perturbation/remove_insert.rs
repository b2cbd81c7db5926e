//! Destroy-and-rebuild perturbation: evict signed libraries and refill
//! their positions from the unsigned pool.

use rand::seq::index::sample;
use rand::Rng;

use crate::models::{Instance, Solution};
use crate::schedule::rebuild;

use super::{efficiency_without_own, library_efficiency, touch_count};

/// Removes a stagnation-scaled batch of signed libraries and reinserts as
/// many candidates at the vacated positions, then rebuilds.
///
/// Victims are drawn uniformly or, half the time, taken as the
/// lowest-efficiency signed libraries. Reinsertions are drawn uniformly
/// from the pooled candidates or, half the time, taken as the
/// highest-efficiency ones.
pub fn remove_insert<R: Rng>(
    solution: &Solution,
    instance: &Instance,
    level: f64,
    small: bool,
    rng: &mut R,
) -> Solution {
    let signed = solution.signed_libraries();
    if signed.is_empty() {
        return solution.clone();
    }
    let count = touch_count(signed.len(), level, small).min(signed.len());

    // Victim positions in the signed order.
    let victim_positions: Vec<usize> = if rng.random_bool(0.5) {
        sample(rng, signed.len(), count).into_vec()
    } else {
        let mut ranked: Vec<(f64, usize)> = signed
            .iter()
            .enumerate()
            .map(|(pos, &lib)| (efficiency_without_own(instance, solution, lib), pos))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
        ranked.into_iter().take(count).map(|(_, pos)| pos).collect()
    };

    let mut is_victim = vec![false; signed.len()];
    for &pos in &victim_positions {
        is_victim[pos] = true;
    }

    let mut order: Vec<usize> = Vec::with_capacity(signed.len());
    let mut vacated: Vec<usize> = Vec::with_capacity(count);
    let mut pool: Vec<usize> = solution.unsigned_libraries().to_vec();
    for (pos, &lib) in signed.iter().enumerate() {
        if is_victim[pos] {
            vacated.push(order.len());
            pool.push(lib);
        } else {
            order.push(lib);
        }
    }

    // Pick the replacements out of the pooled candidates.
    let picks = count.min(pool.len());
    let chosen: Vec<usize> = if rng.random_bool(0.5) {
        sample(rng, pool.len(), picks).into_vec()
    } else {
        let scanned = solution.scanned_books();
        let mut ranked: Vec<(f64, usize)> = pool
            .iter()
            .enumerate()
            .map(|(idx, &lib)| (library_efficiency(instance, lib, scanned), idx))
            .collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        ranked.into_iter().take(picks).map(|(_, idx)| idx).collect()
    };

    let mut taken = vec![false; pool.len()];
    for (slot, &idx) in chosen.iter().enumerate() {
        taken[idx] = true;
        let at = vacated[slot].min(order.len());
        order.insert(at, pool[idx]);
    }
    let leftover: Vec<usize> = pool
        .iter()
        .enumerate()
        .filter(|&(idx, _)| !taken[idx])
        .map(|(_, &lib)| lib)
        .collect();

    rebuild(instance, &order, &leftover)
}
