//! GRASP construction: randomized greedy over a restricted candidate list.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use rand::Rng;

use crate::local_search::{local_search, TweakWeights};
use crate::models::{Instance, Solution};
use crate::schedule::try_sign;

use super::ConstructionError;

/// Iteration cap for the short improvement pass after each construction.
const CYCLE_LS_ITERATIONS: usize = 100;

/// Builds one solution GRASP-style.
///
/// The candidate pool starts sorted like
/// [`sorted_signup`](super::sorted_signup) (signup days ascending, total
/// catalog score descending); each step draws uniformly at random from the
/// top `p` fraction of the remaining pool (the restricted candidate list)
/// and attempts to sign the drawn library against the running state.
pub fn build_grasp<R: Rng>(instance: &Instance, p: f64, rng: &mut R) -> Solution {
    let mut pool: Vec<usize> = (0..instance.num_libraries()).collect();
    pool.sort_by(|&a, &b| {
        let la = instance.library(a);
        let lb = instance.library(b);
        la.signup_days()
            .cmp(&lb.signup_days())
            .then(lb.total_score().cmp(&la.total_score()))
    });

    let mut elapsed = 0u64;
    let mut scanned: HashSet<usize> = HashSet::new();
    let mut per_library: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut signed = Vec::new();
    let mut unsigned = Vec::new();

    while !pool.is_empty() {
        let rcl_size = ((pool.len() as f64 * p) as usize).max(1);
        let pick = rng.random_range(0..rcl_size);
        let lib_id = pool.remove(pick);

        let library = instance.library(lib_id);
        match try_sign(instance, library, elapsed, &scanned) {
            Some(selection) => {
                scanned.extend(selection.iter().copied());
                per_library.insert(lib_id, selection);
                signed.push(lib_id);
                elapsed += library.signup_days() as u64;
            }
            None => unsigned.push(lib_id),
        }
    }

    let mut solution = Solution::new(signed, unsigned, per_library, scanned);
    solution.recompute_fitness(instance.scores());
    solution
}

/// Repeats construction-plus-short-local-search cycles until the budget
/// elapses, keeping the best fitness seen. At least one cycle always runs.
pub fn grasp<R: Rng>(
    instance: &Instance,
    p: f64,
    budget: Duration,
    rng: &mut R,
) -> Result<Solution, ConstructionError> {
    if !(p > 0.0 && p <= 1.0) {
        return Err(ConstructionError::InvalidParameter {
            heuristic: "grasp",
            detail: format!("rcl fraction must be in (0, 1], got {p}"),
        });
    }

    let start = Instant::now();
    let cycle_ls = budget.mul_f32(0.25).min(Duration::from_millis(500));
    let weights = TweakWeights::default();
    let mut best: Option<Solution> = None;

    loop {
        let candidate = build_grasp(instance, p, rng);
        let improved = local_search(
            &candidate,
            instance,
            &weights,
            cycle_ls,
            CYCLE_LS_ITERATIONS,
            rng,
        );
        if best
            .as_ref()
            .is_none_or(|b| improved.fitness_score() > b.fitness_score())
        {
            best = Some(improved);
        }
        if start.elapsed() >= budget {
            break;
        }
    }

    // The loop body runs at least once, so a solution is always present.
    best.ok_or(ConstructionError::NoSolution { heuristic: "grasp" })
}
