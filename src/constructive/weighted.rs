//! Weighted-efficiency construction with tunable exploration.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::models::{Instance, Solution};
use crate::schedule::try_sign;

use super::ConstructionError;

/// Alpha grid explored by [`tune_weighted_efficiency`], best-first.
const ALPHA_GRID: [f64; 4] = [1.0, 0.5, 1.5, 2.0];
/// Beta grid explored by [`tune_weighted_efficiency`].
const BETA_GRID: [f64; 4] = [0.0, 0.05, 0.1, 0.2];

/// Builds a solution by iteratively committing the remaining library that
/// maximizes `achievable_score / (signup_days^alpha * (1 + beta * chosen))`.
///
/// `alpha` penalizes costly signups; `beta` penalizes the heuristic's own
/// greed as more libraries are committed, pushing successive runs toward
/// different prefixes.
pub fn weighted_efficiency(
    instance: &Instance,
    alpha: f64,
    beta: f64,
) -> Result<Solution, ConstructionError> {
    if !alpha.is_finite() || alpha < 0.0 {
        return Err(ConstructionError::InvalidParameter {
            heuristic: "weighted_efficiency",
            detail: format!("alpha must be finite and non-negative, got {alpha}"),
        });
    }
    if !beta.is_finite() || beta < 0.0 {
        return Err(ConstructionError::InvalidParameter {
            heuristic: "weighted_efficiency",
            detail: format!("beta must be finite and non-negative, got {beta}"),
        });
    }

    let horizon = instance.num_days() as u64;
    let mut remaining: Vec<usize> = (0..instance.num_libraries()).collect();
    let mut elapsed = 0u64;
    let mut scanned: HashSet<usize> = HashSet::new();
    let mut per_library: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut signed = Vec::new();

    while !remaining.is_empty() && elapsed < horizon {
        let mut best: Option<(f64, usize, Vec<usize>)> = None;
        for (pos, &lib_id) in remaining.iter().enumerate() {
            let library = instance.library(lib_id);
            let Some(selection) = try_sign(instance, library, elapsed, &scanned) else {
                continue;
            };
            let achievable: u64 = selection.iter().map(|&b| instance.score(b) as u64).sum();
            if achievable == 0 {
                continue;
            }
            let penalty = (library.signup_days().max(1) as f64).powf(alpha)
                * (1.0 + beta * signed.len() as f64);
            let weighted = achievable as f64 / penalty;
            if best.as_ref().is_none_or(|(w, _, _)| weighted > *w) {
                best = Some((weighted, pos, selection));
            }
        }

        let Some((_, pos, selection)) = best else {
            break;
        };
        let lib_id = remaining.remove(pos);
        scanned.extend(selection.iter().copied());
        per_library.insert(lib_id, selection);
        elapsed += instance.library(lib_id).signup_days() as u64;
        signed.push(lib_id);
    }

    let mut solution = Solution::new(signed, remaining, per_library, scanned);
    solution.recompute_fitness(instance.scores());
    Ok(solution)
}

/// Grid-searches `(alpha, beta)` under a time budget and returns the
/// best-scoring solution found.
pub fn tune_weighted_efficiency(
    instance: &Instance,
    budget: Duration,
) -> Result<Solution, ConstructionError> {
    let start = Instant::now();
    let mut best: Option<(f64, f64, Solution)> = None;

    'grid: for &alpha in &ALPHA_GRID {
        for &beta in &BETA_GRID {
            if best.is_some() && start.elapsed() >= budget {
                break 'grid;
            }
            let solution = weighted_efficiency(instance, alpha, beta)?;
            if best
                .as_ref()
                .is_none_or(|(_, _, b)| solution.fitness_score() > b.fitness_score())
            {
                best = Some((alpha, beta, solution));
            }
        }
    }

    match best {
        Some((alpha, beta, solution)) => {
            log::debug!(
                "weighted-efficiency tuner picked alpha={} beta={} (fitness {})",
                alpha,
                beta,
                solution.fitness_score()
            );
            Ok(solution)
        }
        None => Err(ConstructionError::NoSolution {
            heuristic: "weighted_efficiency",
        }),
    }
}
