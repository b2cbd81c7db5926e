//! Construction heuristics for building an initial feasible solution.
//!
//! - [`sorted_signup`] — Fixed order: signup days ascending, catalog score descending
//! - [`greedy_heap`] — Priority queue over score-per-signup-day efficiency
//! - [`build_grasp`] / [`grasp`] — Randomized greedy over a restricted candidate list
//! - [`weighted_efficiency`] / [`tune_weighted_efficiency`] — Penalized efficiency with an `(alpha, beta)` grid search
//! - [`construct`] — Meta-selector running all of the above and keeping the best

use std::fmt;
use std::time::Duration;

use rand::Rng;

use crate::models::{Instance, Solution};

mod grasp;
mod greedy;
mod sorted;
mod weighted;

pub use grasp::{build_grasp, grasp};
pub use greedy::greedy_heap;
pub use sorted::sorted_signup;
pub use weighted::{tune_weighted_efficiency, weighted_efficiency};

/// Default restricted-candidate-list fraction for GRASP.
pub const DEFAULT_RCL_FRACTION: f64 = 0.05;

/// Why a construction heuristic produced no solution.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructionError {
    /// A heuristic parameter was outside its valid range.
    InvalidParameter {
        /// The heuristic that rejected the parameter.
        heuristic: &'static str,
        /// What was wrong with it.
        detail: String,
    },
    /// The heuristic finished without producing any solution.
    NoSolution {
        /// The heuristic that came up empty.
        heuristic: &'static str,
    },
    /// Every heuristic in the meta-selector failed.
    AllHeuristicsFailed,
}

impl fmt::Display for ConstructionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter { heuristic, detail } => {
                write!(f, "{heuristic}: invalid parameter: {detail}")
            }
            Self::NoSolution { heuristic } => {
                write!(f, "{heuristic}: produced no solution")
            }
            Self::AllHeuristicsFailed => {
                write!(f, "no construction heuristic produced a solution")
            }
        }
    }
}

impl std::error::Error for ConstructionError {}

/// Runs the weighted-efficiency tuner plus the other three heuristics under
/// a shared time budget and returns the best-fitness solution.
///
/// A failing heuristic is logged and skipped, not fatal to the batch; the
/// meta-selector fails only if every heuristic fails.
///
/// The tuner gets half the budget and GRASP a quarter; the sorted and
/// greedy heuristics are single deterministic passes.
pub fn construct<R: Rng>(
    instance: &Instance,
    budget: Duration,
    rng: &mut R,
) -> Result<Solution, ConstructionError> {
    let attempts: [(&str, Result<Solution, ConstructionError>); 4] = [
        (
            "weighted_efficiency",
            tune_weighted_efficiency(instance, budget.mul_f32(0.5)),
        ),
        ("greedy_heap", Ok(greedy_heap(instance))),
        (
            "grasp",
            grasp(instance, DEFAULT_RCL_FRACTION, budget.mul_f32(0.25), rng),
        ),
        ("sorted_signup", Ok(sorted_signup(instance))),
    ];

    let mut best: Option<Solution> = None;
    for (name, attempt) in attempts {
        match attempt {
            Ok(solution) => {
                log::debug!("{} produced fitness {}", name, solution.fitness_score());
                if best
                    .as_ref()
                    .is_none_or(|b| solution.fitness_score() > b.fitness_score())
                {
                    best = Some(solution);
                }
            }
            Err(err) => log::warn!("construction heuristic {} skipped: {}", name, err),
        }
    }

    best.ok_or(ConstructionError::AllHeuristicsFailed)
}
