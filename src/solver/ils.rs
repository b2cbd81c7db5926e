//! Adaptive iterated local search driver.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constructive::{construct, ConstructionError};
use crate::local_search::local_search;
use crate::models::{Instance, Solution};
use crate::perturbation::{choose_perturbation, stagnation_level};

use super::IlsConfig;

/// Floor and ceiling for the per-iteration local-search budget derived
/// from the remaining time.
const MIN_LS_BUDGET: Duration = Duration::from_millis(50);
const MAX_LS_BUDGET: Duration = Duration::from_secs(5);

/// Inner iteration caps by instance class.
const LS_ITERATIONS: usize = 150;
const SMALL_LS_ITERATIONS: usize = 400;

/// Sharpness of the soft-acceptance exponential.
const ACCEPT_SHARPNESS: f64 = 10.0;

/// Budget and iteration multiplier for the small-instance polishing climb.
const INTENSIFY_FACTOR: u32 = 3;

/// Outcome of a solve: the best solution plus run statistics.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Best solution found.
    pub best: Solution,
    /// Outer iterations completed.
    pub iterations: usize,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Anytime solver: construct, then alternate perturbation and bounded
/// local search around a pool of homebases until time or iterations run
/// out.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_scanning::models::{Instance, Library};
/// use u_scanning::solver::{IlsConfig, IlsSolver};
///
/// let scores = vec![6, 4, 3];
/// let libraries = vec![
///     Library::new(0, 1, 1, &[0, 1], &scores),
///     Library::new(1, 1, 1, &[2], &scores),
/// ];
/// let instance = Instance::new(5, scores, libraries);
///
/// let solver = IlsSolver::new(
///     IlsConfig::new()
///         .with_seed(1)
///         .with_time_limit(Duration::from_millis(200))
///         .with_max_iterations(20),
/// );
/// let report = solver.solve(&instance).unwrap();
/// assert!(report.best.fitness_score() > 0);
/// ```
pub struct IlsSolver {
    config: IlsConfig,
}

impl IlsSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: IlsConfig) -> Self {
        Self { config }
    }

    /// The configuration this solver runs with.
    pub fn config(&self) -> &IlsConfig {
        &self.config
    }

    /// Runs the full anytime loop and returns the best solution found.
    pub fn solve(&self, instance: &Instance) -> Result<SolveReport, ConstructionError> {
        let start = Instant::now();
        let cfg = &self.config;
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let small = (instance.num_libraries() as u64)
            .saturating_mul(instance.num_books() as u64)
            < cfg.small_instance_threshold;
        log::info!(
            "solving: {} libraries, {} books, {} days ({} instance)",
            instance.num_libraries(),
            instance.num_books(),
            instance.num_days(),
            if small { "small" } else { "large" }
        );

        let construction_budget = cfg.construction_budget.min(cfg.time_limit);
        let mut current = construct(instance, construction_budget, &mut rng)?;
        let mut best = current.clone();
        log::info!("construction fitness: {}", best.fitness_score());

        let mut pool: Vec<Solution> = vec![current.clone()];
        let mut stagnation = 0usize;
        let mut iterations = 0usize;
        // The first iteration climbs from the construction solution; a
        // stagnation restart likewise holds its uniform pick for exactly
        // one iteration before fitness-proportional re-picking resumes.
        let mut hold_base = true;

        while iterations < cfg.max_iterations
            && start.elapsed() < cfg.time_limit
            && best.fitness_score() < instance.upper_bound()
        {
            let remaining = cfg.time_limit.saturating_sub(start.elapsed());
            let iterations_left = (cfg.max_iterations - iterations).max(1) as u32;
            let ls_budget = (remaining / iterations_left)
                .clamp(MIN_LS_BUDGET, MAX_LS_BUDGET)
                .min(remaining);
            let ls_iterations = if small {
                SMALL_LS_ITERATIONS
            } else {
                LS_ITERATIONS
            };

            // The homebase picked here is the search base: it seeds the
            // perturbation AND is the baseline acceptance compares against.
            refresh_base(&mut current, &pool, hold_base, &mut rng);
            hold_base = false;

            let level = stagnation_level(stagnation, cfg.stagnation_cap);
            let strategy = choose_perturbation(stagnation, cfg.stagnation_cap, &mut rng);
            let perturbed = strategy.apply(&current, instance, level, small, &mut rng);
            let candidate = local_search(
                &perturbed,
                instance,
                &cfg.tweak_weights,
                ls_budget,
                ls_iterations,
                &mut rng,
            );

            let accepted = if candidate.fitness_score() > current.fitness_score() {
                stagnation = 0;
                true
            } else {
                stagnation += 1;
                let gap = (current.fitness_score() - candidate.fitness_score()) as f64
                    / current.fitness_score().max(1) as f64;
                let p = (-gap * ACCEPT_SHARPNESS / (1.0 + stagnation as f64)).exp();
                rng.random_range(0.0..1.0) < p
            };

            if accepted {
                current = candidate;
                admit_to_pool(&mut pool, &current, cfg.homebase_capacity);
                if current.fitness_score() > best.fitness_score() {
                    best = current.clone();
                    log::debug!(
                        "iteration {}: new best fitness {}",
                        iterations,
                        best.fitness_score()
                    );
                }
            }

            if stagnation >= cfg.stagnation_cap {
                let restart = pool[rng.random_range(0..pool.len())].clone();
                log::debug!(
                    "iteration {}: stagnated, restarting from pool member with fitness {}",
                    iterations,
                    restart.fitness_score()
                );
                current = restart;
                stagnation = 0;
                hold_base = true;
            }

            iterations += 1;

            if small
                && cfg.intensification_interval > 0
                && iterations % cfg.intensification_interval == 0
            {
                let left = cfg.time_limit.saturating_sub(start.elapsed());
                let polished = local_search(
                    &current,
                    instance,
                    &cfg.tweak_weights,
                    (ls_budget * INTENSIFY_FACTOR).min(left),
                    ls_iterations * INTENSIFY_FACTOR as usize,
                    &mut rng,
                );
                if polished.fitness_score() > current.fitness_score() {
                    current = polished;
                    admit_to_pool(&mut pool, &current, cfg.homebase_capacity);
                    if current.fitness_score() > best.fitness_score() {
                        log::debug!(
                            "intensification improved best to {}",
                            current.fitness_score()
                        );
                        best = current.clone();
                    }
                }
            }
        }

        if best.fitness_score() >= instance.upper_bound() {
            log::info!("upper bound {} reached, stopping early", instance.upper_bound());
        }
        let elapsed = start.elapsed();
        log::info!(
            "done: fitness {} after {} iterations in {:.2?}",
            best.fitness_score(),
            iterations,
            elapsed
        );
        Ok(SolveReport {
            best,
            iterations,
            elapsed,
        })
    }
}

/// Sets the base for the next iteration.
///
/// Normally a fitness-proportional pool draw replaces `current`; when
/// `hold` is set (first iteration, or the one right after a stagnation
/// restart) the existing base is kept so the restart's uniform choice
/// actually seeds a perturbation.
fn refresh_base<R: Rng>(current: &mut Solution, pool: &[Solution], hold: bool, rng: &mut R) {
    if !hold {
        *current = pick_homebase(pool, rng).clone();
    }
}

/// Fitness-proportional draw from the homebase pool.
fn pick_homebase<'a, R: Rng>(pool: &'a [Solution], rng: &mut R) -> &'a Solution {
    let total: u64 = pool.iter().map(|s| s.fitness_score() + 1).sum();
    let mut roll = rng.random_range(0..total);
    for solution in pool {
        let weight = solution.fitness_score() + 1;
        if roll < weight {
            return solution;
        }
        roll -= weight;
    }
    &pool[pool.len() - 1]
}

/// Inserts `solution` if its fitness is distinct from every pool member,
/// evicting the lowest-fitness member when the pool overflows.
fn admit_to_pool(pool: &mut Vec<Solution>, solution: &Solution, capacity: usize) {
    if capacity == 0 {
        return;
    }
    if pool
        .iter()
        .any(|s| s.fitness_score() == solution.fitness_score())
    {
        return;
    }
    pool.push(solution.clone());
    if pool.len() > capacity {
        if let Some(lowest) = pool
            .iter()
            .enumerate()
            .min_by_key(|(_, s)| s.fitness_score())
            .map(|(idx, _)| idx)
        {
            pool.swap_remove(lowest);
        }
    }
}
