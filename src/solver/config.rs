//! Configuration for the iterated local search driver.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::local_search::TweakWeights;

/// Tunables for [`IlsSolver`](super::IlsSolver).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_scanning::solver::IlsConfig;
///
/// let config = IlsConfig::new()
///     .with_time_limit(Duration::from_secs(30))
///     .with_seed(42)
///     .with_max_iterations(200);
/// assert_eq!(config.max_iterations, 200);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IlsConfig {
    /// Wall-clock budget for the whole solve, construction included.
    pub time_limit: Duration,
    /// Cap on outer ILS iterations.
    pub max_iterations: usize,
    /// RNG seed; `None` draws one from the OS for a non-reproducible run.
    pub seed: Option<u64>,
    /// Operator sampling weights for the inner local search.
    pub tweak_weights: TweakWeights,
    /// Bound on the homebase pool of recent accepted solutions.
    pub homebase_capacity: usize,
    /// Non-improving iterations tolerated before a pool restart.
    pub stagnation_cap: usize,
    /// Instances with `libraries * books` below this count as "small" and
    /// get wider perturbations and longer inner climbs.
    pub small_instance_threshold: u64,
    /// Budget handed to the construction meta-selector.
    pub construction_budget: Duration,
    /// On small instances, every this many outer iterations the incumbent
    /// best gets an extra polishing climb.
    pub intensification_interval: usize,
}

impl Default for IlsConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(300),
            max_iterations: 1000,
            seed: None,
            tweak_weights: TweakWeights::default(),
            homebase_capacity: 8,
            stagnation_cap: 12,
            small_instance_threshold: 1_000_000,
            construction_budget: Duration::from_secs(20),
            intensification_interval: 25,
        }
    }
}

impl IlsConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Sets the outer iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Fixes the RNG seed for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the operator sampling weights.
    pub fn with_tweak_weights(mut self, weights: TweakWeights) -> Self {
        self.tweak_weights = weights;
        self
    }

    /// Sets the homebase pool bound.
    pub fn with_homebase_capacity(mut self, capacity: usize) -> Self {
        self.homebase_capacity = capacity;
        self
    }

    /// Sets the stagnation restart threshold.
    pub fn with_stagnation_cap(mut self, cap: usize) -> Self {
        self.stagnation_cap = cap;
        self
    }

    /// Sets the small-instance classification threshold.
    pub fn with_small_instance_threshold(mut self, threshold: u64) -> Self {
        self.small_instance_threshold = threshold;
        self
    }

    /// Sets the construction budget.
    pub fn with_construction_budget(mut self, budget: Duration) -> Self {
        self.construction_budget = budget;
        self
    }

    /// Sets the intensification cadence for small instances.
    pub fn with_intensification_interval(mut self, interval: usize) -> Self {
        self.intensification_interval = interval;
        self
    }
}
