//! Bounded hill-climbing over a weighted portfolio of tweak operators.
//!
//! - [`TweakKind`] — The seven neighborhood operators
//! - [`TweakWeights`] — Sampling weights for the roulette dispatch
//! - [`choose_tweak`] — Weighted random operator selection
//! - [`local_search`] — Strict-improvement climb under time and iteration caps

use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Instance, Solution};

mod book_swap;
mod crossover;
mod insert;
mod swap;

pub use book_swap::swap_last_book;
pub use crossover::crossover;
pub use insert::insert_library;
pub use swap::{
    swap_neighbors, swap_same_books, swap_signed, swap_signed_with_unsigned, PositionBias,
    DEFAULT_BIAS_RATIO,
};

/// A single neighborhood move over a feasible solution.
///
/// Every operator clones, mutates, and re-derives, so the input solution is
/// never invalidated; callers decide whether to keep the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweakKind {
    /// Exchange two signed positions.
    SwapSigned,
    /// Exchange a signed library with an unsigned one.
    SwapSignedWithUnsigned,
    /// Exchange two signed positions and re-offer the whole universe.
    SwapSameBooks,
    /// Exchange two adjacent signed positions.
    SwapNeighbors,
    /// Promote an unsigned library into the schedule.
    InsertLibrary,
    /// Trade a library's last book for the best unclaimed one.
    SwapLastBook,
    /// Recombine the two halves of the schedule, keep the better child.
    Crossover,
}

impl TweakKind {
    /// All operators, in the order [`TweakWeights`] lists them.
    pub const ALL: [TweakKind; 7] = [
        TweakKind::SwapSigned,
        TweakKind::SwapSignedWithUnsigned,
        TweakKind::SwapSameBooks,
        TweakKind::SwapNeighbors,
        TweakKind::InsertLibrary,
        TweakKind::SwapLastBook,
        TweakKind::Crossover,
    ];

    /// Applies this operator to `solution` and returns the neighbor.
    pub fn apply<R: Rng>(self, solution: &Solution, instance: &Instance, rng: &mut R) -> Solution {
        match self {
            TweakKind::SwapSigned => swap_signed(solution, instance, rng),
            TweakKind::SwapSignedWithUnsigned => swap_signed_with_unsigned(
                solution,
                instance,
                PositionBias::None,
                DEFAULT_BIAS_RATIO,
                rng,
            ),
            TweakKind::SwapSameBooks => swap_same_books(solution, instance, rng),
            TweakKind::SwapNeighbors => swap_neighbors(solution, instance, rng),
            TweakKind::InsertLibrary => insert_library(solution, instance, rng),
            TweakKind::SwapLastBook => swap_last_book(solution, instance, rng),
            TweakKind::Crossover => crossover(solution, instance, rng),
        }
    }
}

/// Sampling weights for [`choose_tweak`].
///
/// The defaults lean on membership moves: swapping against the unsigned
/// pool and promoting unsigned libraries move more score than reshuffling
/// the signed prefix, so they are drawn more often.
///
/// # Examples
///
/// ```
/// use u_scanning::local_search::TweakWeights;
///
/// let weights = TweakWeights {
///     crossover: 0.0,
///     ..TweakWeights::default()
/// };
/// assert_eq!(weights.swap_signed_with_unsigned, 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweakWeights {
    pub swap_signed: f64,
    pub swap_signed_with_unsigned: f64,
    pub swap_same_books: f64,
    pub swap_neighbors: f64,
    pub insert_library: f64,
    pub swap_last_book: f64,
    pub crossover: f64,
}

impl Default for TweakWeights {
    fn default() -> Self {
        Self {
            swap_signed: 1.0,
            swap_signed_with_unsigned: 3.0,
            swap_same_books: 1.0,
            swap_neighbors: 1.0,
            insert_library: 2.0,
            swap_last_book: 1.0,
            crossover: 1.0,
        }
    }
}

impl TweakWeights {
    /// Weight assigned to `kind`.
    pub fn weight(&self, kind: TweakKind) -> f64 {
        match kind {
            TweakKind::SwapSigned => self.swap_signed,
            TweakKind::SwapSignedWithUnsigned => self.swap_signed_with_unsigned,
            TweakKind::SwapSameBooks => self.swap_same_books,
            TweakKind::SwapNeighbors => self.swap_neighbors,
            TweakKind::InsertLibrary => self.insert_library,
            TweakKind::SwapLastBook => self.swap_last_book,
            TweakKind::Crossover => self.crossover,
        }
    }

    fn total(&self) -> f64 {
        TweakKind::ALL.iter().map(|&k| self.weight(k)).sum()
    }
}

/// Draws an operator with probability proportional to its weight.
///
/// Falls back to [`TweakKind::SwapSigned`] if every weight is zero or
/// non-finite.
pub fn choose_tweak<R: Rng>(weights: &TweakWeights, rng: &mut R) -> TweakKind {
    let total = weights.total();
    if !(total > 0.0) || !total.is_finite() {
        return TweakKind::SwapSigned;
    }
    let mut roll = rng.random_range(0.0..total);
    for &kind in &TweakKind::ALL {
        let w = weights.weight(kind);
        if roll < w {
            return kind;
        }
        roll -= w;
    }
    // Floating-point leftovers land on the last operator.
    TweakKind::Crossover
}

/// Hill-climbs from `solution`, sampling one weighted operator per
/// iteration and keeping only strict improvements.
///
/// Stops at `time_limit` or after `max_iterations` samples, whichever
/// comes first. Worsening neighbors are always discarded; randomized
/// acceptance of bad moves is the outer driver's job.
pub fn local_search<R: Rng>(
    solution: &Solution,
    instance: &Instance,
    weights: &TweakWeights,
    time_limit: Duration,
    max_iterations: usize,
    rng: &mut R,
) -> Solution {
    let start = Instant::now();
    let mut best = solution.clone();

    for _ in 0..max_iterations {
        if start.elapsed() >= time_limit {
            break;
        }
        let kind = choose_tweak(weights, rng);
        let neighbor = kind.apply(&best, instance, rng);
        if neighbor.fitness_score() > best.fitness_score() {
            best = neighbor;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Library;
    use crate::schedule::rebuild;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn instance() -> Instance {
        let scores = vec![9, 8, 7, 6, 5, 4];
        let libs = vec![
            Library::new(0, 2, 1, &[0, 1], &scores),
            Library::new(1, 1, 1, &[2, 3], &scores),
            Library::new(2, 1, 2, &[4, 5], &scores),
            Library::new(3, 1, 1, &[0, 5], &scores),
        ];
        Instance::new(7, scores, libs)
    }

    #[test]
    fn test_never_worsens() {
        let instance = instance();
        let start = rebuild(&instance, &[0, 1], &[2, 3]);
        let mut rng = StdRng::seed_from_u64(17);
        let improved = local_search(
            &start,
            &instance,
            &TweakWeights::default(),
            Duration::from_millis(50),
            200,
            &mut rng,
        );
        assert!(improved.fitness_score() >= start.fitness_score());
        assert_eq!(
            improved.fitness_score(),
            improved.fitness_from_scratch(instance.scores())
        );
        assert!(improved.fitness_score() <= instance.upper_bound());
    }

    #[test]
    fn test_zero_iterations_returns_input() {
        let instance = instance();
        let start = rebuild(&instance, &[0, 1], &[2, 3]);
        let mut rng = StdRng::seed_from_u64(17);
        let out = local_search(
            &start,
            &instance,
            &TweakWeights::default(),
            Duration::from_secs(1),
            0,
            &mut rng,
        );
        assert_eq!(out.signed_libraries(), start.signed_libraries());
        assert_eq!(out.fitness_score(), start.fitness_score());
    }

    #[test]
    fn test_single_weight_forces_operator() {
        let weights = TweakWeights {
            swap_signed: 0.0,
            swap_signed_with_unsigned: 0.0,
            swap_same_books: 0.0,
            swap_neighbors: 0.0,
            insert_library: 5.0,
            swap_last_book: 0.0,
            crossover: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            assert_eq!(choose_tweak(&weights, &mut rng), TweakKind::InsertLibrary);
        }
    }

    #[test]
    fn test_all_zero_weights_fall_back() {
        let weights = TweakWeights {
            swap_signed: 0.0,
            swap_signed_with_unsigned: 0.0,
            swap_same_books: 0.0,
            swap_neighbors: 0.0,
            insert_library: 0.0,
            swap_last_book: 0.0,
            crossover: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(choose_tweak(&weights, &mut rng), TweakKind::SwapSigned);
    }

    #[test]
    fn test_weights_round_trip_through_serde() {
        let weights = TweakWeights {
            insert_library: 4.5,
            ..TweakWeights::default()
        };
        let json = serde_json::to_string(&weights).unwrap();
        let back: TweakWeights = serde_json::from_str(&json).unwrap();
        assert_eq!(back, weights);
    }

    #[test]
    fn test_default_weights_favor_membership_moves() {
        let weights = TweakWeights::default();
        assert_eq!(weights.swap_signed_with_unsigned, 3.0);
        assert_eq!(weights.insert_library, 2.0);
        assert_eq!(weights.swap_signed, 1.0);
    }

    #[test]
    fn test_every_operator_keeps_solution_consistent() {
        let instance = instance();
        let start = rebuild(&instance, &[0, 1, 2], &[3]);
        let mut rng = StdRng::seed_from_u64(23);
        for &kind in &TweakKind::ALL {
            let neighbor = kind.apply(&start, &instance, &mut rng);
            assert_eq!(
                neighbor.fitness_score(),
                neighbor.fitness_from_scratch(instance.scores()),
                "{kind:?} broke the fitness invariant"
            );
        }
    }
}
