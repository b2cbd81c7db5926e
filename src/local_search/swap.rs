//! Position-exchange operators over the signup schedule.

use rand::Rng;

use crate::models::{Instance, Solution};
use crate::schedule::rebuild;

/// Where to sample the signed position for
/// [`swap_signed_with_unsigned`].
///
/// Early positions control the whole downstream allocation, late positions
/// are cheap to disturb; biasing the sample probes one or the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionBias {
    /// Uniform over all signed positions.
    None,
    /// Prefer the first half of the schedule.
    FavorFirstHalf,
    /// Prefer the second half of the schedule.
    FavorSecondHalf,
}

/// Default probability of honoring the bias when one is requested.
pub const DEFAULT_BIAS_RATIO: f64 = 2.0 / 3.0;

/// Exchanges the positions of two randomly chosen signed libraries and
/// rebuilds.
pub fn swap_signed<R: Rng>(solution: &Solution, instance: &Instance, rng: &mut R) -> Solution {
    let signed = solution.signed_libraries();
    if signed.len() < 2 {
        return solution.clone();
    }
    let i = rng.random_range(0..signed.len());
    let mut j = rng.random_range(0..signed.len());
    while j == i {
        j = rng.random_range(0..signed.len());
    }
    let mut order = signed.to_vec();
    order.swap(i, j);
    rebuild(instance, &order, solution.unsigned_libraries())
}

/// Exchanges two adjacent signed positions — a finer-grained local move
/// than [`swap_signed`].
pub fn swap_neighbors<R: Rng>(solution: &Solution, instance: &Instance, rng: &mut R) -> Solution {
    let signed = solution.signed_libraries();
    if signed.len() < 2 {
        return solution.clone();
    }
    let pos = rng.random_range(0..signed.len() - 1);
    let mut order = signed.to_vec();
    order.swap(pos, pos + 1);
    rebuild(instance, &order, solution.unsigned_libraries())
}

/// Exchanges one signed library with one unsigned library and rebuilds.
///
/// The signed position can be biased toward either half of the schedule;
/// with probability `1 - bias_ratio` (or with `PositionBias::None`) it is
/// drawn uniformly.
pub fn swap_signed_with_unsigned<R: Rng>(
    solution: &Solution,
    instance: &Instance,
    bias: PositionBias,
    bias_ratio: f64,
    rng: &mut R,
) -> Solution {
    let signed = solution.signed_libraries();
    let unsigned = solution.unsigned_libraries();
    if signed.is_empty() || unsigned.is_empty() {
        return solution.clone();
    }

    let total = signed.len();
    let half = total / 2;
    let signed_idx = match bias {
        PositionBias::FavorFirstHalf if half > 0 && rng.random_range(0.0..1.0) < bias_ratio => {
            rng.random_range(0..half)
        }
        PositionBias::FavorSecondHalf if half < total && rng.random_range(0.0..1.0) < bias_ratio => {
            rng.random_range(half..total)
        }
        _ => rng.random_range(0..total),
    };
    let unsigned_idx = rng.random_range(0..unsigned.len());

    let mut order = signed.to_vec();
    let mut pool = unsigned.to_vec();
    std::mem::swap(&mut order[signed_idx], &mut pool[unsigned_idx]);
    rebuild(instance, &order, &pool)
}

/// Exchanges two signed positions, then rebuilds over the swapped prefix
/// followed by every remaining library in ascending id order.
///
/// Unlike [`swap_signed`] this re-offers the whole library universe to the
/// rebuild, so unsigned libraries can re-enter behind the swapped pair.
pub fn swap_same_books<R: Rng>(solution: &Solution, instance: &Instance, rng: &mut R) -> Solution {
    let signed = solution.signed_libraries();
    if signed.len() < 2 {
        return solution.clone();
    }
    let i = rng.random_range(0..signed.len());
    let mut j = rng.random_range(0..signed.len());
    while j == i {
        j = rng.random_range(0..signed.len());
    }
    let mut order = signed.to_vec();
    order.swap(i, j);

    let mut in_order = vec![false; instance.num_libraries()];
    for &lib_id in &order {
        in_order[lib_id] = true;
    }
    order.extend((0..instance.num_libraries()).filter(|&id| !in_order[id]));
    rebuild(instance, &order, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Library;
    use crate::schedule::rebuild;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn instance() -> Instance {
        let scores = vec![9, 7, 5, 3, 2];
        let libs = vec![
            Library::new(0, 1, 1, &[0, 1], &scores),
            Library::new(1, 1, 1, &[1, 2], &scores),
            Library::new(2, 2, 2, &[3, 4], &scores),
            Library::new(3, 1, 1, &[0, 4], &scores),
        ];
        Instance::new(6, scores, libs)
    }

    fn base_solution(instance: &Instance) -> Solution {
        rebuild(instance, &[0, 1, 2], &[3])
    }

    #[test]
    fn test_swap_signed_keeps_invariants() {
        let instance = instance();
        let sol = base_solution(&instance);
        let mut rng = StdRng::seed_from_u64(2);
        let tweaked = swap_signed(&sol, &instance, &mut rng);
        assert_eq!(
            tweaked.fitness_score(),
            tweaked.fitness_from_scratch(instance.scores())
        );
        assert!(tweaked.fitness_score() <= instance.upper_bound());
    }

    #[test]
    fn test_swap_signed_too_small_is_identity() {
        let instance = instance();
        let sol = rebuild(&instance, &[0], &[1, 2, 3]);
        let mut rng = StdRng::seed_from_u64(2);
        let tweaked = swap_signed(&sol, &instance, &mut rng);
        assert_eq!(tweaked.signed_libraries(), sol.signed_libraries());
        assert_eq!(tweaked.fitness_score(), sol.fitness_score());
    }

    #[test]
    fn test_swap_round_trip_restores_fitness() {
        // Swapping the same index pair twice restores the original order,
        // and the rebuild is deterministic given the same order.
        let instance = instance();
        let sol = base_solution(&instance);

        let mut order = sol.signed_libraries().to_vec();
        order.swap(0, 2);
        order.swap(0, 2);
        assert_eq!(order, sol.signed_libraries());

        let twice = rebuild(&instance, &order, sol.unsigned_libraries());
        assert_eq!(twice.signed_libraries(), sol.signed_libraries());
        assert_eq!(twice.fitness_score(), sol.fitness_score());
    }

    #[test]
    fn test_swap_neighbors_touches_adjacent_positions() {
        let instance = instance();
        let sol = base_solution(&instance);
        let mut rng = StdRng::seed_from_u64(4);
        let tweaked = swap_neighbors(&sol, &instance, &mut rng);
        assert_eq!(
            tweaked.fitness_score(),
            tweaked.fitness_from_scratch(instance.scores())
        );
    }

    #[test]
    fn test_swap_signed_with_unsigned_moves_membership() {
        let instance = instance();
        let sol = base_solution(&instance);
        let mut rng = StdRng::seed_from_u64(9);
        let tweaked = swap_signed_with_unsigned(
            &sol,
            &instance,
            PositionBias::None,
            DEFAULT_BIAS_RATIO,
            &mut rng,
        );
        // Library 3 left the unsigned pool (it was the only member).
        assert!(!tweaked.unsigned_libraries().is_empty());
        assert_eq!(
            tweaked.signed_libraries().len() + tweaked.unsigned_libraries().len(),
            instance.num_libraries()
        );
    }

    #[test]
    fn test_swap_with_unsigned_empty_pool_is_identity() {
        let scores = vec![4, 3];
        let libs = vec![
            Library::new(0, 1, 1, &[0], &scores),
            Library::new(1, 1, 1, &[1], &scores),
        ];
        let instance = Instance::new(5, scores, libs);
        let sol = rebuild(&instance, &[0, 1], &[]);
        assert!(sol.unsigned_libraries().is_empty());

        let mut rng = StdRng::seed_from_u64(1);
        let tweaked = swap_signed_with_unsigned(
            &sol,
            &instance,
            PositionBias::FavorFirstHalf,
            DEFAULT_BIAS_RATIO,
            &mut rng,
        );
        assert_eq!(tweaked.signed_libraries(), sol.signed_libraries());
        assert_eq!(tweaked.fitness_score(), sol.fitness_score());
    }

    #[test]
    fn test_swap_same_books_covers_whole_universe() {
        let instance = instance();
        let sol = base_solution(&instance);
        let mut rng = StdRng::seed_from_u64(6);
        let tweaked = swap_same_books(&sol, &instance, &mut rng);
        assert_eq!(
            tweaked.signed_libraries().len() + tweaked.unsigned_libraries().len(),
            instance.num_libraries()
        );
        assert_eq!(
            tweaked.fitness_score(),
            tweaked.fitness_from_scratch(instance.scores())
        );
    }
}
