//! Self-recombination operator over the signed sequence.

use rand::Rng;

use crate::models::{Instance, Solution};
use crate::schedule::rebuild;

/// Splits the signed sequence at a random point, rebuilds each side on
/// its own, and keeps whichever child scores higher.
///
/// The discarded side joins the unsigned pool of its child, so the move
/// trades breadth for a cleaner prefix: a child scans fewer libraries but
/// every one of them gets the full remaining horizon.
pub fn crossover<R: Rng>(solution: &Solution, instance: &Instance, rng: &mut R) -> Solution {
    let signed = solution.signed_libraries();
    if signed.len() < 2 {
        return solution.clone();
    }
    let split = rng.random_range(1..signed.len());
    let (left, right) = signed.split_at(split);
    let unsigned = solution.unsigned_libraries();

    let mut left_pool = unsigned.to_vec();
    left_pool.extend_from_slice(right);
    let left_child = rebuild(instance, left, &left_pool);

    let mut right_pool = unsigned.to_vec();
    right_pool.extend_from_slice(left);
    let right_child = rebuild(instance, right, &right_pool);

    if left_child.fitness_score() >= right_child.fitness_score() {
        left_child
    } else {
        right_child
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Library;
    use crate::schedule::rebuild;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn instance() -> Instance {
        let scores = vec![9, 8, 7, 6, 5];
        let libs = vec![
            Library::new(0, 1, 1, &[0], &scores),
            Library::new(1, 1, 1, &[1], &scores),
            Library::new(2, 1, 1, &[2], &scores),
            Library::new(3, 1, 1, &[3, 4], &scores),
        ];
        Instance::new(6, scores, libs)
    }

    #[test]
    fn test_keeps_whole_universe() {
        let instance = instance();
        let sol = rebuild(&instance, &[0, 1, 2], &[3]);
        let mut rng = StdRng::seed_from_u64(8);
        let child = crossover(&sol, &instance, &mut rng);
        assert_eq!(
            child.signed_libraries().len() + child.unsigned_libraries().len(),
            instance.num_libraries()
        );
        assert_eq!(
            child.fitness_score(),
            child.fitness_from_scratch(instance.scores())
        );
        assert!(child.fitness_score() <= instance.upper_bound());
    }

    #[test]
    fn test_single_signed_library_is_identity() {
        let instance = instance();
        let sol = rebuild(&instance, &[0], &[1, 2, 3]);
        let mut rng = StdRng::seed_from_u64(8);
        let child = crossover(&sol, &instance, &mut rng);
        assert_eq!(child.signed_libraries(), sol.signed_libraries());
    }

    #[test]
    fn test_returns_better_of_both_children() {
        // Each side signs at least one library here, so whichever child
        // wins must have scanned something.
        let instance = instance();
        let sol = rebuild(&instance, &[0, 1, 2, 3], &[]);
        let mut rng = StdRng::seed_from_u64(2);
        let child = crossover(&sol, &instance, &mut rng);
        assert!(child.fitness_score() > 0);
    }

    #[test]
    fn test_child_is_built_from_one_side_only() {
        // Library 0 is always left of the split and library 3 always
        // right of it, so no child may sign both.
        let instance = instance();
        let sol = rebuild(&instance, &[0, 1, 2, 3], &[]);
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let child = crossover(&sol, &instance, &mut rng);
            let signed = child.signed_libraries();
            assert!(
                !(signed.contains(&0) && signed.contains(&3)),
                "child mixed both sides: {signed:?}"
            );
            assert_eq!(
                child.signed_libraries().len() + child.unsigned_libraries().len(),
                instance.num_libraries()
            );
        }
    }
}
