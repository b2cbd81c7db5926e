//! Fixed-order construction by signup cost and catalog value.

use crate::models::{Instance, Solution};
use crate::schedule::rebuild;

/// Builds a solution by rebuilding over a fixed order: libraries sorted by
/// ascending signup days, ties broken by descending total catalog score.
///
/// The cheapest-to-activate libraries go first so the horizon is spent
/// scanning rather than signing up; among equally cheap libraries the one
/// with the richest catalog wins.
///
/// # Examples
///
/// ```
/// use u_scanning::constructive::sorted_signup;
/// use u_scanning::models::{Instance, Library};
///
/// let scores = vec![6, 5, 4];
/// let libs = vec![
///     Library::new(0, 3, 1, &[0], &scores),
///     Library::new(1, 1, 2, &[1, 2], &scores),
/// ];
/// let instance = Instance::new(5, scores, libs);
/// let sol = sorted_signup(&instance);
/// // Library 1 signs first (cheaper signup).
/// assert_eq!(sol.signed_libraries()[0], 1);
/// ```
pub fn sorted_signup(instance: &Instance) -> Solution {
    let mut order: Vec<usize> = (0..instance.num_libraries()).collect();
    order.sort_by(|&a, &b| {
        let la = instance.library(a);
        let lb = instance.library(b);
        la.signup_days()
            .cmp(&lb.signup_days())
            .then(lb.total_score().cmp(&la.total_score()))
    });
    rebuild(instance, &order, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Library;

    #[test]
    fn test_order_prefers_cheap_signup_then_rich_catalog() {
        let scores = vec![10, 9, 1];
        let libs = vec![
            Library::new(0, 2, 1, &[2], &scores),     // cheap, poor
            Library::new(1, 2, 1, &[0, 1], &scores),  // cheap, rich
            Library::new(2, 1, 1, &[0], &scores),     // cheapest
        ];
        let instance = Instance::new(20, scores, libs);
        let sol = sorted_signup(&instance);
        assert_eq!(sol.signed_libraries(), &[2, 1, 0]);
    }

    #[test]
    fn test_produces_feasible_solution() {
        let scores = vec![3, 2, 1];
        let libs = vec![
            Library::new(0, 1, 1, &[0, 1], &scores),
            Library::new(1, 1, 1, &[1, 2], &scores),
        ];
        let instance = Instance::new(4, scores, libs);
        let sol = sorted_signup(&instance);
        assert!(sol.fitness_score() <= instance.upper_bound());
        assert_eq!(
            sol.fitness_score(),
            sol.fitness_from_scratch(instance.scores())
        );
    }
}
