//! Greedy construction driven by a priority queue of library efficiencies.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::models::{Instance, Library, Solution};
use crate::schedule::try_sign;

/// Efficiency estimates decay as earlier picks claim books, so the heap is
/// rebuilt against the current scanned set every this many pops.
const REHEAP_INTERVAL: usize = 1000;

struct Candidate {
    efficiency: f64,
    lib_id: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap on efficiency; ties broken toward the lower id.
        self.efficiency
            .total_cmp(&other.efficiency)
            .then(other.lib_id.cmp(&self.lib_id))
    }
}

/// Potential score of a library's best `capacity` still-unscanned books,
/// ignoring any time already elapsed.
fn potential_score(instance: &Instance, library: &Library, scanned: &HashSet<usize>) -> u64 {
    let horizon = instance.num_days() as u64;
    let signup = library.signup_days() as u64;
    if signup >= horizon {
        return 0;
    }
    let capacity = (horizon - signup) * library.books_per_day() as u64;
    let mut total = 0u64;
    let mut taken = 0u64;
    for book in library.books() {
        if taken >= capacity {
            break;
        }
        if !scanned.contains(&book.id) {
            total += book.score as u64;
            taken += 1;
        }
    }
    total
}

fn efficiency(library: &Library, potential: u64) -> f64 {
    if library.signup_days() == 0 {
        f64::INFINITY
    } else {
        potential as f64 / library.signup_days() as f64
    }
}

/// Builds a solution by repeatedly signing the most efficient remaining
/// library, where efficiency is potential score per signup day.
///
/// The heap is seeded with efficiencies computed against an empty scanned
/// set and periodically recomputed against the books claimed so far; any
/// library left unprocessed when the heap drains ends up unsigned.
pub fn greedy_heap(instance: &Instance) -> Solution {
    let empty = HashSet::new();
    let mut heap: BinaryHeap<Candidate> = instance
        .libraries()
        .iter()
        .filter_map(|lib| {
            let potential = potential_score(instance, lib, &empty);
            (potential > 0).then(|| Candidate {
                efficiency: efficiency(lib, potential),
                lib_id: lib.id(),
            })
        })
        .collect();

    let horizon = instance.num_days() as u64;
    let mut elapsed = 0u64;
    let mut scanned: HashSet<usize> = HashSet::new();
    let mut per_library = std::collections::HashMap::new();
    let mut signed = Vec::new();
    let mut used: HashSet<usize> = HashSet::new();
    let mut pops = 0usize;

    while let Some(candidate) = heap.pop() {
        if elapsed >= horizon {
            break;
        }
        if used.contains(&candidate.lib_id) {
            continue;
        }
        pops += 1;

        let library = instance.library(candidate.lib_id);
        if let Some(selection) = try_sign(instance, library, elapsed, &scanned) {
            scanned.extend(selection.iter().copied());
            per_library.insert(candidate.lib_id, selection);
            signed.push(candidate.lib_id);
            elapsed += library.signup_days() as u64;
            used.insert(candidate.lib_id);
        }

        if pops % REHEAP_INTERVAL == 0 && !heap.is_empty() {
            heap = heap
                .into_iter()
                .filter(|c| !used.contains(&c.lib_id))
                .filter_map(|c| {
                    let lib = instance.library(c.lib_id);
                    let potential = potential_score(instance, lib, &scanned);
                    (potential > 0).then(|| Candidate {
                        efficiency: efficiency(lib, potential),
                        lib_id: c.lib_id,
                    })
                })
                .collect();
        }
    }

    let unsigned: Vec<usize> = (0..instance.num_libraries())
        .filter(|id| !used.contains(id))
        .collect();

    let mut solution = Solution::new(signed, unsigned, per_library, scanned);
    solution.recompute_fitness(instance.scores());
    solution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Library;

    #[test]
    fn test_picks_most_efficient_first() {
        let scores = vec![10, 10, 1];
        let libs = vec![
            Library::new(0, 4, 1, &[2], &scores),    // efficiency 0.25
            Library::new(1, 1, 2, &[0, 1], &scores), // efficiency 20
        ];
        let instance = Instance::new(10, scores, libs);
        let sol = greedy_heap(&instance);
        assert_eq!(sol.signed_libraries()[0], 1);
        assert_eq!(sol.books_for(1), &[0, 1]);
    }

    #[test]
    fn test_zero_signup_is_infinitely_efficient() {
        let scores = vec![1, 50];
        let libs = vec![
            Library::new(0, 1, 1, &[1], &scores),
            Library::new(1, 0, 1, &[0], &scores),
        ];
        let instance = Instance::new(4, scores, libs);
        let sol = greedy_heap(&instance);
        assert_eq!(sol.signed_libraries()[0], 1);
    }

    #[test]
    fn test_infeasible_libraries_stay_unsigned() {
        let scores = vec![5];
        let libs = vec![
            Library::new(0, 9, 1, &[0], &scores),
            Library::new(1, 1, 1, &[0], &scores),
        ];
        let instance = Instance::new(5, scores, libs);
        let sol = greedy_heap(&instance);
        assert_eq!(sol.signed_libraries(), &[1]);
        assert_eq!(sol.unsigned_libraries(), &[0]);
    }

    #[test]
    fn test_scan_once_across_libraries() {
        let scores = vec![9, 8, 7];
        let libs = vec![
            Library::new(0, 1, 3, &[0, 1, 2], &scores),
            Library::new(1, 1, 3, &[0, 1, 2], &scores),
        ];
        let instance = Instance::new(8, scores, libs);
        let sol = greedy_heap(&instance);
        let total: usize = sol
            .scanned_books_per_library()
            .values()
            .map(|b| b.len())
            .sum();
        assert_eq!(total, sol.scanned_books().len());
        assert_eq!(sol.fitness_score(), 24);
    }
}
