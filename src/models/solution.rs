//! Solution representation for the scanning schedule.

use std::collections::{HashMap, HashSet};

/// A candidate scanning schedule.
///
/// `signed_libraries` is ordered — it is the de facto signup schedule.
/// `scanned_books` must always equal the union of the per-library scan
/// lists, with no book id appearing in more than one list (global
/// scan-once invariant). Both are maintained by the feasibility rebuild in
/// [`schedule`](crate::schedule); operators clone a solution, mutate the
/// order or membership, and rebuild, never mutating a solution another
/// component still holds.
///
/// # Examples
///
/// ```
/// use std::collections::{HashMap, HashSet};
/// use u_scanning::models::Solution;
///
/// let mut per_lib = HashMap::new();
/// per_lib.insert(0, vec![1, 2]);
/// let scanned: HashSet<usize> = [1, 2].into_iter().collect();
/// let mut sol = Solution::new(vec![0], vec![1], per_lib, scanned);
/// sol.recompute_fitness(&[5, 3, 2]);
/// assert_eq!(sol.fitness_score(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Solution {
    signed_libraries: Vec<usize>,
    unsigned_libraries: Vec<usize>,
    scanned_books_per_library: HashMap<usize, Vec<usize>>,
    scanned_books: HashSet<usize>,
    fitness_score: u64,
}

impl Solution {
    /// Creates a solution from its parts. Fitness starts at zero; call
    /// [`recompute_fitness`](Self::recompute_fitness) once the parts are
    /// final.
    pub fn new(
        signed_libraries: Vec<usize>,
        unsigned_libraries: Vec<usize>,
        scanned_books_per_library: HashMap<usize, Vec<usize>>,
        scanned_books: HashSet<usize>,
    ) -> Self {
        Self {
            signed_libraries,
            unsigned_libraries,
            scanned_books_per_library,
            scanned_books,
            fitness_score: 0,
        }
    }

    /// The schedule with every library unsigned and nothing scanned.
    pub fn empty(num_libraries: usize) -> Self {
        Self::new(
            Vec::new(),
            (0..num_libraries).collect(),
            HashMap::new(),
            HashSet::new(),
        )
    }

    /// Signed libraries in signup order.
    pub fn signed_libraries(&self) -> &[usize] {
        &self.signed_libraries
    }

    /// Libraries not activated by this schedule.
    pub fn unsigned_libraries(&self) -> &[usize] {
        &self.unsigned_libraries
    }

    /// Books assigned to one library, in scan order.
    ///
    /// Empty for libraries without an assignment.
    pub fn books_for(&self, library_id: usize) -> &[usize] {
        self.scanned_books_per_library
            .get(&library_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The full library-to-books mapping.
    pub fn scanned_books_per_library(&self) -> &HashMap<usize, Vec<usize>> {
        &self.scanned_books_per_library
    }

    /// The set of all scanned book ids.
    pub fn scanned_books(&self) -> &HashSet<usize> {
        &self.scanned_books
    }

    /// Cached total score of all scanned books.
    pub fn fitness_score(&self) -> u64 {
        self.fitness_score
    }

    /// Replaces one library's scan list.
    ///
    /// The caller must keep the global scan-once invariant and follow up
    /// with [`refresh_scanned_set`](Self::refresh_scanned_set) and
    /// [`recompute_fitness`](Self::recompute_fitness).
    pub fn set_books_for(&mut self, library_id: usize, books: Vec<usize>) {
        self.scanned_books_per_library.insert(library_id, books);
    }

    /// Re-derives `scanned_books` as the union of the per-library lists.
    pub fn refresh_scanned_set(&mut self) {
        self.scanned_books = self
            .scanned_books_per_library
            .values()
            .flat_map(|books| books.iter().copied())
            .collect();
    }

    /// Recomputes and caches the fitness from the scanned set.
    pub fn recompute_fitness(&mut self, scores: &[u32]) {
        self.fitness_score = self.scanned_books.iter().map(|&b| scores[b] as u64).sum();
    }

    /// Independent fitness recomputation from the per-library lists,
    /// bypassing both the cached value and the scanned set. Used to verify
    /// that incremental updates have not drifted.
    pub fn fitness_from_scratch(&self, scores: &[u32]) -> u64 {
        let union: HashSet<usize> = self
            .scanned_books_per_library
            .values()
            .flat_map(|books| books.iter().copied())
            .collect();
        union.iter().map(|&b| scores[b] as u64).sum()
    }
}
