//! Immutable problem instance.

use super::Library;

/// A book scanning instance: scoring table, libraries, and the horizon.
///
/// Read-only after load. The constructor derives a reverse index from book
/// id to the libraries offering it, and the admissible upper bound on
/// fitness (sum of scores of all distinct books appearing in any catalog —
/// a book contributes at most once regardless of assignment).
///
/// # Examples
///
/// ```
/// use u_scanning::models::{Instance, Library};
///
/// let scores = vec![3, 2, 1];
/// let libs = vec![
///     Library::new(0, 1, 2, &[0, 1], &scores),
///     Library::new(1, 1, 1, &[1, 2], &scores),
/// ];
/// let instance = Instance::new(4, scores, libs);
/// assert_eq!(instance.upper_bound(), 6);
/// assert_eq!(instance.libraries_of(1), &[0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    num_days: u32,
    scores: Vec<u32>,
    libraries: Vec<Library>,
    book_libraries: Vec<Vec<usize>>,
    upper_bound: u64,
}

impl Instance {
    /// Builds an instance from loaded libraries.
    ///
    /// Assumes structural validity: every book id referenced by any library
    /// is an index into `scores` (the parser rejects anything else).
    pub fn new(num_days: u32, scores: Vec<u32>, libraries: Vec<Library>) -> Self {
        let mut book_libraries = vec![Vec::new(); scores.len()];
        let mut seen = vec![false; scores.len()];
        let mut upper_bound = 0u64;
        for lib in &libraries {
            for book in lib.books() {
                book_libraries[book.id].push(lib.id());
                if !seen[book.id] {
                    seen[book.id] = true;
                    upper_bound += book.score as u64;
                }
            }
        }
        Self {
            num_days,
            scores,
            libraries,
            book_libraries,
            upper_bound,
        }
    }

    /// Scanning horizon in days.
    pub fn num_days(&self) -> u32 {
        self.num_days
    }

    /// Number of books in the score table.
    pub fn num_books(&self) -> usize {
        self.scores.len()
    }

    /// Number of libraries.
    pub fn num_libraries(&self) -> usize {
        self.libraries.len()
    }

    /// Score lookup table indexed by book id.
    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    /// Score of a single book.
    pub fn score(&self, book_id: usize) -> u32 {
        self.scores[book_id]
    }

    /// All libraries, indexed by id.
    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }

    /// Library by id.
    pub fn library(&self, id: usize) -> &Library {
        &self.libraries[id]
    }

    /// Ids of the libraries offering the given book.
    pub fn libraries_of(&self, book_id: usize) -> &[usize] {
        &self.book_libraries[book_id]
    }

    /// Admissible upper bound on achievable fitness.
    pub fn upper_bound(&self) -> u64 {
        self.upper_bound
    }
}
