//! Library type with signup cost and scanning throughput.

use super::Book;

/// A library offering a catalog of books.
///
/// The catalog is sorted by descending score once, at construction time,
/// and never re-sorted afterwards: book assignment always takes the current
/// highest-score unscanned books first, so every consumer relies on this
/// ordering invariant.
///
/// # Examples
///
/// ```
/// use u_scanning::models::Library;
///
/// let scores = vec![3, 2, 1];
/// let lib = Library::new(0, 2, 1, &[2, 0, 1], &scores);
/// assert_eq!(lib.signup_days(), 2);
/// // Catalog comes back in descending-score order.
/// let ids: Vec<usize> = lib.books().iter().map(|b| b.id).collect();
/// assert_eq!(ids, vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct Library {
    id: usize,
    signup_days: u32,
    books_per_day: u32,
    books: Vec<Book>,
}

impl Library {
    /// Creates a library from a list of book ids.
    ///
    /// The id is assigned exactly once by the instance loader and stays
    /// fixed for the lifetime of the search. Equal scores tie-break on
    /// ascending book id so the catalog order is deterministic.
    pub fn new(
        id: usize,
        signup_days: u32,
        books_per_day: u32,
        book_ids: &[usize],
        scores: &[u32],
    ) -> Self {
        let mut books: Vec<Book> = book_ids.iter().map(|&b| Book::new(b, scores[b])).collect();
        books.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
        Self {
            id,
            signup_days,
            books_per_day,
            books,
        }
    }

    /// Library id (stable across the whole search).
    pub fn id(&self) -> usize {
        self.id
    }

    /// Days consumed by the signup process before any scanning can start.
    pub fn signup_days(&self) -> u32 {
        self.signup_days
    }

    /// Books scanned per day once the library is active.
    pub fn books_per_day(&self) -> u32 {
        self.books_per_day
    }

    /// Catalog in descending-score order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Number of books in the catalog.
    pub fn num_books(&self) -> usize {
        self.books.len()
    }

    /// Sum of all catalog scores, ignoring contention with other libraries.
    pub fn total_score(&self) -> u64 {
        self.books.iter().map(|b| b.score as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sorted_descending() {
        let scores = vec![5, 20, 1, 20];
        let lib = Library::new(0, 3, 2, &[0, 1, 2, 3], &scores);
        let ids: Vec<usize> = lib.books().iter().map(|b| b.id).collect();
        // Score order 20, 20, 5, 1; ties on ascending id.
        assert_eq!(ids, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_total_score() {
        let scores = vec![5, 20, 1];
        let lib = Library::new(1, 3, 2, &[0, 2], &scores);
        assert_eq!(lib.total_score(), 6);
        assert_eq!(lib.num_books(), 2);
        assert_eq!(lib.id(), 1);
    }
}
