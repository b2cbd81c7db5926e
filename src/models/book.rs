//! Book type: an id paired with its score.

/// A book offered by one or more libraries.
///
/// The id is an index into the instance-wide score table; the score is
/// copied in at load time for sorting convenience inside a library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Book {
    /// Index into the instance score table.
    pub id: usize,
    /// Score awarded the first time this book is scanned.
    pub score: u32,
}

impl Book {
    /// Creates a new book.
    pub fn new(id: usize, score: u32) -> Self {
        Self { id, score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_new() {
        let b = Book::new(3, 40);
        assert_eq!(b.id, 3);
        assert_eq!(b.score, 40);
    }
}
