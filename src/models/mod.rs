//! Domain model types for the book scanning problem.
//!
//! Provides the core abstractions: books with scores, libraries with
//! signup costs and scanning throughput, the immutable problem instance,
//! and the mutable solution that the search operates on.

mod book;
mod instance;
mod library;
mod solution;

pub use book::Book;
pub use instance::Instance;
pub use library::Library;
pub use solution::Solution;
