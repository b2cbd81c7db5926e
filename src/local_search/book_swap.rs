//! Book-level operator: trade a library's weakest slot for an unclaimed
//! book.

use rand::Rng;

use crate::models::{Instance, Solution};

/// Replaces the last-scanned book of a random signed library with the
/// highest-scoring book that no library has scanned yet, searched across
/// every unsigned library's catalog.
///
/// The replacement deliberately ignores catalog membership of the signed
/// library: it probes what activating the unsigned side could gain without
/// paying that library's signup cost. The solution is patched in place
/// (scanned set and fitness refreshed from the per-library lists) rather
/// than re-walked, since a rebuild would discard the foreign book.
pub fn swap_last_book<R: Rng>(solution: &Solution, instance: &Instance, rng: &mut R) -> Solution {
    let candidates: Vec<usize> = solution
        .signed_libraries()
        .iter()
        .copied()
        .filter(|&lib| !solution.books_for(lib).is_empty())
        .collect();
    if candidates.is_empty() {
        return solution.clone();
    }
    let lib_id = candidates[rng.random_range(0..candidates.len())];

    let scanned = solution.scanned_books();
    let mut best: Option<(u32, usize)> = None;
    for &unsigned_id in solution.unsigned_libraries() {
        for book in instance.library(unsigned_id).books() {
            if scanned.contains(&book.id) {
                continue;
            }
            let better = match best {
                None => true,
                Some((score, id)) => book.score > score || (book.score == score && book.id < id),
            };
            if better {
                best = Some((book.score, book.id));
            }
            // Catalogs are score-descending, so the first unscanned book
            // is the best this catalog offers.
            break;
        }
    }
    let Some((_, replacement)) = best else {
        return solution.clone();
    };

    let mut books = solution.books_for(lib_id).to_vec();
    let last = books.len() - 1;
    books[last] = replacement;

    let mut tweaked = solution.clone();
    tweaked.set_books_for(lib_id, books);
    tweaked.refresh_scanned_set();
    tweaked.recompute_fitness(instance.scores());
    tweaked
}
