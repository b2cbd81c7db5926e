//! # u-scanning
//!
//! Anytime optimizer for the book scanning scheduling problem: choose
//! which libraries to sign up, in what order, and which books each one
//! scans before the deadline, maximizing the total score of distinct
//! scanned books.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Book, Library, Instance, Solution)
//! - [`schedule`] — Feasibility rebuilder, the sole mutator of schedule state
//! - [`constructive`] — Construction heuristics and the meta-selector
//! - [`local_search`] — Weighted tweak operators and bounded hill climbing
//! - [`perturbation`] — Diversification strategies for the outer loop
//! - [`solver`] — Adaptive iterated local search driver
//! - [`io`] — Instance parsing, plan export, and independent validation

pub mod constructive;
pub mod io;
pub mod local_search;
pub mod models;
pub mod perturbation;
pub mod schedule;
pub mod solver;
