//! Anytime iterated local search over the signup schedule.
//!
//! - [`IlsConfig`] — Driver tunables with a builder-style API
//! - [`IlsSolver`] — Construct, then perturb/climb/accept until budget
//!   exhaustion
//! - [`SolveReport`] — Best solution plus run statistics

mod config;
mod ils;

pub use config::IlsConfig;
pub use ils::{IlsSolver, SolveReport};
