//! Instance parsing, plan export, and independent validation.
//!
//! - [`parse_instance`] / [`load_instance`] — Instance file parsing
//! - [`ScanPlan`], [`write_solution`], [`save_solution`], [`read_plan`],
//!   [`load_plan`] — Plan serialization
//! - [`validate_plan`] — From-scratch re-scoring of an exported plan

mod export;
mod parser;
mod validator;

pub use export::{load_plan, read_plan, save_solution, write_plan, write_solution, PlanEntry, ScanPlan};
pub use parser::{load_instance, parse_instance, ParseError};
pub use validator::{validate_plan, ValidationReport};
