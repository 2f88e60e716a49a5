#![deny(missing_docs)]

//! Constraint-satisfying call rota generation.
//!
//! [`validate`] decides whether a candidate day is admissible given the recent
//! history; [`generator`] draws random candidates until one passes, one day at
//! a time.

/// JSON configuration schema and defaults.
pub mod config;
/// Randomized day and sequence generation.
pub mod generator;
pub mod validate;

pub use config::{ReportOptions, RunConfig};
pub use generator::{
    generate_day, generate_sequence, sample_candidate, DayOutcome, GenerationError,
    SequenceGenerator,
};
pub use validate::{audit_sequence, first_violation, is_valid, SequenceViolation, Violation};
