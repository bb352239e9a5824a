//! Error types for the ashfall-fpp crate.

/// Error type for all fallible operations in the ashfall-fpp crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FppError {
    /// Returned when a process or amplitude parameter is invalid.
    #[error("invalid process configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the first year cannot anchor a four-digit calendar.
    #[error("invalid initial year: {year} (must be 0..={limit})")]
    InvalidInitYear {
        /// The rejected year.
        year: i32,
        /// Largest accepted year.
        limit: i32,
    },

    /// Returned when no arrival survives the draw and year-range truncation.
    #[error("empty realization: {drawn} pulse(s) drawn, none within the year range")]
    EmptyRealization {
        /// Number of pulses drawn before truncation.
        drawn: usize,
    },
}
