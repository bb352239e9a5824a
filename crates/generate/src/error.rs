//! Error types for the ashfall-generate crate.

use ashfall_calendar::CalendarError;
use ashfall_convert::ConvertError;
use ashfall_fpp::FppError;

/// Error type for all fallible operations in the ashfall-generate crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerateError {
    /// Returned when a generation parameter is out of range.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a table value cannot be parsed as the field's type.
    #[error("type mismatch in '{field}': cannot parse {value:?}")]
    TypeMismatch {
        /// Table key holding the value.
        field: String,
        /// The unparseable value.
        value: String,
    },

    /// Returned when a required table key is absent.
    #[error("missing key: '{key}'")]
    MissingKey {
        /// The absent key.
        key: String,
    },

    /// Returned when a table section has a different length from `dates`.
    #[error("section '{key}' has {got} entries, expected {expected}")]
    TableLengthMismatch {
        /// Table key of the offending section.
        key: String,
        /// Length of the `dates` section.
        expected: usize,
        /// Length of the offending section.
        got: usize,
    },

    /// Returned when every point-process draw was empty or had colliding dates.
    #[error("degenerate process: no usable realization after {attempts} attempt(s)")]
    DegenerateProcess {
        /// Number of realizations tried.
        attempts: usize,
    },

    /// Returned when no event falls at or below the four-digit year limit.
    #[error("no events fit between year {init_year} and the year limit")]
    NoEventsInRange {
        /// The requested first year.
        init_year: i32,
    },

    /// Wraps an error from the ashfall-convert crate.
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// Wraps an error from the ashfall-fpp crate.
    #[error(transparent)]
    Fpp(#[from] FppError),

    /// Wraps an error from the ashfall-calendar crate.
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}
