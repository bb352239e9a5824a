//! Error types for the ashfall-resample crate.

/// Error type for all fallible operations in the ashfall-resample crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResampleError {
    /// Returned when the time series is empty.
    #[error("time series is empty")]
    EmptyInput,

    /// Returned when a time value is NaN or infinite.
    #[error("non-finite time value at index {index}")]
    NonFiniteInput {
        /// Position of the offending value.
        index: usize,
    },

    /// Returned when time values decrease.
    #[error("time series is not sorted: value at index {index} is smaller than its predecessor")]
    Unsorted {
        /// Position of the first out-of-order value.
        index: usize,
    },

    /// Returned when configuration is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when trimming leaves no grid points.
    #[error("empty grid: {points} point(s) between {start_year} and {end_year}, {trim} trimmed")]
    EmptyGrid {
        /// First grid year.
        start_year: i32,
        /// Last grid year.
        end_year: i32,
        /// Points before trimming.
        points: usize,
        /// Points removed from the end.
        trim: usize,
    },

    /// Returned when a value series does not line up with the time series.
    #[error("{field}: expected {expected} elements, got {got}")]
    LengthMismatch {
        /// Name of the mismatched series.
        field: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_non_finite() {
        let e = ResampleError::NonFiniteInput { index: 3 };
        assert_eq!(e.to_string(), "non-finite time value at index 3");
    }

    #[test]
    fn error_empty_grid() {
        let e = ResampleError::EmptyGrid {
            start_year: 1850,
            end_year: 1850,
            points: 1,
            trim: 1,
        };
        assert_eq!(
            e.to_string(),
            "empty grid: 1 point(s) between 1850 and 1850, 1 trimmed"
        );
    }

    #[test]
    fn error_length_mismatch() {
        let e = ResampleError::LengthMismatch {
            field: "values",
            expected: 4,
            got: 3,
        };
        assert_eq!(e.to_string(), "values: expected 4 elements, got 3");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<ResampleError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<ResampleError>();
    }
}
