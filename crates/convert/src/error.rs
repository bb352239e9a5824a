//! Error types for the ashfall-convert crate.

/// Error type for all fallible operations in the ashfall-convert crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConvertError {
    /// Returned when a severity value cannot be stored as a VEI class.
    #[error("invalid VEI at index {index}: {value} (must be within 0..={max})")]
    InvalidVei {
        /// Position of the offending element.
        index: usize,
        /// The rejected value, formatted.
        value: String,
        /// Largest class the operation accepts.
        max: i8,
    },

    /// Returned when an emission is exactly zero, which has no severity class.
    #[error("zero emission at index {index} has no VEI")]
    ZeroEmission {
        /// Position of the offending element.
        index: usize,
    },

    /// Returned when an emission is negative or not finite.
    #[error("invalid emission at index {index}: {value} (must be finite and > 0)")]
    InvalidEmission {
        /// Position of the offending element.
        index: usize,
        /// The rejected emission.
        value: f32,
    },

    /// Returned when parallel height and emission slices differ in length.
    #[error(
        "length mismatch: min heights {min_len}, max heights {max_len}, emissions {emission_len}"
    )]
    LengthMismatch {
        /// Length of the minimum-height slice.
        min_len: usize,
        /// Length of the maximum-height slice.
        max_len: usize,
        /// Length of the emission slice.
        emission_len: usize,
    },

    /// Returned when an emission law parameter is invalid.
    #[error("invalid emission law: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}
