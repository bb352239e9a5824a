//! Output type for regular-grid resampling.

use crate::axis::RegularAxis;
use crate::error::ResampleError;

/// Pairing between a sparse time series and a regular axis.
///
/// `sparse_mask[k]` indexes the input series and `grid_mask[k]` the axis
/// point it was assigned to. Both masks are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct ResampleResult {
    axis: RegularAxis,
    sparse_mask: Vec<usize>,
    grid_mask: Vec<usize>,
    sparse_len: usize,
    max_offset: f64,
}

impl ResampleResult {
    pub(crate) fn new(
        axis: RegularAxis,
        sparse_mask: Vec<usize>,
        grid_mask: Vec<usize>,
        sparse_len: usize,
        max_offset: f64,
    ) -> Self {
        Self {
            axis,
            sparse_mask,
            grid_mask,
            sparse_len,
            max_offset,
        }
    }

    /// The regular axis.
    pub fn axis(&self) -> &RegularAxis {
        &self.axis
    }

    /// Indices of retained input times.
    pub fn sparse_mask(&self) -> &[usize] {
        &self.sparse_mask
    }

    /// Axis indices the retained times were assigned to.
    pub fn grid_mask(&self) -> &[usize] {
        &self.grid_mask
    }

    /// Number of retained times.
    pub fn len(&self) -> usize {
        self.sparse_mask.len()
    }

    /// Returns `true` if nothing was retained.
    pub fn is_empty(&self) -> bool {
        self.sparse_mask.is_empty()
    }

    /// Largest distance between a retained time and its axis point.
    pub fn max_offset(&self) -> f64 {
        self.max_offset
    }

    /// Returns `true` if every retained time lies within half a period of
    /// its axis point.
    pub fn within_half_period(&self) -> bool {
        self.max_offset <= self.axis.period() / 2.0 + f64::EPSILON * 16.0
    }

    /// Spreads `values`, aligned with the input times, onto the axis.
    ///
    /// Axis points without an assigned time are zero.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::LengthMismatch`] if `values` does not have
    /// one entry per input time.
    pub fn resample_values(&self, values: &[f64]) -> Result<Vec<f64>, ResampleError> {
        if values.len() != self.sparse_len {
            return Err(ResampleError::LengthMismatch {
                field: "values",
                expected: self.sparse_len,
                got: values.len(),
            });
        }
        let mut out = vec![0.0; self.axis.len()];
        for (&s, &g) in self.sparse_mask.iter().zip(&self.grid_mask) {
            out[g] = values[s];
        }
        Ok(out)
    }
}
