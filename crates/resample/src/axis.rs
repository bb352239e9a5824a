//! Regular time axis in decimal years.

/// An evenly spaced, immutable time axis.
///
/// Point `i` sits at `start_year + i / steps_per_year`, so whole years are
/// represented exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularAxis {
    start_year: i32,
    steps_per_year: usize,
    values: Vec<f64>,
}

impl RegularAxis {
    /// Builds `len` points from `start_year` with `steps_per_year` points per year.
    pub(crate) fn new(start_year: i32, steps_per_year: usize, len: usize) -> Self {
        let steps = steps_per_year as f64;
        let values = (0..len)
            .map(|i| f64::from(start_year) + i as f64 / steps)
            .collect();
        Self {
            start_year,
            steps_per_year,
            values,
        }
    }

    /// First year on the axis.
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Points per year.
    pub fn steps_per_year(&self) -> usize {
        self.steps_per_year
    }

    /// Spacing between points, in years.
    pub fn period(&self) -> f64 {
        1.0 / self.steps_per_year as f64
    }

    /// Axis values in decimal years.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the axis has no points.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of the point closest to `t`. Ties go to the lower index.
    ///
    /// Returns `None` on an empty axis.
    pub fn nearest(&self, t: f64) -> Option<usize> {
        let last = self.values.len().checked_sub(1)?;
        let upper = self.values.partition_point(|&v| v < t);
        if upper == 0 {
            return Some(0);
        }
        if upper > last {
            return Some(last);
        }
        let below = t - self.values[upper - 1];
        let above = self.values[upper] - t;
        Some(if below <= above { upper - 1 } else { upper })
    }
}
