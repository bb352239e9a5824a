//! Configuration for regular-grid resampling.

use crate::error::ResampleError;

/// Grid points per year for the default monthly grid.
pub const MONTHS_PER_YEAR: usize = 12;

/// Configuration for [`sparse_to_regular`](crate::sparse_to_regular).
///
/// Unset year bounds are derived from the data: the start defaults to the
/// floor of the first time and the end to the floor of the last time plus one.
///
/// # Example
///
/// ```
/// use ashfall_resample::ResampleConfig;
///
/// let config = ResampleConfig::new()
///     .with_start_year(1850)
///     .with_last_month(12);
/// assert_eq!(config.trim(), 1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResampleConfig {
    start_year: Option<i32>,
    end_year: Option<i32>,
    trim: usize,
    steps_per_year: usize,
}

impl ResampleConfig {
    /// Creates a configuration with data-derived bounds, a monthly grid and
    /// one trailing point trimmed.
    pub fn new() -> Self {
        Self {
            start_year: None,
            end_year: None,
            trim: 1,
            steps_per_year: MONTHS_PER_YEAR,
        }
    }

    /// Fixes the first grid year.
    pub fn with_start_year(mut self, year: i32) -> Self {
        self.start_year = Some(year);
        self
    }

    /// Fixes the year the grid runs up to.
    pub fn with_end_year(mut self, year: i32) -> Self {
        self.end_year = Some(year);
        self
    }

    /// Sets how many points are removed from the end of the grid.
    pub fn with_trim(mut self, trim: usize) -> Self {
        self.trim = trim;
        self
    }

    /// Ends a monthly grid on `month` (1-based) of its final year.
    ///
    /// Month 12 trims one point, month 1 trims twelve. Values outside
    /// `1..=12` leave the trim untouched.
    pub fn with_last_month(mut self, month: u8) -> Self {
        if (1..=12).contains(&month) {
            self.trim = 13 - usize::from(month);
        }
        self
    }

    /// Sets the number of grid points per year.
    pub fn with_steps_per_year(mut self, steps: usize) -> Self {
        self.steps_per_year = steps;
        self
    }

    /// First grid year, if fixed.
    pub fn start_year(&self) -> Option<i32> {
        self.start_year
    }

    /// End year, if fixed.
    pub fn end_year(&self) -> Option<i32> {
        self.end_year
    }

    /// Points removed from the end of the grid.
    pub fn trim(&self) -> usize {
        self.trim
    }

    /// Grid points per year.
    pub fn steps_per_year(&self) -> usize {
        self.steps_per_year
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::InvalidConfig`] when the grid has no steps or
    /// both bounds are fixed with the end not after the start.
    pub fn validate(&self) -> Result<(), ResampleError> {
        if self.steps_per_year == 0 {
            return Err(ResampleError::InvalidConfig {
                reason: "steps_per_year must be >= 1".to_string(),
            });
        }
        if let (Some(start), Some(end)) = (self.start_year, self.end_year)
            && end <= start
        {
            return Err(ResampleError::InvalidConfig {
                reason: format!("end_year ({end}) must be after start_year ({start})"),
            });
        }
        Ok(())
    }
}

impl Default for ResampleConfig {
    fn default() -> Self {
        Self::new()
    }
}
