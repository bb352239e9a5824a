//! The generated event table.

use ashfall_convert::clamp_to_model_layers;

use crate::dates::is_ordered_within_years;
use crate::error::GenerateError;

/// An ordered sequence of eruption events stored as ten parallel columns.
///
/// Built once per generation run by [`Generator::generate`](crate::Generator::generate).
/// `len()` is the realized event count, which may be lower than
/// [`requested()`](Self::requested) when dates ran past year 9999 and may
/// differ from it for fixed-size or file-driven generators.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSequence {
    pub(crate) group_id: Vec<i8>,
    pub(crate) year: Vec<i16>,
    pub(crate) month: Vec<i8>,
    pub(crate) day: Vec<i8>,
    pub(crate) latitude: Vec<f32>,
    pub(crate) longitude: Vec<f32>,
    pub(crate) vei: Vec<i8>,
    pub(crate) total_emission: Vec<f32>,
    pub(crate) min_injection_height: Vec<f32>,
    pub(crate) max_injection_height: Vec<f32>,
    pub(crate) requested: usize,
}

impl EventSequence {
    /// Number of events.
    pub fn len(&self) -> usize {
        self.year.len()
    }

    /// Returns `true` if there are no events.
    pub fn is_empty(&self) -> bool {
        self.year.is_empty()
    }

    /// Event count asked of the generator.
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Eruption group ids.
    pub fn group_id(&self) -> &[i8] {
        &self.group_id
    }

    /// Years of emission.
    pub fn year(&self) -> &[i16] {
        &self.year
    }

    /// Months of emission.
    pub fn month(&self) -> &[i8] {
        &self.month
    }

    /// Days of emission.
    pub fn day(&self) -> &[i8] {
        &self.day
    }

    /// Latitudes.
    pub fn latitude(&self) -> &[f32] {
        &self.latitude
    }

    /// Longitudes.
    pub fn longitude(&self) -> &[f32] {
        &self.longitude
    }

    /// VEI classes.
    pub fn vei(&self) -> &[i8] {
        &self.vei
    }

    /// Total emissions.
    pub fn total_emission(&self) -> &[f32] {
        &self.total_emission
    }

    /// Minimum injection heights (km).
    pub fn min_injection_height(&self) -> &[f32] {
        &self.min_injection_height
    }

    /// Maximum injection heights (km).
    pub fn max_injection_height(&self) -> &[f32] {
        &self.max_injection_height
    }

    /// Returns `true` if months and days are non-decreasing inside every year.
    pub fn is_ordered_within_years(&self) -> bool {
        is_ordered_within_years(&self.year, &self.month, &self.day)
    }

    /// Confines large eruptions to the model layers, returning how many
    /// events changed. See [`ashfall_convert::clamp_to_model_layers`].
    ///
    /// # Errors
    ///
    /// Propagates [`ashfall_convert::ConvertError`] on a column length mismatch.
    pub fn clamp_to_model_layers(&mut self) -> Result<usize, GenerateError> {
        Ok(clamp_to_model_layers(
            &mut self.min_injection_height,
            &mut self.max_injection_height,
            &self.total_emission,
        )?)
    }
}
