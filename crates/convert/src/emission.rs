//! Power-law link between VEI and total emitted mass.

use std::fmt::Display;

use rand::Rng;
use rand_distr::StandardNormal;

use crate::error::ConvertError;

/// Largest VEI class produced by any conversion.
pub const VEI_MAX: i8 = 6;

/// Parameters of the emission law `emission = coefficient * base^(noise + vei)`
/// with `noise ~ N(noise_mean, noise_sd)`.
///
/// # Example
///
/// ```
/// use ashfall_convert::EmissionLaw;
///
/// let law = EmissionLaw::new().with_noise_sd(0.5);
/// assert!(law.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionLaw {
    coefficient: f64,
    base: f64,
    noise_mean: f64,
    noise_sd: f64,
}

impl Default for EmissionLaw {
    fn default() -> Self {
        Self::new()
    }
}

impl EmissionLaw {
    /// Creates the default law.
    ///
    /// Defaults: `coefficient = 0.01`, `base = 3`, `noise_mean = 0.1`,
    /// `noise_sd = 0.3`.
    pub fn new() -> Self {
        Self {
            coefficient: 1e-2,
            base: 3.0,
            noise_mean: 0.1,
            noise_sd: 0.3,
        }
    }

    /// Sets the mean of the exponent noise.
    pub fn with_noise_mean(mut self, mean: f64) -> Self {
        self.noise_mean = mean;
        self
    }

    /// Sets the standard deviation of the exponent noise.
    pub fn with_noise_sd(mut self, sd: f64) -> Self {
        self.noise_sd = sd;
        self
    }

    /// Returns the multiplicative coefficient.
    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    /// Returns the power-law base.
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Returns the mean of the exponent noise.
    pub fn noise_mean(&self) -> f64 {
        self.noise_mean
    }

    /// Returns the standard deviation of the exponent noise.
    pub fn noise_sd(&self) -> f64 {
        self.noise_sd
    }

    /// Validates this law.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::InvalidConfig`] if the noise mean is not finite
    /// or the noise standard deviation is negative or not finite.
    pub fn validate(&self) -> Result<(), ConvertError> {
        if !self.noise_mean.is_finite() {
            return Err(ConvertError::InvalidConfig {
                reason: format!("noise_mean must be finite, got {}", self.noise_mean),
            });
        }
        if !self.noise_sd.is_finite() || self.noise_sd < 0.0 {
            return Err(ConvertError::InvalidConfig {
                reason: format!("noise_sd must be finite and >= 0, got {}", self.noise_sd),
            });
        }
        Ok(())
    }

    /// Draws one total emission per VEI.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::InvalidVei`] for a class outside
    /// `0..=VEI_MAX` and [`ConvertError::InvalidConfig`] if the law does not
    /// validate.
    pub fn vei_to_total_emission(
        &self,
        vei: &[i8],
        rng: &mut impl Rng,
    ) -> Result<Vec<f32>, ConvertError> {
        self.validate()?;
        check_class_range(vei)?;
        Ok(vei
            .iter()
            .map(|&v| {
                let z: f64 = rng.sample(StandardNormal);
                let noise = self.noise_mean + self.noise_sd * z;
                (self.coefficient * self.base.powf(noise + f64::from(v))) as f32
            })
            .collect())
    }

    /// Inverts the law without noise, rounding to the nearest class and
    /// clamping to `0..=VEI_MAX`.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::ZeroEmission`] for an exact zero and
    /// [`ConvertError::InvalidEmission`] for negative or non-finite values.
    pub fn total_emission_to_vei(&self, emission: &[f32]) -> Result<Vec<i8>, ConvertError> {
        let ln_base = self.base.ln();
        emission
            .iter()
            .enumerate()
            .map(|(index, &e)| {
                if e == 0.0 {
                    return Err(ConvertError::ZeroEmission { index });
                }
                if !e.is_finite() || e < 0.0 {
                    return Err(ConvertError::InvalidEmission { index, value: e });
                }
                let class = ((f64::from(e) / self.coefficient).ln() / ln_base - self.noise_mean)
                    .round()
                    .clamp(0.0, f64::from(VEI_MAX));
                Ok(class as i8)
            })
            .collect()
    }
}

/// Draws total emissions with the default [`EmissionLaw`].
///
/// # Errors
///
/// Returns [`ConvertError::InvalidVei`] if any class is outside `0..=VEI_MAX`.
pub fn vei_to_total_emission(vei: &[i8], rng: &mut impl Rng) -> Result<Vec<f32>, ConvertError> {
    EmissionLaw::new().vei_to_total_emission(vei, rng)
}

/// Recovers VEI classes with the default [`EmissionLaw`].
///
/// # Errors
///
/// See [`EmissionLaw::total_emission_to_vei`].
pub fn total_emission_to_vei(emission: &[f32]) -> Result<Vec<i8>, ConvertError> {
    EmissionLaw::new().total_emission_to_vei(emission)
}

/// Narrows wider integer severity values to the 8-bit VEI representation.
///
/// Only integer types convert; floating-point input does not compile.
///
/// # Errors
///
/// Returns [`ConvertError::InvalidVei`] for the first value that is negative
/// or does not fit in an `i8`.
pub fn narrow_vei<T>(values: &[T]) -> Result<Vec<i8>, ConvertError>
where
    T: Copy + Display + TryInto<i8>,
{
    values
        .iter()
        .enumerate()
        .map(|(index, &v)| match TryInto::<i8>::try_into(v) {
            Ok(narrow) if narrow >= 0 => Ok(narrow),
            _ => Err(ConvertError::InvalidVei {
                index,
                value: v.to_string(),
                max: i8::MAX,
            }),
        })
        .collect()
}

fn check_class_range(vei: &[i8]) -> Result<(), ConvertError> {
    match vei.iter().position(|v| !(0..=VEI_MAX).contains(v)) {
        Some(index) => Err(ConvertError::InvalidVei {
            index,
            value: vei[index].to_string(),
            max: VEI_MAX,
        }),
        None => Ok(()),
    }
}
