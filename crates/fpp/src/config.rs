//! Configuration for the Poisson forcing process.

use std::sync::Arc;

use crate::amplitude::{AmplitudeDistribution, Lomax};
use crate::error::FppError;

/// Configuration for a [`PoissonForcingProcess`](crate::PoissonForcingProcess).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ashfall_fpp::{Exponential, FppConfig};
///
/// let config = FppConfig::new()
///     .with_gamma(0.2)
///     .with_max_time(500.0)
///     .with_amplitude(Arc::new(Exponential::new(1.0)));
/// assert!(config.validate().is_ok());
/// assert_eq!(config.expected_count(), 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct FppConfig {
    gamma: f64,
    max_time: f64,
    amplitude: Arc<dyn AmplitudeDistribution>,
}

impl Default for FppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FppConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `gamma = 0.1`, `max_time = 9999`, Lomax amplitudes with
    /// shape 1.8.
    pub fn new() -> Self {
        Self {
            gamma: 0.1,
            max_time: 9999.0,
            amplitude: Arc::new(Lomax::default()),
        }
    }

    /// Sets the pulse intensity (expected pulses per unit time).
    pub fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Sets the length of the time window.
    pub fn with_max_time(mut self, max_time: f64) -> Self {
        self.max_time = max_time;
        self
    }

    /// Sets the amplitude distribution.
    pub fn with_amplitude(mut self, amplitude: Arc<dyn AmplitudeDistribution>) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Returns the pulse intensity.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Returns the length of the time window.
    pub fn max_time(&self) -> f64 {
        self.max_time
    }

    /// Returns the amplitude distribution.
    pub fn amplitude(&self) -> &dyn AmplitudeDistribution {
        self.amplitude.as_ref()
    }

    /// Mean of the Poisson pulse count, `gamma * max_time`.
    pub fn expected_count(&self) -> f64 {
        self.gamma * self.max_time
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FppError::InvalidConfig`] if `gamma` or `max_time` is not
    /// finite and positive, or the amplitude distribution rejects its
    /// parameters.
    pub fn validate(&self) -> Result<(), FppError> {
        if !self.gamma.is_finite() || self.gamma <= 0.0 {
            return Err(FppError::InvalidConfig {
                reason: format!("gamma must be finite and > 0, got {}", self.gamma),
            });
        }
        if !self.max_time.is_finite() || self.max_time <= 0.0 {
            return Err(FppError::InvalidConfig {
                reason: format!("max_time must be finite and > 0, got {}", self.max_time),
            });
        }
        self.amplitude.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amplitude::Exponential;

    #[test]
    fn defaults() {
        let config = FppConfig::new();
        assert_eq!(config.gamma(), 0.1);
        assert_eq!(config.max_time(), 9999.0);
        assert_eq!(config.amplitude().name(), "lomax");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let config = FppConfig::new()
            .with_gamma(0.5)
            .with_max_time(20.0)
            .with_amplitude(Arc::new(Exponential::default()));
        assert_eq!(config.gamma(), 0.5);
        assert_eq!(config.max_time(), 20.0);
        assert_eq!(config.expected_count(), 10.0);
        assert_eq!(config.amplitude().name(), "exponential");
    }

    #[test]
    fn validate_rejects_bad_gamma() {
        for gamma in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let err = FppConfig::new().with_gamma(gamma).validate().unwrap_err();
            assert!(matches!(err, FppError::InvalidConfig { .. }));
        }
    }

    #[test]
    fn validate_rejects_bad_max_time() {
        assert!(FppConfig::new().with_max_time(0.0).validate().is_err());
        assert!(FppConfig::new().with_max_time(f64::NAN).validate().is_err());
    }

    #[test]
    fn validate_delegates_to_amplitude() {
        let err = FppConfig::new()
            .with_amplitude(Arc::new(Lomax::new(-1.0)))
            .validate()
            .unwrap_err();
        match err {
            FppError::InvalidConfig { reason } => assert!(reason.contains("lomax shape")),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }
}
