//! Pulse amplitude distributions.

use std::fmt;

use rand::{Rng, RngCore};
use rand_distr::Exp1;

use crate::error::FppError;

/// Strategy for drawing pulse amplitudes.
///
/// Arrival times never depend on the amplitude model, so any implementation
/// can be swapped into [`FppConfig`](crate::FppConfig) without touching the
/// arrival logic.
pub trait AmplitudeDistribution: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Draws one amplitude.
    fn sample(&self, rng: &mut dyn RngCore) -> f64;

    /// Checks the distribution's parameters.
    fn validate(&self) -> Result<(), FppError> {
        Ok(())
    }
}

/// Lomax (Pareto type II) amplitudes with unit scale.
///
/// Sampled as `exp(E / shape) - 1` with `E ~ Exp(1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lomax {
    shape: f64,
}

impl Lomax {
    /// Default tail shape.
    pub const DEFAULT_SHAPE: f64 = 1.8;

    /// Creates a Lomax distribution with the given tail shape.
    pub fn new(shape: f64) -> Self {
        Self { shape }
    }

    /// Returns the tail shape.
    pub fn shape(&self) -> f64 {
        self.shape
    }
}

impl Default for Lomax {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SHAPE)
    }
}

impl AmplitudeDistribution for Lomax {
    fn name(&self) -> &'static str {
        "lomax"
    }

    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        let e: f64 = rng.sample(Exp1);
        (e / self.shape).exp_m1()
    }

    fn validate(&self) -> Result<(), FppError> {
        if !self.shape.is_finite() || self.shape <= 0.0 {
            return Err(FppError::InvalidConfig {
                reason: format!("lomax shape must be finite and > 0, got {}", self.shape),
            });
        }
        Ok(())
    }
}

/// Exponential amplitudes with the given mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential {
    scale: f64,
}

impl Exponential {
    /// Creates an exponential distribution with mean `scale`.
    pub fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// Returns the mean.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for Exponential {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl AmplitudeDistribution for Exponential {
    fn name(&self) -> &'static str {
        "exponential"
    }

    fn sample(&self, rng: &mut dyn RngCore) -> f64 {
        let e: f64 = rng.sample(Exp1);
        self.scale * e
    }

    fn validate(&self) -> Result<(), FppError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(FppError::InvalidConfig {
                reason: format!(
                    "exponential scale must be finite and > 0, got {}",
                    self.scale
                ),
            });
        }
        Ok(())
    }
}
