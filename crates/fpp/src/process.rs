//! Marked Poisson arrivals on a bounded time window.

use ashfall_calendar::YEAR_LIMIT;
use rand::Rng;
use rand_distr::{Distribution, Poisson};
use tracing::{debug, warn};

use crate::config::FppConfig;
use crate::error::FppError;

/// One realization of the forcing process.
///
/// Arrival times are offsets in years from the initial year, sorted
/// ascending. `amplitudes[i]` belongs to `arrival_times[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForcingRealization {
    arrival_times: Vec<f64>,
    amplitudes: Vec<f64>,
    drawn: usize,
}

impl ForcingRealization {
    /// Returns the sorted arrival offsets.
    pub fn arrival_times(&self) -> &[f64] {
        &self.arrival_times
    }

    /// Returns the pulse amplitudes.
    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes
    }

    /// Number of retained pulses.
    pub fn len(&self) -> usize {
        self.arrival_times.len()
    }

    /// Returns `true` if no pulse was retained.
    pub fn is_empty(&self) -> bool {
        self.arrival_times.is_empty()
    }

    /// Number of pulses drawn before year-range truncation.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Number of pulses dropped because they fell past the year limit.
    pub fn truncated(&self) -> usize {
        self.drawn - self.arrival_times.len()
    }

    /// Consumes the realization, returning `(arrival_times, amplitudes)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.arrival_times, self.amplitudes)
    }
}

/// Filtered Poisson process producing eruption arrivals and amplitudes.
///
/// # Example
///
/// ```
/// use ashfall_fpp::{FppConfig, PoissonForcingProcess};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let process = PoissonForcingProcess::new(FppConfig::new().with_max_time(1000.0)).unwrap();
/// let mut rng = StdRng::seed_from_u64(42);
/// let realization = process.realize(1850, &mut rng).unwrap();
/// assert!(realization.arrival_times().windows(2).all(|w| w[0] <= w[1]));
/// ```
#[derive(Debug, Clone)]
pub struct PoissonForcingProcess {
    config: FppConfig,
}

impl PoissonForcingProcess {
    /// Creates a process from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FppError::InvalidConfig`] if the configuration does not
    /// validate or its expected pulse count is out of range for the Poisson
    /// sampler.
    pub fn new(config: FppConfig) -> Result<Self, FppError> {
        config.validate()?;
        pulse_count(config.expected_count())?;
        Ok(Self { config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &FppConfig {
        &self.config
    }

    /// Draws one realization anchored at `init_year`.
    ///
    /// Pulses whose year `init_year + floor(t)` exceeds the four-digit year
    /// limit are dropped and reported with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`FppError::InvalidInitYear`] if `init_year` is outside
    /// `0..=9999`, or [`FppError::EmptyRealization`] if no pulse remains.
    #[tracing::instrument(skip(self, rng), fields(gamma = self.config.gamma(), max_time = self.config.max_time()))]
    pub fn realize(
        &self,
        init_year: i32,
        rng: &mut impl Rng,
    ) -> Result<ForcingRealization, FppError> {
        if !(0..=YEAR_LIMIT).contains(&init_year) {
            return Err(FppError::InvalidInitYear {
                year: init_year,
                limit: YEAR_LIMIT,
            });
        }

        // Only the part of the window before the year limit is sampled. The
        // count past it is drawn separately and reported, never materialized.
        let gamma = self.config.gamma();
        let max_time = self.config.max_time();
        let horizon = f64::from(YEAR_LIMIT - init_year + 1);
        let window = max_time.min(horizon);
        let in_range = pulse_count(gamma * window)?.sample(rng) as usize;
        let beyond = if max_time > horizon {
            pulse_count(gamma * (max_time - horizon))?.sample(rng) as usize
        } else {
            0
        };

        let mut arrival_times: Vec<f64> = (0..in_range)
            .map(|_| rng.random::<f64>() * window)
            .collect();
        arrival_times.sort_by(f64::total_cmp);
        // Rounding can land a draw exactly on the horizon.
        let kept = arrival_times.partition_point(|&t| t < horizon);
        arrival_times.truncate(kept);

        let drawn = beyond.saturating_add(in_range);
        if kept < drawn {
            warn!(
                drawn,
                kept,
                init_year,
                "arrivals past year {YEAR_LIMIT} truncated; fewer events than requested"
            );
        }
        if arrival_times.is_empty() {
            return Err(FppError::EmptyRealization { drawn });
        }

        let amplitude = self.config.amplitude();
        let amplitudes: Vec<f64> = arrival_times
            .iter()
            .map(|_| amplitude.sample(&mut *rng))
            .collect();

        debug!(drawn, kept, amplitude = amplitude.name(), "realization drawn");

        Ok(ForcingRealization {
            arrival_times,
            amplitudes,
            drawn,
        })
    }
}

/// Poisson sampler for a pulse count with mean `lambda`.
fn pulse_count(lambda: f64) -> Result<Poisson<f64>, FppError> {
    Poisson::new(lambda).map_err(|e| FppError::InvalidConfig {
        reason: format!("expected pulse count {lambda} rejected: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn realization_is_sorted_and_paired() {
        let process = PoissonForcingProcess::new(FppConfig::new().with_max_time(2000.0)).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let r = process.realize(1850, &mut rng).unwrap();
        assert_eq!(r.arrival_times().len(), r.amplitudes().len());
        assert!(r.arrival_times().windows(2).all(|w| w[0] <= w[1]));
        assert!(r.arrival_times().iter().all(|&t| (0.0..2000.0).contains(&t)));
        assert_eq!(r.truncated(), 0);
    }

    #[test]
    fn same_seed_same_realization() {
        let process = PoissonForcingProcess::new(FppConfig::new().with_max_time(300.0)).unwrap();
        let a = process.realize(0, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = process.realize(0, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn truncates_past_year_limit() {
        // Window spans 1000 years starting at 9500, so roughly half is dropped.
        let process = PoissonForcingProcess::new(
            FppConfig::new().with_gamma(1.0).with_max_time(1000.0),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let r = process.realize(9500, &mut rng).unwrap();
        assert!(r.truncated() > 0);
        assert_eq!(r.len() + r.truncated(), r.drawn());
        let last = r.arrival_times().last().copied().unwrap();
        assert!(9500 + last.floor() as i32 <= YEAR_LIMIT);
    }

    #[test]
    fn huge_window_is_truncated_without_materializing() {
        let process = PoissonForcingProcess::new(
            FppConfig::new().with_gamma(0.1).with_max_time(1e13),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let r = process.realize(1850, &mut rng).unwrap();
        // Mean count inside the 8150 years left is 815.
        assert!((600..1100).contains(&r.len()));
        assert!(r.drawn() > 1_000_000_000);
        assert_eq!(r.len() + r.truncated(), r.drawn());
        assert!(r.arrival_times().iter().all(|&t| t < 8150.0));
    }

    #[test]
    fn rejects_out_of_range_init_year() {
        let process = PoissonForcingProcess::new(FppConfig::new()).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            process.realize(-1, &mut rng).unwrap_err(),
            FppError::InvalidInitYear {
                year: -1,
                limit: YEAR_LIMIT,
            }
        );
        assert!(process.realize(10_000, &mut rng).is_err());
    }

    #[test]
    fn tiny_window_can_be_empty() {
        let process = PoissonForcingProcess::new(
            FppConfig::new().with_gamma(1e-3).with_max_time(1.0),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let empties = (0..50)
            .filter(|_| {
                matches!(
                    process.realize(1850, &mut rng),
                    Err(FppError::EmptyRealization { .. })
                )
            })
            .count();
        assert!(empties > 40);
    }

    #[test]
    fn new_rejects_invalid_config() {
        assert!(PoissonForcingProcess::new(FppConfig::new().with_gamma(0.0)).is_err());
    }
}
