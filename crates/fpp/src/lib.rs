//! # ashfall-fpp
//!
//! A filtered Poisson process (FPP) for eruption forcing: a Poisson number of
//! pulses arrives uniformly on `[0, max_time)`, each carrying an amplitude
//! drawn from a pluggable heavy-tailed distribution.
//!
//! ```text
//!  N ~ Poisson(gamma * max_time)
//!  t_k ~ U(0, max_time), sorted        ──▶ arrival_times
//!  A_k ~ AmplitudeDistribution          ──▶ amplitudes
//!  drop t_k with init_year + floor(t_k) > 9999
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `amplitude` | [`AmplitudeDistribution`] trait, [`Lomax`] and [`Exponential`] |
//! | `config` | [`FppConfig`] builder |
//! | `process` | [`PoissonForcingProcess`] and [`ForcingRealization`] |
//! | `error` | [`FppError`] |

mod amplitude;
mod config;
mod error;
mod process;

pub use amplitude::{AmplitudeDistribution, Exponential, Lomax};
pub use config::FppConfig;
pub use error::FppError;
pub use process::{ForcingRealization, PoissonForcingProcess};
