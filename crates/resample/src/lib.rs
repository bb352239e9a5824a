//! # ashfall-resample
//!
//! Projects sparse eruption times, in decimal years, onto a regular axis
//! (monthly by default) so they can be used as a gridded forcing series.
//!
//! ```text
//! times (sorted, sparse) ──► nearest axis point ──► one time per point ──► ResampleResult
//!                                                                          │
//!                                      values aligned with times ──────────┴──► resample_values
//! ```
//!
//! | Module | Description |
//! |--------|-------------|
//! | `axis` | [`RegularAxis`], the evenly spaced target axis |
//! | `config` | [`ResampleConfig`], year bounds and trimming |
//! | `resample` | [`sparse_to_regular`] |
//! | `result` | [`ResampleResult`], index masks and value spreading |
//! | `error` | [`ResampleError`] |
//!
//! ```
//! use ashfall_resample::{ResampleConfig, sparse_to_regular};
//!
//! let times = [1850.0, 1850.01, 1851.5];
//! let result = sparse_to_regular(&times, &ResampleConfig::new()).unwrap();
//! assert_eq!(result.sparse_mask(), &[0, 2]);
//! let grid = result.resample_values(&[3.0, 1.0, 7.0]).unwrap();
//! assert_eq!(grid[0], 3.0);
//! assert_eq!(grid[18], 7.0);
//! ```

mod axis;
mod config;
mod error;
mod resample;
mod result;

pub use axis::RegularAxis;
pub use config::{MONTHS_PER_YEAR, ResampleConfig};
pub use error::ResampleError;
pub use resample::sparse_to_regular;
pub use result::ResampleResult;
