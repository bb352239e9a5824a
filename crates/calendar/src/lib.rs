//! # ashfall-calendar
//!
//! Date arithmetic for eruption records on the 365-day no-leap calendar.
//!
//! Eruption dates are stored as `(year, month, day)` triples. Point-process
//! arrival times are continuous year offsets, and the resampler works on
//! decimal years. This crate converts between the three.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["Doy (1..=365)"] -->|".month_day()"| B["(month, day)"]
//!     B -->|"Doy::from_month_day()"| A
//!     C["year offset (f64)"] -->|"NoLeapDate::from_year_offset()"| D["NoLeapDate"]
//!     A -->|"NoLeapDate::from_year_doy()"| D
//!     D -->|".decimal_year()"| E["decimal year (f64)"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use ashfall_calendar::{Doy, NoLeapDate};
//!
//! let doy = Doy::from_month_day(3, 15).unwrap();
//! assert_eq!(doy.get(), 74);
//!
//! // Half a year after the start of 1850.
//! let date = NoLeapDate::from_year_offset(1850, 0.5).unwrap();
//! assert_eq!((date.year(), date.month(), date.day()), (1850, 7, 2));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `doy` | Day-of-year newtype and month tables |
//! | `date` | No-leap date with year context and offset conversions |
//! | `error` | Error types |

mod date;
mod doy;
mod error;

pub use date::NoLeapDate;
pub use doy::{DAYS_PER_YEAR, Doy};
pub use error::CalendarError;

/// Largest year representable in the four-digit year field of a forcing file.
pub const YEAR_LIMIT: i32 = 9999;
