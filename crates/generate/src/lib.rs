//! # ashfall-generate
//!
//! Synthetic eruption event sequences. A [`Generator`] variant produces
//! dates and a primary magnitude signal; a shared step then fills group ids,
//! coordinates and injection heights.
//!
//! ```mermaid
//! graph LR
//!     RN["RandomNormal"] --> RW["random_walk_dates"]
//!     PP["PointProcess"] --> PD["point_process_dates"]
//!     PD --> FPP["ashfall-fpp"]
//!     SE["SingleEvent"] --> P["Primary: dates + VEI + emission"]
//!     RI["RegularIntervals"] --> P
//!     FR["FromRecord"] --> T["EruptionTable"] --> P
//!     RW --> P
//!     PD --> P
//!     P --> AUX["fill_auxiliary_fields"] --> ES["EventSequence"]
//! ```
//!
//! | Module | Description |
//! |--------|-------------|
//! | `dates` | Random-walk and point-process date policies |
//! | `generator` | [`Generator`], [`GeneratorKind`] and variant parameters |
//! | `sequence` | [`EventSequence`], the ten-column result |
//! | `table` | [`EruptionTable`], typed file-driven records |
//! | `error` | [`GenerateError`] |

mod dates;
mod error;
mod generator;
mod sequence;
mod table;

pub use dates::{EventDates, is_ordered_within_years, point_process_dates, random_walk_dates};
pub use error::GenerateError;
pub use generator::{
    Generator, GeneratorKind, PLACEHOLDER_LATITUDE, PLACEHOLDER_LONGITUDE, PointProcessParams,
    RegularIntervalsParams,
};
pub use sequence::EventSequence;
pub use table::{
    DATES_KEY, EMISSIONS_KEY, EruptionTable, LAT_KEY, LON_KEY, MAX_HEIGHT_KEY, MIN_HEIGHT_KEY,
};
