//! # ashfall-io
//!
//! The validated eruption [`RecordSet`] and its Parquet serialization.
//!
//! A generator's columns enter as [`RawFields`]; [`RecordSet::new`] checks
//! that all ten fields are present with the required element kinds and a
//! common length. Only a `RecordSet` can be written.
//!
//! | Field | Kind |
//! |-------|------|
//! | `group_id`, `vei`, `month`, `day` | int8 |
//! | `year` | int16 |
//! | `latitude`, `longitude`, `total_emission`, `max_injection_height`, `min_injection_height` | float32 |
//!
//! Writers never overwrite an existing file.

mod error;
mod field;
mod metadata;
mod parquet_read;
mod parquet_write;
mod reader;
mod record_set;
mod validate;
mod writer;

pub use error::IoError;
pub use field::{Column, DType, Field};
pub use metadata::{Metadata, PLACEHOLDER};
pub use reader::read_record_set;
pub use record_set::{RawFields, RecordSet};
pub use writer::{
    Compression, WriterConfig, compact_path, linspace_path, write_compact, write_linspace,
    write_record_set,
};
