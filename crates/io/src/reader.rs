//! Reading record sets back from Parquet.

use std::path::Path;

use tracing::{debug, info};

use crate::error::IoError;
use crate::metadata::Metadata;
use crate::parquet_read;
use crate::record_set::RecordSet;

/// Reads a record set written by [`write_record_set`](crate::write_record_set).
///
/// The columns pass through [`RecordSet::new`], so a file with a wrongly
/// typed or misaligned field is rejected the same way freshly generated data
/// would be.
///
/// # Errors
///
/// - [`IoError::FileNotFound`] if `path` does not exist.
/// - [`IoError::MissingVariable`] if one of the ten columns is absent.
/// - [`IoError::Validation`] if a column has the wrong element kind or length.
/// - [`IoError::Parquet`] if the file cannot be decoded.
pub fn read_record_set(path: &Path) -> Result<RecordSet, IoError> {
    let contents = parquet_read::read_file(path)?;
    debug!(
        batches = contents.batches.len(),
        keys = contents.metadata.len(),
        "read parquet file"
    );
    let raw = parquet_read::extract_fields(path, &contents.batches)?;
    let record_set = RecordSet::new(raw, Metadata::from_pairs(&contents.metadata))?;
    info!(path = %path.display(), rows = record_set.len(), "read record set");
    Ok(record_set)
}
