//! High-level Parquet writer configuration and orchestration.

use std::path::{Path, PathBuf};

use parquet::file::metadata::KeyValue;
use parquet::file::properties::WriterProperties;
use tracing::info;

use crate::error::IoError;
use crate::field::Field;
use crate::parquet_write;
use crate::record_set::RecordSet;

/// Compression algorithm for Parquet output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// No compression.
    None,
    /// Snappy compression (fast, moderate ratio).
    #[default]
    Snappy,
    /// Zstd compression (slower, better ratio).
    Zstd,
}

impl Compression {
    /// Converts to the corresponding `parquet::basic::Compression` variant.
    fn to_parquet(self) -> Result<parquet::basic::Compression, IoError> {
        Ok(match self {
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Zstd => {
                let level =
                    parquet::basic::ZstdLevel::try_new(3).map_err(|e| IoError::Parquet {
                        reason: e.to_string(),
                    })?;
                parquet::basic::Compression::ZSTD(level)
            }
        })
    }
}

/// Configuration for writing Parquet output.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    compression: Compression,
    row_group_size: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            row_group_size: 1_000_000,
        }
    }
}

impl WriterConfig {
    /// Sets the compression algorithm.
    pub fn with_compression(mut self, comp: Compression) -> Self {
        self.compression = comp;
        self
    }

    /// Sets the maximum number of rows per row group.
    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Compression algorithm.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Maximum rows per row group.
    pub fn row_group_size(&self) -> usize {
        self.row_group_size
    }

    /// Validates this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `row_group_size` is zero.
    fn validate(&self) -> Result<(), IoError> {
        if self.row_group_size == 0 {
            return Err(IoError::Validation {
                count: 1,
                details: "row_group_size must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn properties(&self, metadata: Option<Vec<KeyValue>>) -> Result<WriterProperties, IoError> {
        self.validate()?;
        Ok(WriterProperties::builder()
            .set_compression(self.compression.to_parquet()?)
            .set_max_row_group_size(self.row_group_size)
            .set_key_value_metadata(metadata)
            .build())
    }
}

/// Path of the compact sidecar for a record set written to `path`:
/// `<stem>.compact.parquet` in the same directory.
pub fn compact_path(path: &Path) -> PathBuf {
    sibling(path, ".compact.parquet")
}

/// Path of the resampled series derived from `path`:
/// `<stem>-linspace.parquet` in the same directory.
pub fn linspace_path(path: &Path) -> PathBuf {
    sibling(path, "-linspace.parquet")
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}{suffix}"))
}

/// Writes all ten fields of a record set, with its metadata as Parquet
/// key-value metadata.
///
/// # Errors
///
/// Returns [`IoError::AlreadyExists`] if `path` exists,
/// [`IoError::Validation`] if the configuration is invalid, or
/// [`IoError::Parquet`] if conversion or file I/O fails.
pub fn write_record_set(
    path: &Path,
    record_set: &RecordSet,
    config: &WriterConfig,
) -> Result<(), IoError> {
    let metadata = record_set
        .metadata()
        .to_pairs()
        .into_iter()
        .map(|(k, v)| KeyValue::new(k, v))
        .collect();
    let props = config.properties(Some(metadata))?;
    let batch = parquet_write::record_set_to_batch(record_set, &Field::ALL)?;
    parquet_write::write_batch(path, &batch, props)?;
    info!(path = %path.display(), rows = record_set.len(), "wrote record set");
    Ok(())
}

/// Writes `year`, `month`, `day` and `total_emission` of a record set.
///
/// # Errors
///
/// As for [`write_record_set`].
pub fn write_compact(
    path: &Path,
    record_set: &RecordSet,
    config: &WriterConfig,
) -> Result<(), IoError> {
    let props = config.properties(None)?;
    let batch = parquet_write::record_set_to_batch(record_set, &parquet_write::COMPACT_FIELDS)?;
    parquet_write::write_batch(path, &batch, props)?;
    info!(path = %path.display(), "wrote compact sidecar");
    Ok(())
}

/// Writes a regular time series as `time` and `total_emission` columns.
///
/// # Errors
///
/// Returns [`IoError::Validation`] if `time` and `values` differ in length,
/// otherwise as for [`write_record_set`].
pub fn write_linspace(
    path: &Path,
    time: &[f64],
    values: &[f64],
    config: &WriterConfig,
) -> Result<(), IoError> {
    if time.len() != values.len() {
        return Err(IoError::Validation {
            count: 1,
            details: format!(
                "total_emission length {} != time length {}",
                values.len(),
                time.len()
            ),
        });
    }
    let props = config.properties(None)?;
    let batch = parquet_write::linspace_to_batch(time, values)?;
    parquet_write::write_batch(path, &batch, props)?;
    info!(path = %path.display(), points = time.len(), "wrote resampled series");
    Ok(())
}
