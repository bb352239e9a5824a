//! Low-level Parquet column building.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, RecordBatch};
use arrow::datatypes::{Field as ArrowField, Schema};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::error::IoError;
use crate::field::{Column, Field};
use crate::record_set::RecordSet;

/// Fields of the compact sidecar.
pub(crate) const COMPACT_FIELDS: [Field; 4] =
    [Field::Year, Field::Month, Field::Day, Field::TotalEmission];

/// Column names of the resampled series.
pub(crate) const LINSPACE_TIME: &str = "time";
pub(crate) const LINSPACE_VALUE: &str = "total_emission";

/// Builds the Arrow schema for `fields`, in the given order.
pub(crate) fn build_schema(fields: &[Field]) -> Schema {
    Schema::new(
        fields
            .iter()
            .map(|f| ArrowField::new(f.name(), f.dtype().arrow(), false))
            .collect::<Vec<_>>(),
    )
}

/// Converts the selected fields of a record set into an Arrow [`RecordBatch`].
pub(crate) fn record_set_to_batch(
    record_set: &RecordSet,
    fields: &[Field],
) -> Result<RecordBatch, IoError> {
    let schema = Arc::new(build_schema(fields));
    let columns: Vec<ArrayRef> = fields
        .iter()
        .map(|&f| record_set.column(f).into_array())
        .collect();
    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Builds a two-column `time`/`total_emission` batch.
pub(crate) fn linspace_to_batch(time: &[f64], values: &[f64]) -> Result<RecordBatch, IoError> {
    let schema = Arc::new(Schema::new(vec![
        ArrowField::new(LINSPACE_TIME, arrow::datatypes::DataType::Float64, false),
        ArrowField::new(LINSPACE_VALUE, arrow::datatypes::DataType::Float64, false),
    ]));
    let columns = vec![
        Column::Float64(time.to_vec()).into_array(),
        Column::Float64(values.to_vec()).into_array(),
    ];
    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Writes one [`RecordBatch`] to a new Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::AlreadyExists`] if `path` exists, or
/// [`IoError::Parquet`] if file creation, batch writing, or file
/// finalisation fails.
pub(crate) fn write_batch(
    path: &Path,
    batch: &RecordBatch,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => IoError::AlreadyExists {
                path: path.to_path_buf(),
            },
            _ => IoError::Parquet {
                reason: e.to_string(),
            },
        })?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}
