//! Low-level Parquet reading and column extraction.

use std::collections::BTreeMap;
use std::path::Path;

use arrow::array::{Array, RecordBatch};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::IoError;
use crate::field::{Column, Field};
use crate::record_set::RawFields;

/// Batches and key-value metadata read from one file.
#[derive(Debug)]
pub(crate) struct FileContents {
    pub batches: Vec<RecordBatch>,
    pub metadata: BTreeMap<String, String>,
}

/// Reads all record batches and key-value metadata from a Parquet file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the file does not exist, or
/// [`IoError::Parquet`] if the file cannot be opened or read.
pub(crate) fn read_file(path: &Path) -> Result<FileContents, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = std::fs::File::open(path).map_err(|e| IoError::Parquet {
        reason: e.to_string(),
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let metadata = builder
        .metadata()
        .file_metadata()
        .key_value_metadata()
        .map(|kvs| {
            kvs.iter()
                .filter_map(|kv| kv.value.clone().map(|v| (kv.key.clone(), v)))
                .collect()
        })
        .unwrap_or_default();
    let reader = builder.build()?;

    let batches: Vec<RecordBatch> =
        reader
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| IoError::Parquet {
                reason: e.to_string(),
            })?;

    Ok(FileContents { batches, metadata })
}

/// Extracts the ten record-set fields from `batches` by column name.
///
/// Columns are copied as stored; element kinds are checked later by
/// [`RecordSet::new`](crate::RecordSet::new).
///
/// # Errors
///
/// Returns [`IoError::MissingVariable`] if a field column is absent, or
/// [`IoError::Validation`] if a column has an unsupported element kind.
pub(crate) fn extract_fields(path: &Path, batches: &[RecordBatch]) -> Result<RawFields, IoError> {
    let mut columns: Vec<(Field, Option<Column>)> =
        Field::ALL.iter().map(|&f| (f, None)).collect();

    for batch in batches {
        let schema = batch.schema();
        for (field, acc) in columns.iter_mut() {
            let idx = schema
                .index_of(field.name())
                .map_err(|_| IoError::MissingVariable {
                    name: field.name().to_string(),
                    path: path.to_path_buf(),
                })?;
            let column =
                Column::from_array(batch.column(idx).as_ref()).ok_or_else(|| {
                    IoError::Validation {
                        count: 1,
                        details: format!(
                            "{field}: unsupported element kind {}",
                            batch.column(idx).data_type()
                        ),
                    }
                })?;
            let merged = match acc.take() {
                None => column,
                Some(mut existing) => {
                    let kind = column.dtype();
                    if !existing.extend(column) {
                        return Err(IoError::Validation {
                            count: 1,
                            details: format!(
                                "{field}: element kind changes between batches ({} and {kind})",
                                existing.dtype()
                            ),
                        });
                    }
                    existing
                }
            };
            *acc = Some(merged);
        }
    }

    let mut raw = RawFields::new();
    for (field, column) in columns {
        match column {
            Some(c) => raw.insert(field, c),
            // A file without row groups still carries the schema; represent it as empty.
            None => raw.insert(field, empty_column(field)),
        }
    }
    Ok(raw)
}

fn empty_column(field: Field) -> Column {
    match field.dtype() {
        crate::field::DType::Int8 => Column::Int8(Vec::new()),
        crate::field::DType::Int16 => Column::Int16(Vec::new()),
        crate::field::DType::Int32 => Column::Int32(Vec::new()),
        crate::field::DType::Float32 => Column::Float32(Vec::new()),
        crate::field::DType::Float64 => Column::Float64(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Float32Array, Int8Array};
    use arrow::datatypes::{DataType, Field as ArrowField, Schema};

    use super::*;

    #[test]
    fn missing_column_reported() {
        let schema = Schema::new(vec![ArrowField::new("vei", DataType::Int8, false)]);
        let batch =
            RecordBatch::try_new(Arc::new(schema), vec![Arc::new(Int8Array::from(vec![1i8]))])
                .unwrap();
        match extract_fields(Path::new("x.parquet"), &[batch]).unwrap_err() {
            IoError::MissingVariable { name, .. } => assert_eq!(name, "group_id"),
            other => panic!("expected MissingVariable, got {other:?}"),
        }
    }

    #[test]
    fn batches_are_concatenated() {
        let schema = Arc::new(Schema::new(
            Field::ALL
                .iter()
                .map(|f| ArrowField::new(f.name(), DataType::Float32, false))
                .collect::<Vec<_>>(),
        ));
        let make = |v: f32| {
            RecordBatch::try_new(
                schema.clone(),
                Field::ALL
                    .iter()
                    .map(|_| Arc::new(Float32Array::from(vec![v])) as arrow::array::ArrayRef)
                    .collect(),
            )
            .unwrap()
        };
        let raw = extract_fields(Path::new("x.parquet"), &[make(1.0), make(2.0)]).unwrap();
        let (_, year) = raw
            .columns()
            .iter()
            .find(|(f, _)| *f == Field::Year)
            .unwrap();
        assert_eq!(year, &Column::Float32(vec![1.0, 2.0]));
    }

    #[test]
    fn read_missing_file() {
        let err = read_file(Path::new("/nonexistent/file.parquet")).unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }
}
