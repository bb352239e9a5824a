//! The validated record set handed to the writers.

use tracing::debug;

use crate::error::IoError;
use crate::field::{Column, Field};
use crate::metadata::Metadata;
use crate::validate::validate_fields;

/// Unchecked columns, keyed by field, as produced by a generator or a file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFields {
    columns: Vec<(Field, Column)>,
}

impl RawFields {
    /// Creates an empty set of columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column.
    pub fn with(mut self, field: Field, column: impl Into<Column>) -> Self {
        self.insert(field, column);
        self
    }

    /// Adds a column in place.
    pub fn insert(&mut self, field: Field, column: impl Into<Column>) {
        self.columns.push((field, column.into()));
    }

    /// The columns, in insertion order.
    pub fn columns(&self) -> &[(Field, Column)] {
        &self.columns
    }

    fn take(&mut self, field: Field) -> Option<Column> {
        let pos = self.columns.iter().position(|(f, _)| *f == field)?;
        Some(self.columns.swap_remove(pos).1)
    }
}

/// A record set whose ten fields all have the required element kind and a
/// common length.
///
/// The only way to obtain one is [`RecordSet::new`], so every value of this
/// type has passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    group_id: Vec<i8>,
    vei: Vec<i8>,
    year: Vec<i16>,
    month: Vec<i8>,
    day: Vec<i8>,
    latitude: Vec<f32>,
    longitude: Vec<f32>,
    total_emission: Vec<f32>,
    max_injection_height: Vec<f32>,
    min_injection_height: Vec<f32>,
    metadata: Metadata,
}

impl RecordSet {
    /// Validates `raw` and builds a record set.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every field that is missing,
    /// repeated, of the wrong element kind or of a different length.
    pub fn new(mut raw: RawFields, metadata: Metadata) -> Result<Self, IoError> {
        validate_fields(raw.columns()).finish()?;
        let record_set = Self {
            group_id: take_int8(&mut raw, Field::GroupId)?,
            vei: take_int8(&mut raw, Field::Vei)?,
            year: match raw.take(Field::Year) {
                Some(Column::Int16(v)) => v,
                _ => return Err(unreachable_kind(Field::Year)),
            },
            month: take_int8(&mut raw, Field::Month)?,
            day: take_int8(&mut raw, Field::Day)?,
            latitude: take_float32(&mut raw, Field::Latitude)?,
            longitude: take_float32(&mut raw, Field::Longitude)?,
            total_emission: take_float32(&mut raw, Field::TotalEmission)?,
            max_injection_height: take_float32(&mut raw, Field::MaxInjectionHeight)?,
            min_injection_height: take_float32(&mut raw, Field::MinInjectionHeight)?,
            metadata,
        };
        debug!(rows = record_set.len(), "record set validated");
        Ok(record_set)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.year.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.year.is_empty()
    }

    /// Global attributes.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Eruption group ids.
    pub fn group_id(&self) -> &[i8] {
        &self.group_id
    }

    /// VEI classes.
    pub fn vei(&self) -> &[i8] {
        &self.vei
    }

    /// Years.
    pub fn year(&self) -> &[i16] {
        &self.year
    }

    /// Months.
    pub fn month(&self) -> &[i8] {
        &self.month
    }

    /// Days.
    pub fn day(&self) -> &[i8] {
        &self.day
    }

    /// Latitudes.
    pub fn latitude(&self) -> &[f32] {
        &self.latitude
    }

    /// Longitudes.
    pub fn longitude(&self) -> &[f32] {
        &self.longitude
    }

    /// Total emissions.
    pub fn total_emission(&self) -> &[f32] {
        &self.total_emission
    }

    /// Maximum injection heights.
    pub fn max_injection_height(&self) -> &[f32] {
        &self.max_injection_height
    }

    /// Minimum injection heights.
    pub fn min_injection_height(&self) -> &[f32] {
        &self.min_injection_height
    }

    /// Returns the column for `field`.
    pub fn column(&self, field: Field) -> Column {
        match field {
            Field::GroupId => Column::Int8(self.group_id.clone()),
            Field::Vei => Column::Int8(self.vei.clone()),
            Field::Year => Column::Int16(self.year.clone()),
            Field::Month => Column::Int8(self.month.clone()),
            Field::Day => Column::Int8(self.day.clone()),
            Field::Latitude => Column::Float32(self.latitude.clone()),
            Field::Longitude => Column::Float32(self.longitude.clone()),
            Field::TotalEmission => Column::Float32(self.total_emission.clone()),
            Field::MaxInjectionHeight => Column::Float32(self.max_injection_height.clone()),
            Field::MinInjectionHeight => Column::Float32(self.min_injection_height.clone()),
        }
    }
}

fn take_int8(raw: &mut RawFields, field: Field) -> Result<Vec<i8>, IoError> {
    match raw.take(field) {
        Some(Column::Int8(v)) => Ok(v),
        _ => Err(unreachable_kind(field)),
    }
}

fn take_float32(raw: &mut RawFields, field: Field) -> Result<Vec<f32>, IoError> {
    match raw.take(field) {
        Some(Column::Float32(v)) => Ok(v),
        _ => Err(unreachable_kind(field)),
    }
}

// Only reachable if `validate_fields` and `Field::dtype` disagree.
fn unreachable_kind(field: Field) -> IoError {
    IoError::Validation {
        count: 1,
        details: format!("{field}: expected {}", field.dtype()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(n: usize) -> RawFields {
        RawFields::new()
            .with(Field::GroupId, vec![1i8; n])
            .with(Field::Vei, vec![3i8; n])
            .with(Field::Year, vec![1850i16; n])
            .with(Field::Month, vec![1i8; n])
            .with(Field::Day, vec![15i8; n])
            .with(Field::Latitude, vec![0.0f32; n])
            .with(Field::Longitude, vec![1.0f32; n])
            .with(Field::TotalEmission, vec![2.5f32; n])
            .with(Field::MaxInjectionHeight, vec![20.0f32; n])
            .with(Field::MinInjectionHeight, vec![18.0f32; n])
    }

    #[test]
    fn valid_fields_build() {
        let rs = RecordSet::new(raw(3), Metadata::default()).unwrap();
        assert_eq!(rs.len(), 3);
        assert_eq!(rs.year(), &[1850, 1850, 1850]);
        assert_eq!(rs.column(Field::Vei), Column::Int8(vec![3, 3, 3]));
    }

    #[test]
    fn float_year_rejected() {
        let mut fields = raw(2);
        fields.columns.retain(|(f, _)| *f != Field::Year);
        fields.insert(Field::Year, vec![1850.0f32, 1851.0]);
        let err = RecordSet::new(fields, Metadata::default()).unwrap_err();
        match err {
            IoError::Validation { count, details } => {
                assert_eq!(count, 1);
                assert_eq!(details, "year: expected int16, got float32");
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }

    #[test]
    fn length_mismatch_rejected() {
        let mut fields = raw(4);
        fields.columns.retain(|(f, _)| *f != Field::Vei);
        fields.insert(Field::Vei, vec![1i8, 2, 3]);
        let err = RecordSet::new(fields, Metadata::default()).unwrap_err();
        assert!(
            err.to_string()
                .contains("vei: expected 4 elements, got 3")
        );
    }

    #[test]
    fn every_problem_listed() {
        let fields = RawFields::new()
            .with(Field::GroupId, vec![1i32])
            .with(Field::Year, vec![1850i16, 1851]);
        match RecordSet::new(fields, Metadata::default()).unwrap_err() {
            // 8 missing, group_id kind, year length.
            IoError::Validation { count, .. } => assert_eq!(count, 10),
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }
}
