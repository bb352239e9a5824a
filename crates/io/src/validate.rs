//! Accumulated validation.
//!
//! [`ValidationCollector`] gathers every problem found in a set of raw
//! columns into a single [`IoError::Validation`].

use crate::error::IoError;
use crate::field::{Column, Field};

/// Accumulates validation errors and converts them into a single
/// [`IoError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded,
    /// or `Err(IoError::Validation { count, details })` otherwise.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), IoError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

/// Checks presence, element kind and length of every field.
///
/// Lengths are compared against the first present field in column order.
pub(crate) fn validate_fields(columns: &[(Field, Column)]) -> ValidationCollector {
    let mut c = ValidationCollector::new();

    let expected_len = Field::ALL
        .iter()
        .find_map(|f| lookup(columns, *f).map(Column::len));

    for field in Field::ALL {
        let Some(column) = lookup(columns, field) else {
            c.push(format!("{field}: missing"));
            continue;
        };
        if column.dtype() != field.dtype() {
            c.push(format!(
                "{field}: expected {}, got {}",
                field.dtype(),
                column.dtype()
            ));
        }
        if let Some(n) = expected_len
            && column.len() != n
        {
            c.push(format!("{field}: expected {n} elements, got {}", column.len()));
        }
    }

    for (i, (field, _)) in columns.iter().enumerate() {
        if columns[..i].iter().any(|(f, _)| f == field) {
            c.push(format!("{field}: given more than once"));
        }
    }

    c
}

fn lookup(columns: &[(Field, Column)], field: Field) -> Option<&Column> {
    columns.iter().find(|(f, _)| *f == field).map(|(_, c)| c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(n: usize) -> Vec<(Field, Column)> {
        Field::ALL
            .iter()
            .map(|&f| {
                let col = match f.dtype() {
                    crate::field::DType::Int8 => Column::Int8(vec![1; n]),
                    crate::field::DType::Int16 => Column::Int16(vec![1850; n]),
                    _ => Column::Float32(vec![1.0; n]),
                };
                (f, col)
            })
            .collect()
    }

    #[test]
    fn collector_empty_is_ok() {
        let c = ValidationCollector::new();
        assert_eq!(c.len(), 0);
        assert!(c.finish().is_ok());
    }

    #[test]
    fn collector_joins_messages() {
        let mut c = ValidationCollector::new();
        c.push("error one");
        c.push("error two");
        match c.finish().unwrap_err() {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert_eq!(details, "error one; error two");
            }
            other => panic!("expected IoError::Validation, got {other:?}"),
        }
    }

    #[test]
    fn valid_fields_pass() {
        assert_eq!(validate_fields(&valid(4)).len(), 0);
    }

    #[test]
    fn missing_field_reported() {
        let mut cols = valid(3);
        cols.retain(|(f, _)| *f != Field::Day);
        let c = validate_fields(&cols);
        assert_eq!(c.len(), 1);
        let err = c.finish().unwrap_err();
        assert!(err.to_string().contains("day: missing"));
    }

    #[test]
    fn duplicate_field_reported() {
        let mut cols = valid(2);
        cols.push((Field::Vei, Column::Int8(vec![2, 2])));
        let err = validate_fields(&cols).finish().unwrap_err();
        assert!(err.to_string().contains("vei: given more than once"));
    }
}
