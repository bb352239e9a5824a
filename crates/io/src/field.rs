//! Field names, element kinds and type-erased columns of a record set.

use std::fmt;
use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int8Array, Int16Array, Int32Array,
};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int8Type, Int16Type, Int32Type};

/// Element kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// 32-bit float.
    Float32,
    /// 64-bit float.
    Float64,
}

impl DType {
    /// Lower-case kind name, e.g. `"int16"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }

    pub(crate) fn arrow(self) -> DataType {
        match self {
            Self::Int8 => DataType::Int8,
            Self::Int16 => DataType::Int16,
            Self::Int32 => DataType::Int32,
            Self::Float32 => DataType::Float32,
            Self::Float64 => DataType::Float64,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The ten fields of an eruption record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Eruption group id.
    GroupId,
    /// Volcanic explosivity index.
    Vei,
    /// Year of emission.
    Year,
    /// Month of emission.
    Month,
    /// Day of emission.
    Day,
    /// Latitude.
    Latitude,
    /// Longitude.
    Longitude,
    /// Total emission.
    TotalEmission,
    /// Maximum injection height.
    MaxInjectionHeight,
    /// Minimum injection height.
    MinInjectionHeight,
}

impl Field {
    /// Every field, in on-disk column order.
    pub const ALL: [Field; 10] = [
        Field::GroupId,
        Field::Vei,
        Field::Year,
        Field::Month,
        Field::Day,
        Field::Latitude,
        Field::Longitude,
        Field::TotalEmission,
        Field::MaxInjectionHeight,
        Field::MinInjectionHeight,
    ];

    /// Column name.
    pub fn name(self) -> &'static str {
        match self {
            Self::GroupId => "group_id",
            Self::Vei => "vei",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
            Self::TotalEmission => "total_emission",
            Self::MaxInjectionHeight => "max_injection_height",
            Self::MinInjectionHeight => "min_injection_height",
        }
    }

    /// Element kind this field must be stored as.
    pub fn dtype(self) -> DType {
        match self {
            Self::GroupId | Self::Vei | Self::Month | Self::Day => DType::Int8,
            Self::Year => DType::Int16,
            Self::Latitude
            | Self::Longitude
            | Self::TotalEmission
            | Self::MaxInjectionHeight
            | Self::MinInjectionHeight => DType::Float32,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A column of unchecked kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Signed 8-bit integers.
    Int8(Vec<i8>),
    /// Signed 16-bit integers.
    Int16(Vec<i16>),
    /// Signed 32-bit integers.
    Int32(Vec<i32>),
    /// 32-bit floats.
    Float32(Vec<f32>),
    /// 64-bit floats.
    Float64(Vec<f64>),
}

impl Column {
    /// Element kind.
    pub fn dtype(&self) -> DType {
        match self {
            Self::Int8(_) => DType::Int8,
            Self::Int16(_) => DType::Int16,
            Self::Int32(_) => DType::Int32,
            Self::Float32(_) => DType::Float32,
            Self::Float64(_) => DType::Float64,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Int8(v) => v.len(),
            Self::Int16(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::Float32(v) => v.len(),
            Self::Float64(v) => v.len(),
        }
    }

    /// Returns `true` if the column is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn into_array(self) -> ArrayRef {
        match self {
            Self::Int8(v) => Arc::new(Int8Array::from(v)),
            Self::Int16(v) => Arc::new(Int16Array::from(v)),
            Self::Int32(v) => Arc::new(Int32Array::from(v)),
            Self::Float32(v) => Arc::new(Float32Array::from(v)),
            Self::Float64(v) => Arc::new(Float64Array::from(v)),
        }
    }

    /// Copies an Arrow array into a column. Returns `None` for unsupported
    /// element kinds.
    pub(crate) fn from_array(array: &dyn Array) -> Option<Self> {
        Some(match array.data_type() {
            DataType::Int8 => Self::Int8(array.as_primitive::<Int8Type>().values().to_vec()),
            DataType::Int16 => Self::Int16(array.as_primitive::<Int16Type>().values().to_vec()),
            DataType::Int32 => Self::Int32(array.as_primitive::<Int32Type>().values().to_vec()),
            DataType::Float32 => {
                Self::Float32(array.as_primitive::<Float32Type>().values().to_vec())
            }
            DataType::Float64 => {
                Self::Float64(array.as_primitive::<Float64Type>().values().to_vec())
            }
            _ => return None,
        })
    }

    /// Appends `other` if both columns share an element kind.
    pub(crate) fn extend(&mut self, other: Column) -> bool {
        match (self, other) {
            (Self::Int8(a), Self::Int8(b)) => a.extend(b),
            (Self::Int16(a), Self::Int16(b)) => a.extend(b),
            (Self::Int32(a), Self::Int32(b)) => a.extend(b),
            (Self::Float32(a), Self::Float32(b)) => a.extend(b),
            (Self::Float64(a), Self::Float64(b)) => a.extend(b),
            _ => return false,
        }
        true
    }
}

impl From<Vec<i8>> for Column {
    fn from(v: Vec<i8>) -> Self {
        Self::Int8(v)
    }
}

impl From<Vec<i16>> for Column {
    fn from(v: Vec<i16>) -> Self {
        Self::Int16(v)
    }
}

impl From<Vec<i32>> for Column {
    fn from(v: Vec<i32>) -> Self {
        Self::Int32(v)
    }
}

impl From<Vec<f32>> for Column {
    fn from(v: Vec<f32>) -> Self {
        Self::Float32(v)
    }
}

impl From<Vec<f64>> for Column {
    fn from(v: Vec<f64>) -> Self {
        Self::Float64(v)
    }
}
