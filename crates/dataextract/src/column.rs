//! Declared column types and homogeneous typed columns

use crate::missing::{is_placeholder, MissingValue, MISSING_FLOAT};
use ndarray::{Array1, Array2, Axis};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Column type as declared in the second header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    String,
    /// Kept as opaque text
    Datetime,
}

impl ColumnType {
    /// Canonical tag for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "int",
            ColumnType::Float => "float",
            ColumnType::String => "string",
            ColumnType::Datetime => "datetime",
        }
    }

    /// Check if this is a numeric type (allowed for the payload column)
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type tag that is not one of `int`, `integer`, `float`, `string`, `datetime`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported data type '{0}'")]
pub struct UnknownColumnType(pub String);

impl FromStr for ColumnType {
    type Err = UnknownColumnType;

    /// Tags are case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" | "integer" => Ok(ColumnType::Integer),
            "float" => Ok(ColumnType::Float),
            "string" => Ok(ColumnType::String),
            "datetime" => Ok(ColumnType::Datetime),
            other => Err(UnknownColumnType(other.to_string())),
        }
    }
}

/// A cell whose text does not parse as the column's type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}")]
pub struct CellConversionError {
    pub expected: &'static str,
}

/// A column of data
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int(Vec<i64>),
    Float(Vec<f64>),
    /// Also holds `datetime` columns
    Str(Vec<String>),
}

impl Column {
    /// Create an empty column for a declared type with room for `capacity` values
    pub fn with_capacity(dtype: ColumnType, capacity: usize) -> Self {
        match dtype {
            ColumnType::Integer => Column::Int(Vec::with_capacity(capacity)),
            ColumnType::Float => Column::Float(Vec::with_capacity(capacity)),
            ColumnType::String | ColumnType::Datetime => Column::Str(Vec::with_capacity(capacity)),
        }
    }

    /// Append one raw cell, substituting the type's sentinel for the
    /// missing-value placeholder.
    ///
    /// On failure the column is left unchanged.
    pub fn append(&mut self, cell: &str) -> Result<(), CellConversionError> {
        let missing = is_placeholder(cell);
        match self {
            Column::Int(values) => {
                let value = if missing {
                    i64::missing()
                } else {
                    cell.parse::<i64>()
                        .map_err(|_| CellConversionError { expected: "an integer" })?
                };
                values.push(value);
            }
            Column::Float(values) => {
                let value = if missing {
                    f64::missing()
                } else {
                    cell.parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .ok_or(CellConversionError { expected: "a finite floating-point number" })?
                };
                values.push(value);
            }
            Column::Str(values) => {
                let value = if missing {
                    String::missing()
                } else {
                    cell.to_string()
                };
                values.push(value);
            }
        }
        Ok(())
    }

    /// Copy a numeric column into a dense (len, 1) array.
    ///
    /// Missing integers become [`MISSING_FLOAT`]. Returns `None` for string columns.
    pub fn to_payload_array(&self) -> Option<Array2<f64>> {
        let values: Vec<f64> = match self {
            Column::Int(v) => v
                .iter()
                .map(|x| if x.is_missing() { MISSING_FLOAT } else { *x as f64 })
                .collect(),
            Column::Float(v) => v.clone(),
            Column::Str(_) => return None,
        };
        Some(Array1::from(values).insert_axis(Axis(1)))
    }

    /// Name of the stored element type
    pub fn type_name(&self) -> &'static str {
        match self {
            Column::Int(_) => "int",
            Column::Float(_) => "float",
            Column::Str(_) => "string",
        }
    }

    /// Get the number of elements
    pub fn len(&self) -> usize {
        match self {
            Column::Int(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Str(v) => v.len(),
        }
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_int(&self) -> Option<&[i64]> {
        match self {
            Column::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<&[f64]> {
        match self {
            Column::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str_values(&self) -> Option<&[String]> {
        match self {
            Column::Str(v) => Some(v),
            _ => None,
        }
    }
}
