//! Error types for dataextract
//!
//! Every failure aborts the whole load; no partial table is ever returned.
//! Messages always name the source file, plus the column or line involved
//! where there is one.

use std::path::PathBuf;
use thiserror::Error;

/// Why payload column selection failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSelectionReason {
    /// No column name begins with `G/` or ends with `@G`
    NotFound,
    /// More than one column matched; holds the matching names
    Ambiguous(Vec<String>),
}

impl std::fmt::Display for PayloadSelectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadSelectionReason::NotFound => write!(f, "no payload column found"),
            PayloadSelectionReason::Ambiguous(names) => {
                write!(f, "multiple payload candidates found: {}", names.join(", "))
            }
        }
    }
}

/// Main error type for extraction
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The file could not be read
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The delimited-text parser rejected the file
    #[error("Failed to parse '{}': {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// The file does not have the expected overall shape
    #[error("{message} in file '{}'", .path.display())]
    Structural { path: PathBuf, message: String },

    /// A data row has the wrong number of cells
    #[error(
        "The number of columns in line {line} ({actual}) differs from that in line 1 ({expected}) in file '{}'",
        .path.display()
    )]
    RowLength {
        path: PathBuf,
        line: u64,
        expected: usize,
        actual: usize,
    },

    /// The header rows declare an invalid schema
    #[error("Invalid schema in file '{}': {message}", .path.display())]
    Schema { path: PathBuf, message: String },

    /// The payload column could not be identified
    #[error(
        "{reason}: expected exactly one column name beginning with '{group}/' or ending with '@{group}' in file '{}'",
        .path.display()
    )]
    PayloadSelection {
        path: PathBuf,
        group: String,
        reason: PayloadSelectionReason,
    },

    /// Parsing succeeded but produced no payload values
    #[error("No data could be loaded from the file '{}'", .path.display())]
    EmptyResult { path: PathBuf },

    /// A cell could not be converted to its column's declared type
    #[error(
        "Cannot convert '{value}' to {expected} in column '{column}', line {line} of file '{}'",
        .path.display()
    )]
    Conversion {
        path: PathBuf,
        column: String,
        line: u64,
        value: String,
        expected: &'static str,
    },

    /// No backend handles this file extension
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Loader options are invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification callers can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The file exists but its content is malformed
    Malformed,
    /// No (or no unique) payload column for the requested group
    NoPayload,
    /// The file parsed but contained no data rows
    Empty,
    /// The file could not be read
    Io,
    /// Caller-supplied options or file format are not usable
    Config,
}

impl ExtractError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::Io { .. } => ErrorKind::Io,
            ExtractError::Parse { .. }
            | ExtractError::RowLength { .. }
            | ExtractError::Schema { .. }
            | ExtractError::Conversion { .. } => ErrorKind::Malformed,
            // Too few rows means there was nothing to load.
            ExtractError::Structural { .. } | ExtractError::EmptyResult { .. } => ErrorKind::Empty,
            ExtractError::PayloadSelection { .. } => ErrorKind::NoPayload,
            ExtractError::UnsupportedFormat(_) | ExtractError::InvalidConfig(_) => ErrorKind::Config,
        }
    }
}

/// Result type alias for extraction
pub type ExtractResult<T> = Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_length_display_names_line_and_file() {
        let err = ExtractError::RowLength {
            path: PathBuf::from("table.csv"),
            line: 3,
            expected: 3,
            actual: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("table.csv"));
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_payload_selection_display() {
        let err = ExtractError::PayloadSelection {
            path: PathBuf::from("t.csv"),
            group: "Interp".to_string(),
            reason: PayloadSelectionReason::Ambiguous(vec![
                "value@Interp".to_string(),
                "Interp/other".to_string(),
            ]),
        };
        let msg = err.to_string();
        assert!(msg.contains("multiple payload candidates"));
        assert!(msg.contains("value@Interp, Interp/other"));
        assert!(msg.contains("'Interp/'"));
        assert_eq!(err.kind(), ErrorKind::NoPayload);
    }

    #[test]
    fn test_empty_kinds() {
        let err = ExtractError::EmptyResult {
            path: PathBuf::from("t.csv"),
        };
        assert!(err.to_string().contains("No data could be loaded"));
        assert_eq!(err.kind(), ErrorKind::Empty);
    }
}
