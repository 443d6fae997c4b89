//! dataextract - Lookup tables for interpolation from schema-annotated files
//!
//! A table file declares its schema in two header rows (column names, then
//! column types). One column, selected by payload group name, holds the
//! values to interpolate; the others are coordinates:
//!
//! - **Payload**: dense `(rows, 1)` array of `f64`
//! - **Coordinates**: typed columns keyed by `Group/var` name, bound to a
//!   lookup dimension
//!
//! # Design
//!
//! All formats implement the `DataExtractorBackend` trait and return the
//! same `ExtractedTable`. CSV is the only backend at present.
//!
//! ```no_run
//! use dataextract::load_csv;
//!
//! let table = load_csv("obs_error.csv", "ErrorVariance")?;
//! println!("{} rows", table.num_rows());
//! # Ok::<(), dataextract::ExtractError>(())
//! ```

pub mod backend;
pub mod column;
pub mod csv_backend;
pub mod error;
pub mod grid;
pub mod missing;
pub mod naming;
pub mod options;
pub mod table;

pub use backend::*;
pub use column::{Column, ColumnType};
pub use csv_backend::{load_csv, CsvBackend};
pub use error::*;
pub use grid::{CsvGridParser, GridError, GridParser, RawGrid, RawRow};
pub use missing::{MissingValue, MISSING_FLOAT, MISSING_INT, MISSING_PLACEHOLDER, MISSING_STRING};
pub use options::CsvOptions;
pub use table::{CoordinateSummary, ExtractedTable, TableSummary};
