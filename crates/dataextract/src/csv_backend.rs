//! CSV backend
//!
//! Expected layout:
//!
//! ```text
//! lat,lon,value@Interp        <- column names
//! float,float,float           <- column types: int/integer, float, string, datetime
//! 10.0,20.0,5.5               <- data, `_` marks a missing value
//! 11.0,21.0,_
//! ```
//!
//! The column whose name ends with `@<group>` or begins with `<group>/` is the
//! payload; every other column becomes a coordinate bound to dimension 0.

use crate::backend::DataExtractorBackend;
use crate::column::{Column, ColumnType};
use crate::error::{ExtractError, ExtractResult};
use crate::grid::{CsvGridParser, GridParser, RawGrid};
use crate::naming::{to_group_path, PayloadGroup};
use crate::options::CsvOptions;
use crate::table::ExtractedTable;
use std::path::{Path, PathBuf};

/// Number of header rows (names, types)
const NUM_HEADER_ROWS: usize = 2;

/// Dimension every CSV coordinate column is bound to
const FIRST_DIM: usize = 0;

/// CSV file backend
pub struct CsvBackend {
    path: PathBuf,
    options: CsvOptions,
    parser: Box<dyn GridParser>,
}

impl CsvBackend {
    /// Backend for a comma-separated file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let options = CsvOptions::default();
        Self {
            path: path.into(),
            parser: Box::new(CsvGridParser::new(&options)),
            options,
        }
    }

    /// Backend with explicit parser options
    pub fn with_options(path: impl Into<PathBuf>, options: CsvOptions) -> ExtractResult<Self> {
        options.validate()?;
        Ok(Self {
            path: path.into(),
            parser: Box::new(CsvGridParser::new(&options)),
            options,
        })
    }

    /// Backend using a custom grid parser
    pub fn with_parser(path: impl Into<PathBuf>, parser: impl GridParser + 'static) -> Self {
        Self {
            path: path.into(),
            options: CsvOptions::default(),
            parser: Box::new(parser),
        }
    }

    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    fn read_grid(&self) -> ExtractResult<RawGrid> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| ExtractError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.parser
            .parse_grid(&text)
            .map_err(|e| ExtractError::Parse {
                path: self.path.clone(),
                message: e.message,
            })
    }

    /// Build a table from an already parsed grid.
    ///
    /// Errors still name this backend's path.
    pub fn extract_from_grid(
        &self,
        grid: RawGrid,
        payload_group: &str,
    ) -> ExtractResult<ExtractedTable> {
        let path = &self.path;
        let schema_error = |message: String| ExtractError::Schema {
            path: path.clone(),
            message,
        };

        // Names, types and at least one row of values.
        if grid.len() <= NUM_HEADER_ROWS {
            return Err(ExtractError::Structural {
                path: path.clone(),
                message: "No data could be loaded".to_string(),
            });
        }
        let num_values = grid.len() - NUM_HEADER_ROWS;
        let (header, data) = grid.rows.split_at(NUM_HEADER_ROWS);

        let raw_names = &header[0].cells;
        let type_tags = &header[1].cells;
        let num_columns = raw_names.len();
        if type_tags.len() != num_columns {
            return Err(schema_error(format!(
                "The number of columns in line 2 ({}) differs from that in line 1 ({})",
                type_tags.len(),
                num_columns
            )));
        }

        let payload_index = PayloadGroup::new(payload_group)
            .find_in(raw_names.as_slice())
            .map_err(|reason| ExtractError::PayloadSelection {
                path: path.clone(),
                group: payload_group.to_string(),
                reason,
            })?;
        tracing::debug!(
            "Payload column for group '{}' is '{}'",
            payload_group,
            raw_names[payload_index]
        );

        // Raw names are no longer needed in messages from here on.
        let names: Vec<String> = raw_names.iter().map(|n| to_group_path(n)).collect();

        let mut columns = Vec::with_capacity(num_columns);
        for (index, (name, tag)) in names.iter().zip(type_tags).enumerate() {
            let dtype: ColumnType = tag
                .parse()
                .map_err(|e| schema_error(format!("{} for column '{}'", e, name)))?;
            if index == payload_index && !dtype.is_numeric() {
                return Err(schema_error(format!(
                    "The payload column '{}' must contain numeric data, not {}",
                    name, dtype
                )));
            }
            columns.push(Column::with_capacity(dtype, num_values));
        }

        for row in data {
            if row.is_blank() {
                tracing::trace!("Skipping blank line {}", row.line);
                continue;
            }
            if row.len() != num_columns {
                return Err(ExtractError::RowLength {
                    path: path.clone(),
                    line: row.line,
                    expected: num_columns,
                    actual: row.len(),
                });
            }
            for ((cell, column), name) in row.cells.iter().zip(columns.iter_mut()).zip(&names) {
                column.append(cell).map_err(|e| ExtractError::Conversion {
                    path: path.clone(),
                    column: name.clone(),
                    line: row.line,
                    value: cell.clone(),
                    expected: e.expected,
                })?;
            }
        }

        let mut table = ExtractedTable {
            dim_to_coords: vec![Vec::new()],
            ..Default::default()
        };
        for (index, (name, column)) in names.into_iter().zip(columns).enumerate() {
            if index == payload_index {
                table.payload = column.to_payload_array().ok_or_else(|| {
                    schema_error(format!("The payload column '{}' must contain numeric data", name))
                })?;
            } else {
                table.add_coordinate(name, FIRST_DIM, column);
            }
        }

        if table.num_rows() == 0 {
            return Err(ExtractError::EmptyResult { path: path.clone() });
        }

        tracing::info!(
            "Loaded {} rows with {} coordinate columns from '{}'",
            table.num_rows(),
            table.coordinate_columns.len(),
            path.display()
        );
        Ok(table)
    }
}

impl DataExtractorBackend for CsvBackend {
    fn load_data(&self, payload_group: &str) -> ExtractResult<ExtractedTable> {
        tracing::debug!(
            "Loading '{}' with payload group '{}'",
            self.path.display(),
            payload_group
        );
        let grid = self.read_grid()?;
        self.extract_from_grid(grid, payload_group)
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn format_name(&self) -> &'static str {
        "CSV"
    }
}

/// Load a comma-separated table with default options
pub fn load_csv(path: impl AsRef<Path>, payload_group: &str) -> ExtractResult<ExtractedTable> {
    CsvBackend::new(path.as_ref()).load_data(payload_group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, PayloadSelectionReason};
    use crate::grid::{GridError, RawRow};
    use crate::missing::{MISSING_FLOAT, MISSING_INT};

    fn grid(rows: &[&[&str]]) -> RawGrid {
        RawGrid::from_cells(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn extract(rows: &[&[&str]], group: &str) -> ExtractResult<ExtractedTable> {
        CsvBackend::new("mem.csv").extract_from_grid(grid(rows), group)
    }

    #[test]
    fn test_payload_and_coordinates() {
        let table = extract(
            &[
                &["station", "count", "value@Interp"],
                &["string", "integer", "int"],
                &["A", "1", "10"],
                &["B", "_", "_"],
            ],
            "Interp",
        )
        .unwrap();

        assert_eq!(table.payload_values().to_vec(), vec![10.0, MISSING_FLOAT]);
        assert_eq!(table.coordinate("count"), Some(&Column::Int(vec![1, MISSING_INT])));
        assert_eq!(table.dim_to_coords, vec![vec!["station", "count"]]);
        assert!(table.coordinate("Interp/value").is_none());
    }

    #[test]
    fn test_payload_only_table_has_one_empty_dimension() {
        let table = extract(&[&["Interp/v"], &["float"], &["1.5"]], "Interp").unwrap();
        assert_eq!(table.num_rows(), 1);
        assert!(table.coordinate_columns.is_empty());
        assert_eq!(table.dim_to_coords, vec![Vec::<String>::new()]);
    }

    #[test]
    fn test_unknown_type_fails_before_rows() {
        // The bad row would also fail, but the type tag is checked first.
        let err = extract(&[&["a", "v@G"], &["double", "float"], &["x"]], "G").unwrap_err();
        match err {
            ExtractError::Schema { message, .. } => {
                assert!(message.contains("'double'"));
                assert!(message.contains("column 'a'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_string_payload_rejected() {
        let err = extract(&[&["a", "v@G"], &["int", "datetime"], &["1", "x"]], "G").unwrap_err();
        assert!(matches!(err, ExtractError::Schema { .. }));
        assert!(err.to_string().contains("G/v"));
    }

    #[test]
    fn test_missing_payload_group() {
        let err = extract(&[&["a", "b"], &["int", "int"], &["1", "2"]], "G").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::PayloadSelection {
                reason: PayloadSelectionReason::NotFound,
                ..
            }
        ));
    }

    #[test]
    fn test_only_blank_data_rows_is_empty() {
        let err = extract(&[&["a", "v@G"], &["int", "int"], &[""], &[""]], "G").unwrap_err();
        assert!(matches!(err, ExtractError::EmptyResult { .. }));
        assert_eq!(err.kind(), ErrorKind::Empty);
    }

    #[test]
    fn test_conversion_error_names_column_and_line() {
        let err = extract(
            &[&["a@MetaData", "v@G"], &["int", "float"], &["1", "2"], &["1.5", "3"]],
            "G",
        )
        .unwrap_err();
        match err {
            ExtractError::Conversion {
                column, line, value, ..
            } => {
                assert_eq!(column, "MetaData/a");
                assert_eq!(line, 4);
                assert_eq!(value, "1.5");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    struct FixedParser(RawGrid);

    impl GridParser for FixedParser {
        fn parse_grid(&self, _text: &str) -> Result<RawGrid, GridError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_injected_parser_line_numbers() {
        let parsed = RawGrid::new(vec![
            RawRow::new(1, vec!["a".into(), "v@G".into()]),
            RawRow::new(2, vec!["int".into(), "int".into()]),
            RawRow::new(7, vec!["1".into()]),
        ]);
        let backend = CsvBackend::with_parser("mem.csv", FixedParser(parsed.clone()));
        let err = backend.extract_from_grid(parsed, "G").unwrap_err();
        assert!(matches!(err, ExtractError::RowLength { line: 7, actual: 1, .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_csv("/nonexistent/table.csv", "G").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
