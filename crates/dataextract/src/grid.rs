//! Untyped text grid and the parser that produces it
//!
//! The parser knows nothing about header rows; schema semantics are imposed
//! by the backend that consumes the grid.

use crate::options::CsvOptions;
use thiserror::Error;

/// One parsed row with the file line it starts on (1-based)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line: u64,
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new(line: u64, cells: Vec<String>) -> Self {
        Self { line, cells }
    }

    /// A row consisting of a single empty cell
    pub fn is_blank(&self) -> bool {
        matches!(self.cells.as_slice(), [only] if only.is_empty())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Rows of raw text cells in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGrid {
    pub rows: Vec<RawRow>,
}

impl RawGrid {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    /// Build a grid from bare rows, numbering lines consecutively from 1
    pub fn from_cells(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows: rows
                .into_iter()
                .enumerate()
                .map(|(i, cells)| RawRow::new(i as u64 + 1, cells))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Failure reported by a grid parser
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GridError {
    pub message: String,
}

/// Turns delimited text into a [`RawGrid`]
pub trait GridParser: Send + Sync {
    fn parse_grid(&self, text: &str) -> Result<RawGrid, GridError>;
}

/// [`GridParser`] backed by the `csv` crate
#[derive(Debug, Clone)]
pub struct CsvGridParser {
    delimiter: u8,
    trim: bool,
    comment: Option<u8>,
}

impl CsvGridParser {
    /// Options are expected to have passed [`CsvOptions::validate`].
    pub fn new(options: &CsvOptions) -> Self {
        Self {
            delimiter: options.delimiter_byte(),
            trim: options.trim,
            comment: options.comment_byte(),
        }
    }
}

impl Default for CsvGridParser {
    fn default() -> Self {
        Self::new(&CsvOptions::default())
    }
}

impl GridParser for CsvGridParser {
    fn parse_grid(&self, text: &str) -> Result<RawGrid, GridError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .comment(self.comment)
            .trim(if self.trim { csv::Trim::All } else { csv::Trim::None })
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        let mut cursor = LineCursor::new(text, self.comment);
        for result in reader.records() {
            let record = result.map_err(|e| GridError {
                message: e.to_string(),
            })?;
            let offset = record.position().map(|p| p.byte() as usize).unwrap_or(0);
            let line = cursor.line_of_record(offset);
            rows.push(RawRow::new(
                line,
                record.iter().map(|cell| cell.to_string()).collect(),
            ));
        }

        Ok(RawGrid::new(rows))
    }
}

/// Tracks file line numbers across records in a single forward pass.
///
/// csv silently skips empty lines and comments, so a record's reported
/// offset may point at the skipped text rather than the record itself.
struct LineCursor<'a> {
    bytes: &'a [u8],
    comment: Option<u8>,
    pos: usize,
    line: u64,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str, comment: Option<u8>) -> Self {
        Self {
            bytes: text.as_bytes(),
            comment,
            pos: 0,
            line: 1,
        }
    }

    /// 1-based line of the first record starting at or after `offset`.
    ///
    /// Offsets must not decrease between calls; only bytes past the previous
    /// record are scanned.
    fn line_of_record(&mut self, offset: usize) -> u64 {
        let bytes = self.bytes;
        let mut start = offset.clamp(self.pos, bytes.len());
        loop {
            match bytes.get(start) {
                Some(b'\n') | Some(b'\r') => start += 1,
                Some(b) if Some(*b) == self.comment => {
                    while start < bytes.len() && bytes[start] != b'\n' {
                        start += 1;
                    }
                }
                _ => break,
            }
        }
        self.line += bytes[self.pos..start].iter().filter(|&&b| b == b'\n').count() as u64;
        self.pos = start;
        self.line
    }
}
