//! Backend trait and format dispatch
//!
//! A backend loads one logical table from some storage format. Callers only
//! see [`ExtractedTable`], so new formats can be added without touching
//! interpolation code.

use crate::error::{ExtractError, ExtractResult};
use crate::table::ExtractedTable;
use std::path::Path;

/// Trait for loading lookup tables from various formats
pub trait DataExtractorBackend: Send + Sync {
    /// Load the table whose payload column belongs to `payload_group`
    fn load_data(&self, payload_group: &str) -> ExtractResult<ExtractedTable>;

    /// Get the file path
    fn path(&self) -> &Path;

    /// Get the format name
    fn format_name(&self) -> &'static str;
}

/// A boxed backend for dynamic dispatch
pub type BoxedBackend = Box<dyn DataExtractorBackend>;

/// Open a file and return an appropriate backend
///
/// The format is auto-detected from the file extension.
pub fn open_backend(path: impl AsRef<Path>) -> ExtractResult<BoxedBackend> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => {
            use crate::csv_backend::CsvBackend;
            Ok(Box::new(CsvBackend::new(path)))
        }
        "tsv" => {
            use crate::csv_backend::CsvBackend;
            use crate::options::CsvOptions;
            Ok(Box::new(CsvBackend::with_options(
                path,
                CsvOptions::for_path(path),
            )?))
        }
        _ => Err(ExtractError::UnsupportedFormat(format!(
            "Unknown file extension '{}' for '{}'",
            extension,
            path.display()
        ))),
    }
}

/// List supported file extensions
pub fn supported_extensions() -> Vec<&'static str> {
    vec!["csv", "tsv"]
}
