//! Test fixture loading utilities

use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Write `content` to a temporary file that lives as long as the handle
#[allow(dead_code)]
pub fn write_temp_table(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
