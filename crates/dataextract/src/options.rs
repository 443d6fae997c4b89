//! Loader options
//!
//! Options can be built in code or read from a TOML fragment:
//!
//! ```toml
//! delimiter = ";"
//! trim = true
//! comment = "#"
//! ```

use crate::error::{ExtractError, ExtractResult};
use serde::Deserialize;
use std::path::Path;

/// Options for the CSV backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter
    pub delimiter: char,

    /// Strip surrounding whitespace from every cell.
    ///
    /// Off by default: cells are taken literally, so ` _ ` is not a missing value.
    pub trim: bool,

    /// Lines starting with this character are ignored
    pub comment: Option<char>,
}

/// Keys present in a TOML fragment
#[derive(Debug, Deserialize)]
struct OptionsFile {
    delimiter: Option<char>,
    trim: Option<bool>,
    comment: Option<char>,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            trim: false,
            comment: None,
        }
    }
}

impl CsvOptions {
    /// Options for tab-separated files
    pub fn tsv() -> Self {
        Self {
            delimiter: '\t',
            ..Self::default()
        }
    }

    /// Defaults for a table file, picked by its extension
    pub fn for_path(path: &Path) -> Self {
        let is_tsv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
        if is_tsv {
            Self::tsv()
        } else {
            Self::default()
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_comment(mut self, comment: Option<char>) -> Self {
        self.comment = comment;
        self
    }

    /// Parse options from TOML text
    pub fn from_toml_str(content: &str) -> ExtractResult<Self> {
        Self::default().merge_toml_str(content)
    }

    /// Read options from a TOML file
    pub fn from_toml_file(path: &Path) -> ExtractResult<Self> {
        Self::default().merge_toml_file(path)
    }

    /// Override these options with the keys set in TOML text
    pub fn merge_toml_str(self, content: &str) -> ExtractResult<Self> {
        let file: OptionsFile =
            toml::from_str(content).map_err(|e| ExtractError::InvalidConfig(e.to_string()))?;
        let options = Self {
            delimiter: file.delimiter.unwrap_or(self.delimiter),
            trim: file.trim.unwrap_or(self.trim),
            comment: file.comment.or(self.comment),
        };
        options.validate()?;
        Ok(options)
    }

    /// Override these options with the keys set in a TOML file
    pub fn merge_toml_file(self, path: &Path) -> ExtractResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_toml_str(&content)
    }

    /// The csv parser works on single bytes
    pub fn validate(&self) -> ExtractResult<()> {
        if !self.delimiter.is_ascii() {
            return Err(ExtractError::InvalidConfig(format!(
                "delimiter must be an ASCII character, got '{}'",
                self.delimiter
            )));
        }
        if let Some(comment) = self.comment {
            if !comment.is_ascii() {
                return Err(ExtractError::InvalidConfig(format!(
                    "comment marker must be an ASCII character, got '{}'",
                    comment
                )));
            }
            if comment == self.delimiter {
                return Err(ExtractError::InvalidConfig(
                    "comment marker and delimiter must differ".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }

    pub(crate) fn comment_byte(&self) -> Option<u8> {
        self.comment.map(|c| c as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults() {
        let options = CsvOptions::default();
        assert_eq!(options.delimiter, ',');
        assert!(!options.trim);
        assert_eq!(options.comment, None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let options = CsvOptions::from_toml_str("delimiter = \";\"").unwrap();
        assert_eq!(options.delimiter, ';');
        assert!(!options.trim);
    }

    #[test]
    fn test_full_toml() {
        let toml = r##"
delimiter = "|"
trim = true
comment = "#"
"##;
        let options = CsvOptions::from_toml_str(toml).unwrap();
        assert_eq!(
            options,
            CsvOptions::default()
                .with_delimiter('|')
                .with_trim(true)
                .with_comment(Some('#'))
        );
    }

    #[test]
    fn test_defaults_follow_extension() {
        assert_eq!(CsvOptions::for_path(Path::new("a/table.TSV")).delimiter, '\t');
        assert_eq!(CsvOptions::for_path(Path::new("table.csv")).delimiter, ',');
        assert_eq!(CsvOptions::for_path(Path::new("table")).delimiter, ',');
    }

    #[test]
    fn test_merge_keeps_unset_keys() {
        let options = CsvOptions::tsv().merge_toml_str("trim = true").unwrap();
        assert_eq!(options, CsvOptions::tsv().with_trim(true));

        let options = CsvOptions::tsv().merge_toml_str("delimiter = \"|\"").unwrap();
        assert_eq!(options.delimiter, '|');
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let err = CsvOptions::from_toml_str("delimiter = \"§\"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = CsvOptions::from_toml_str("delimiter = ").unwrap_err();
        assert!(matches!(err, ExtractError::InvalidConfig(_)));
    }
}
