//! Validation of input file paths.

use std::path::{Path, PathBuf};

use crate::error::{ColmatchError, Result};

/// Recognized tabular file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabularFormat {
    /// Comma-separated values (`.csv`)
    Csv,
    /// Tab-separated values (`.tsv`)
    Tsv,
}

impl TabularFormat {
    /// Detects the format from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            _ => None,
        }
    }

    pub fn delimiter(self) -> u8 {
        match self {
            Self::Csv => b',',
            Self::Tsv => b'\t',
        }
    }

    /// Canonical extension, with the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => ".csv",
            Self::Tsv => ".tsv",
        }
    }
}

/// An input path that has been resolved to an absolute, existing file with a
/// recognized extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    path: PathBuf,
    format: TabularFormat,
}

impl InputFile {
    /// Resolves `path` against the current directory and validates it.
    pub fn resolve(path: impl AsRef<Path>) -> Result<Self> {
        let given = path.as_ref();
        if given.as_os_str().is_empty() {
            return Err(ColmatchError::path_validation(given, "path is empty"));
        }

        let absolute = std::path::absolute(given)
            .map_err(|e| ColmatchError::path_validation(given, e.to_string()))?;

        let format = TabularFormat::from_path(&absolute).ok_or_else(|| {
            ColmatchError::path_validation(&absolute, "expected a .csv or .tsv file")
        })?;

        if !absolute.is_file() {
            return Err(ColmatchError::path_validation(
                &absolute,
                "file does not exist",
            ));
        }

        Ok(Self {
            path: absolute,
            format,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> TabularFormat {
        self.format
    }

    /// File name without extension.
    pub fn stem(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("table")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            TabularFormat::from_path(Path::new("a/users.csv")),
            Some(TabularFormat::Csv)
        );
        assert_eq!(
            TabularFormat::from_path(Path::new("USERS.TSV")),
            Some(TabularFormat::Tsv)
        );
        assert_eq!(TabularFormat::from_path(Path::new("users.parquet")), None);
        assert_eq!(TabularFormat::from_path(Path::new("users")), None);
    }

    #[test]
    fn test_resolve_existing_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "id\n1").unwrap();

        let input = InputFile::resolve(file.path()).unwrap();
        assert!(input.path().is_absolute());
        assert_eq!(input.format(), TabularFormat::Csv);
        assert!(input.stem().len() > 0);
    }

    #[test]
    fn test_resolve_rejects_wrong_extension() {
        let file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let err = InputFile::resolve(file.path()).unwrap_err();
        assert!(matches!(err, ColmatchError::PathValidation { .. }));
    }

    #[test]
    fn test_resolve_rejects_missing_file() {
        let err = InputFile::resolve("definitely/not/here.csv").unwrap_err();
        match err {
            ColmatchError::PathValidation { path, reason } => {
                assert!(path.is_absolute());
                assert_eq!(reason, "file does not exist");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_resolve_rejects_empty_path() {
        assert!(matches!(
            InputFile::resolve(""),
            Err(ColmatchError::PathValidation { .. })
        ));
    }
}
