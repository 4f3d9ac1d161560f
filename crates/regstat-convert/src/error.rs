//! Error types for spreadsheet conversion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop the conversion of one file or folder.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Output folder could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input folder could not be listed.
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Spreadsheet could not be opened or parsed.
    #[error("failed to read workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// Spreadsheet has no worksheet to convert.
    #[error("workbook {path} has no worksheets")]
    NoWorksheet { path: PathBuf },

    /// CSV output could not be written.
    #[error("failed to write {path}: {source}")]
    CsvWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ConvertError {
    /// The file or folder the error is about.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ConvertError::CreateDir { path, .. }
            | ConvertError::ReadDir { path, .. }
            | ConvertError::Workbook { path, .. }
            | ConvertError::NoWorksheet { path }
            | ConvertError::CsvWrite { path, .. } => path,
        }
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
