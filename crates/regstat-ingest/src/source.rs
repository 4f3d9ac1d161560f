//! Where fragments come from.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;

use crate::csv::read_csv_table;
use crate::discovery::list_csv_files;
use crate::error::Result;

/// Lists and parses the source files of a dataset folder.
///
/// The loader only talks to this trait, so callers can substitute an
/// instrumented or in-memory source.
pub trait FragmentSource: Send + Sync {
    /// Files of `folder` in concatenation order. A missing folder lists as empty.
    fn list(&self, folder: &Path) -> Result<Vec<PathBuf>>;

    /// Parses one file into a fragment.
    fn read(&self, path: &Path) -> Result<DataFrame>;
}

/// Reads `*.csv` files from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvFolderSource;

impl FragmentSource for CsvFolderSource {
    fn list(&self, folder: &Path) -> Result<Vec<PathBuf>> {
        if !folder.is_dir() {
            tracing::debug!(folder = %folder.display(), "dataset folder missing, treating as empty");
            return Ok(Vec::new());
        }
        list_csv_files(folder)
    }

    fn read(&self, path: &Path) -> Result<DataFrame> {
        read_csv_table(path)
    }
}
