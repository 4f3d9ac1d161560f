//! Folder-level conversion run.

use std::path::{Path, PathBuf};

use regstat_model::DashboardConfig;

use crate::error::{ConvertError, Result};
use crate::sheet::{SPREADSHEET_EXTENSIONS, read_first_sheet, write_csv};

/// What to do when one file fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the run and return the error.
    #[default]
    Abort,
    /// Record the failure and continue with the next file.
    Skip,
}

/// Inputs of a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    /// Sub-folders of `input_root` to convert, mirrored under `output_root`.
    pub folders: Vec<String>,
    pub policy: FailurePolicy,
}

impl ConvertConfig {
    /// Uses the dashboard's roots and dataset folder names.
    pub fn from_dashboard(config: &DashboardConfig) -> Self {
        Self {
            input_root: config.input_root.clone(),
            output_root: config.output_root.clone(),
            folders: config.folder_names(),
            policy: FailurePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// One spreadsheet written as CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedFile {
    pub source: PathBuf,
    pub output: PathBuf,
    pub rows: usize,
}

/// One spreadsheet that was skipped under [`FailurePolicy::Skip`].
#[derive(Debug)]
pub struct ConversionFailure {
    pub source: PathBuf,
    pub error: ConvertError,
}

/// Outcome of a conversion run.
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub converted: Vec<ConvertedFile>,
    pub failures: Vec<ConversionFailure>,
}

impl ConversionReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Converts every configured folder.
pub fn convert_folders(config: &ConvertConfig) -> Result<ConversionReport> {
    create_dir(&config.output_root)?;

    let mut report = ConversionReport::default();
    for folder in &config.folders {
        let input_dir = config.input_root.join(folder);
        let output_dir = config.output_root.join(folder);
        let span = tracing::info_span!("convert_folder", folder = %folder);
        let _guard = span.enter();

        create_dir(&output_dir)?;
        for source in list_spreadsheets(&input_dir)? {
            let output = output_path(&source, &output_dir);
            match convert_file(&source, &output) {
                Ok(rows) => {
                    tracing::info!(source = %source.display(), output = %output.display(), rows, "converted");
                    report.converted.push(ConvertedFile {
                        source,
                        output,
                        rows,
                    });
                }
                Err(error) => match config.policy {
                    FailurePolicy::Abort => return Err(error),
                    FailurePolicy::Skip => {
                        tracing::warn!(source = %source.display(), error = %error, "skipping spreadsheet");
                        report.failures.push(ConversionFailure { source, error });
                    }
                },
            }
        }
    }

    tracing::info!(
        converted = report.converted.len(),
        failed = report.failures.len(),
        "conversion finished"
    );
    Ok(report)
}

/// Converts one spreadsheet, returning the number of data rows written.
pub fn convert_file(source: &Path, output: &Path) -> Result<usize> {
    let table = read_first_sheet(source)?;
    write_csv(&table, output)?;
    Ok(table.row_count())
}

/// Spreadsheets directly inside `dir`, sorted by file name.
///
/// A missing folder has no spreadsheets.
pub fn list_spreadsheets(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        tracing::debug!(folder = %dir.display(), "input folder missing");
        return Ok(Vec::new());
    }

    let read_error = |source| ConvertError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && is_spreadsheet(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// `<output_dir>/<source stem>.csv`
fn output_path(source: &Path, output_dir: &Path) -> PathBuf {
    let mut name = source
        .file_stem()
        .unwrap_or(source.as_os_str())
        .to_os_string();
    name.push(".csv");
    output_dir.join(name)
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| ConvertError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
