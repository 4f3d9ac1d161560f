//! Folder loading: read every fragment, skip failures, concatenate the rest.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::{
    Column, DataFrame, DataType, IntoLazy, LazyFrame, PolarsResult, UnionArgs, concat_lf_diagonal,
};

use crate::error::IngestError;
use crate::source::FragmentSource;

/// A file that was skipped during a load.
#[derive(Debug)]
pub struct LoadWarning {
    pub path: PathBuf,
    pub error: IngestError,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to load {}: {}", self.path.display(), self.error)
    }
}

/// The combined table of one dataset folder.
#[derive(Debug)]
pub struct LoadedTable {
    /// Folder the table was loaded from.
    pub folder: PathBuf,
    /// Union of all parsed fragments, in discovery order.
    pub table: DataFrame,
    /// Files that parsed successfully.
    pub files: Vec<PathBuf>,
    /// Files that were skipped, one entry each.
    pub warnings: Vec<LoadWarning>,
}

impl LoadedTable {
    fn empty(folder: &Path) -> Self {
        Self {
            folder: folder.to_path_buf(),
            table: DataFrame::empty(),
            files: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.table.height()
    }

    pub fn is_empty(&self) -> bool {
        self.table.height() == 0
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Loads every file of `folder` through `source`.
///
/// Never fails: a missing or unreadable folder yields an empty table, and a
/// file that cannot be parsed is skipped with a warning.
pub fn load_folder<S: FragmentSource + ?Sized>(source: &S, folder: &Path) -> LoadedTable {
    let span = tracing::info_span!("load_folder", folder = %folder.display());
    let _guard = span.enter();
    let start = Instant::now();

    let mut loaded = LoadedTable::empty(folder);

    let files = match source.list(folder) {
        Ok(files) => files,
        Err(error) => {
            tracing::warn!(error = %error, "failed to list dataset folder");
            return loaded;
        }
    };
    if files.is_empty() {
        tracing::debug!("no CSV files found");
        return loaded;
    }

    let mut fragments = Vec::with_capacity(files.len());
    for path in files {
        match source.read(&path) {
            Ok(fragment) => {
                tracing::debug!(
                    file = %path.display(),
                    rows = fragment.height(),
                    columns = fragment.width(),
                    "parsed fragment"
                );
                fragments.push(fragment);
                loaded.files.push(path);
            }
            Err(error) => {
                tracing::warn!(file = %path.display(), error = %error, "skipping unreadable file");
                loaded.warnings.push(LoadWarning { path, error });
            }
        }
    }

    loaded.table = combine_fragments(fragments);
    tracing::info!(
        files = loaded.files.len(),
        skipped = loaded.warnings.len(),
        rows = loaded.table.height(),
        columns = loaded.table.width(),
        duration_ms = start.elapsed().as_millis(),
        "dataset loaded"
    );
    loaded
}

/// Concatenates fragments into one table over the union of their columns.
///
/// Columns absent from a fragment are null in its rows. Columns with no
/// values in a fragment take no part in type resolution. Conflicting column
/// types are widened to their common supertype; if Polars cannot reconcile
/// them, every column is read as text instead.
fn combine_fragments(mut fragments: Vec<DataFrame>) -> DataFrame {
    match fragments.len() {
        0 => return DataFrame::empty(),
        1 => return fragments.remove(0),
        _ => {}
    }

    let fragments = fragments
        .iter()
        .map(untype_null_columns)
        .collect::<PolarsResult<Vec<_>>>()
        .unwrap_or(fragments);

    match concat_diagonal(fragments.clone()) {
        Ok(table) => table,
        Err(error) => {
            tracing::warn!(error = %error, "column types disagree across files, reading all columns as text");
            fragments
                .iter()
                .map(stringify_columns)
                .collect::<PolarsResult<Vec<_>>>()
                .and_then(concat_diagonal)
                .unwrap_or_else(|error| {
                    tracing::warn!(error = %error, "failed to combine fragments");
                    DataFrame::empty()
                })
        }
    }
}

fn concat_diagonal(fragments: Vec<DataFrame>) -> PolarsResult<DataFrame> {
    let frames: Vec<LazyFrame> = fragments.into_iter().map(IntoLazy::lazy).collect();
    let args = UnionArgs {
        to_supertypes: true,
        ..Default::default()
    };
    concat_lf_diagonal(frames, args)?.collect()
}

/// Replaces columns holding no values with `Null`-typed columns.
///
/// The CSV reader types an empty column as text, which would otherwise turn
/// the same column in every other fragment into text as well.
fn untype_null_columns(df: &DataFrame) -> PolarsResult<DataFrame> {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| {
            if column.null_count() == column.len() {
                Column::full_null(column.name().clone(), column.len(), &DataType::Null)
            } else {
                column.clone()
            }
        })
        .collect::<Vec<Column>>();
    DataFrame::new(columns)
}

fn stringify_columns(df: &DataFrame) -> PolarsResult<DataFrame> {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| column.cast(&DataType::String))
        .collect::<PolarsResult<Vec<Column>>>()?;
    DataFrame::new(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_combine_fragments_unions_columns() {
        let first = df! {
            "state" => &["Goa", "Goa"],
            "age_0_5" => &[1i64, 2],
        }
        .unwrap();
        let second = df! {
            "state" => &["Kerala"],
            "age_5_17" => &[7i64],
        }
        .unwrap();

        let combined = combine_fragments(vec![first, second]);

        assert_eq!(combined.height(), 3);
        assert_eq!(combined.width(), 3);
        assert_eq!(combined.column("age_0_5").unwrap().null_count(), 1);
        assert_eq!(combined.column("age_5_17").unwrap().null_count(), 2);
    }

    #[test]
    fn test_combine_fragments_keeps_order() {
        let first = df! { "district" => &["A", "B"] }.unwrap();
        let second = df! { "district" => &["C"] }.unwrap();

        let combined = combine_fragments(vec![first, second]);
        let values: Vec<Option<&str>> = combined
            .column("district")
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();

        assert_eq!(values, vec![Some("A"), Some("B"), Some("C")]);
    }

    #[test]
    fn test_combine_fragments_widens_numeric_types() {
        let ints = df! { "age_0_5" => &[1i64] }.unwrap();
        let floats = df! { "age_0_5" => &[2.5f64] }.unwrap();

        let combined = combine_fragments(vec![ints, floats]);

        assert_eq!(combined.column("age_0_5").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_combine_fragments_ignores_empty_text_columns() {
        let header_only = df! {
            "district" => Vec::<String>::new(),
            "age" => Vec::<String>::new(),
        }
        .unwrap();
        let blank_age = df! {
            "district" => &["Kollam"],
            "age" => &[None::<&str>],
        }
        .unwrap();
        let numbers = df! {
            "district" => &["Idukki", "Wayanad"],
            "age" => &[9i64, 10],
        }
        .unwrap();

        let combined = combine_fragments(vec![header_only, blank_age, numbers]);

        assert_eq!(combined.height(), 3);
        assert_eq!(combined.column("age").unwrap().dtype(), &DataType::Int64);
        assert_eq!(combined.column("district").unwrap().dtype(), &DataType::String);
        assert_eq!(combined.column("age").unwrap().null_count(), 1);
    }

    #[test]
    fn test_combine_no_fragments() {
        let combined = combine_fragments(Vec::new());
        assert_eq!(combined.height(), 0);
        assert_eq!(combined.width(), 0);
    }
}
