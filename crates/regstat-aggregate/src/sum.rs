//! Column-sum aggregations.

use polars::prelude::{DataFrame, DataType};
use serde::Serialize;

use crate::error::{AggregateError, Result};
use crate::predicate::ColumnPredicate;

/// Total of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub label: String,
    pub total: f64,
}

impl CategoryTotal {
    pub fn new(label: impl Into<String>, total: f64) -> Self {
        Self {
            label: label.into(),
            total,
        }
    }
}

/// Sums each of `columns`, in the order given.
///
/// Every column must exist; otherwise the result is
/// [`AggregateError::MissingColumns`] naming all absent columns and no totals
/// are returned. Null, NaN and non-numeric values contribute zero.
pub fn sum_columns<S: AsRef<str>>(df: &DataFrame, columns: &[S]) -> Result<Vec<CategoryTotal>> {
    require_columns(df, columns.iter().map(AsRef::as_ref))?;
    columns
        .iter()
        .map(|name| {
            let name = name.as_ref();
            Ok(CategoryTotal::new(name, column_total(df, name)?))
        })
        .collect()
}

/// Sums every column whose name satisfies `predicate`, in table order.
///
/// Signals [`AggregateError::NoMatchingColumns`] when nothing matches.
pub fn sum_matching_columns<P>(df: &DataFrame, predicate: &P) -> Result<Vec<CategoryTotal>>
where
    P: ColumnPredicate + ?Sized,
{
    let selected: Vec<String> = df
        .get_column_names()
        .into_iter()
        .filter(|name| predicate.matches(name.as_str()))
        .map(ToString::to_string)
        .collect();

    if selected.is_empty() {
        return Err(AggregateError::NoMatchingColumns {
            predicate: predicate.describe(),
        });
    }
    tracing::debug!(columns = ?selected, "columns matched predicate");

    sum_columns(df, selected.as_slice())
}

/// Checks that every name is a column of `df`.
///
/// Signals [`AggregateError::MissingColumns`] listing all absent names.
pub fn require_columns<'a>(
    df: &DataFrame,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    let missing: Vec<String> = names
        .into_iter()
        .filter(|name| df.get_column_index(name).is_none())
        .map(ToString::to_string)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AggregateError::MissingColumns { columns: missing })
    }
}

fn column_total(df: &DataFrame, name: &str) -> Result<f64> {
    // Non-strict cast: unparseable values become null. NaN counts as missing.
    let values = df.column(name)?.cast(&DataType::Float64)?;
    Ok(values
        .f64()?
        .into_iter()
        .flatten()
        .filter(|value| !value.is_nan())
        .sum())
}
