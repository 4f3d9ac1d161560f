//! Aggregation views over dataset tables.
//!
//! Pure functions from a loaded [`DataFrame`] to a small ordered result for
//! display. Nothing here reads files or renders output.
//!
//! - [`sum_columns`]: totals of a fixed list of columns
//! - [`sum_matching_columns`]: totals of every column a [`ColumnPredicate`] selects
//! - [`count_by_group`]: row counts per group value, optionally filtered
//! - [`distinct_values`]: values for a selection control
//! - [`require_columns`]: column presence check shared by the views
//!
//! A view that the table cannot support returns an [`AggregateError`]
//! variant rather than a partial result.

mod error;
mod group;
mod predicate;
mod sum;

use polars::prelude::DataFrame;

pub use error::{AggregateError, Result};
pub use group::{EqualsFilter, GroupCount, count_by_group, distinct_values};
pub use predicate::{ColumnPredicate, NameContains};
pub use sum::{CategoryTotal, require_columns, sum_columns, sum_matching_columns};

/// Number of records in a table, for metric tiles.
pub fn record_count(df: &DataFrame) -> usize {
    df.height()
}
