//! Grouped counts and distinct values over categorical columns.

use std::collections::{HashMap, HashSet};

use polars::prelude::{AnyValue, Column, DataFrame};
use serde::Serialize;

use regstat_common::{any_to_string, compare_labels, is_numeric_dtype};

use crate::error::Result;
use crate::sum::require_columns;

/// Number of rows sharing one group value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub group: String,
    pub count: usize,
}

impl GroupCount {
    pub fn new(group: impl Into<String>, count: usize) -> Self {
        Self {
            group: group.into(),
            count,
        }
    }
}

/// Keeps rows whose `column` equals `value`.
///
/// Cells are compared in their text form; null cells never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqualsFilter<'a> {
    pub column: &'a str,
    pub value: &'a str,
}

impl<'a> EqualsFilter<'a> {
    pub fn new(column: &'a str, value: &'a str) -> Self {
        Self { column, value }
    }
}

/// Counts rows per distinct value of `group_column`.
///
/// Rows with a null group value are dropped, not counted under an empty
/// label. With a filter, only rows passing it are counted; a filter that
/// matches nothing yields an empty result. Output is sorted ascending by
/// group value, numerically for numeric columns.
pub fn count_by_group(
    df: &DataFrame,
    group_column: &str,
    filter: Option<EqualsFilter<'_>>,
) -> Result<Vec<GroupCount>> {
    let mut required = vec![group_column];
    if let Some(filter) = &filter {
        required.push(filter.column);
    }
    require_columns(df, required)?;

    let groups = df.column(group_column)?;
    let filter_column = match &filter {
        Some(filter) => Some((df.column(filter.column)?, filter.value)),
        None => None,
    };

    let mut counts: HashMap<String, usize> = HashMap::new();
    for idx in 0..df.height() {
        if let Some((column, value)) = filter_column {
            if !cell_equals(column, idx, value)? {
                continue;
            }
        }
        let key = groups.get(idx)?;
        if matches!(key, AnyValue::Null) {
            continue;
        }
        *counts.entry(any_to_string(key)).or_insert(0) += 1;
    }

    let numeric = is_numeric_dtype(groups.dtype());
    let mut result: Vec<GroupCount> = counts
        .into_iter()
        .map(|(group, count)| GroupCount { group, count })
        .collect();
    result.sort_by(|a, b| compare_labels(&a.group, &b.group, numeric));
    Ok(result)
}

/// Sorted, de-duplicated non-null values of `column`.
///
/// Feeds selection controls; ordering matches [`count_by_group`].
pub fn distinct_values(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    require_columns(df, [column])?;
    let values = df.column(column)?;

    let mut seen = HashSet::new();
    for idx in 0..values.len() {
        let value = values.get(idx)?;
        if !matches!(value, AnyValue::Null) {
            seen.insert(any_to_string(value));
        }
    }

    let numeric = is_numeric_dtype(values.dtype());
    let mut distinct: Vec<String> = seen.into_iter().collect();
    distinct.sort_by(|a, b| compare_labels(a, b, numeric));
    Ok(distinct)
}

fn cell_equals(column: &Column, idx: usize, expected: &str) -> Result<bool> {
    Ok(match column.get(idx)? {
        AnyValue::Null => false,
        value => any_to_string(value) == expected,
    })
}
