//! Conditions the aggregation views signal to their caller.

use thiserror::Error;

/// Why a view cannot be computed.
///
/// Callers match on the variant to choose a message; none of these should
/// abort the caller.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// One or more required columns are absent from the table.
    #[error("missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// No column name satisfied the predicate.
    #[error("no columns match {predicate}")]
    NoMatchingColumns { predicate: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for AggregateError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for aggregation operations.
pub type Result<T> = std::result::Result<T, AggregateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_display() {
        let err = AggregateError::MissingColumns {
            columns: vec!["state".to_string(), "district".to_string()],
        };
        assert_eq!(err.to_string(), "missing required columns: state, district");
    }
}
