//! Optional schema descriptors for loaded datasets.
//!
//! A descriptor lists the columns a dataset's views depend on and the kind of
//! values each must hold. Validation collects every violation instead of
//! stopping at the first, so the caller can report them together.

use std::fmt;

use polars::prelude::{DataFrame, DataType};
use serde::{Deserialize, Serialize};

use regstat_common::is_numeric_dtype;
use regstat_model::Dataset;

/// Kind of values a column must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Integer or floating-point values.
    Numeric,
    /// String values.
    Text,
    /// Presence only.
    Any,
}

impl ColumnKind {
    /// Whether a column of `dtype` satisfies this kind.
    ///
    /// All-null columns satisfy every kind; they appear when a column exists
    /// in some source files only.
    pub fn accepts(&self, dtype: &DataType) -> bool {
        if matches!(dtype, DataType::Null) {
            return true;
        }
        match self {
            ColumnKind::Numeric => is_numeric_dtype(dtype),
            ColumnKind::Text => matches!(dtype, DataType::String),
            ColumnKind::Any => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
            ColumnKind::Any => "any",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One required column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

/// A single way a table fails its descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    MissingColumn {
        column: String,
    },
    WrongType {
        column: String,
        expected: ColumnKind,
        found: String,
    },
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaViolation::MissingColumn { column } => write!(f, "missing column '{column}'"),
            SchemaViolation::WrongType {
                column,
                expected,
                found,
            } => write!(f, "column '{column}' should be {expected}, found {found}"),
        }
    }
}

/// Required columns of a dataset, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSchema {
    pub columns: Vec<ColumnSpec>,
}

impl DatasetSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required column.
    #[must_use]
    pub fn require(mut self, name: impl Into<String>, kind: ColumnKind) -> Self {
        self.columns.push(ColumnSpec {
            name: name.into(),
            kind,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Returns every violation of this descriptor by `df`.
    pub fn validate(&self, df: &DataFrame) -> Vec<SchemaViolation> {
        let mut violations = Vec::new();
        for spec in &self.columns {
            match df.column(&spec.name) {
                Ok(column) => {
                    if !spec.kind.accepts(column.dtype()) {
                        violations.push(SchemaViolation::WrongType {
                            column: spec.name.clone(),
                            expected: spec.kind,
                            found: column.dtype().to_string(),
                        });
                    }
                }
                Err(_) => violations.push(SchemaViolation::MissingColumn {
                    column: spec.name.clone(),
                }),
            }
        }
        violations
    }
}

/// The descriptor each dataset's views rely on.
pub fn dataset_schema(dataset: Dataset) -> DatasetSchema {
    let mut schema = DatasetSchema::new();
    for column in dataset.age_columns() {
        schema = schema.require(*column, ColumnKind::Numeric);
    }
    for column in dataset.region_columns() {
        schema = schema.require(*column, ColumnKind::Text);
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_validate_reports_every_violation() {
        let df = df! {
            "age_0_5" => &[1i64, 2],
            "age_5_17" => &["x", "y"],
        }
        .unwrap();

        let violations = dataset_schema(Dataset::Enrolment).validate(&df);

        assert_eq!(
            violations,
            vec![
                SchemaViolation::WrongType {
                    column: "age_5_17".to_string(),
                    expected: ColumnKind::Numeric,
                    found: "str".to_string(),
                },
                SchemaViolation::MissingColumn {
                    column: "age_18_greater".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_validate_passes() {
        let df = df! {
            "state" => &["Goa"],
            "district" => &["North Goa"],
            "bio_age_5_17" => &[3i64],
        }
        .unwrap();

        assert!(dataset_schema(Dataset::Biometric).validate(&df).is_empty());
    }

    #[test]
    fn test_null_column_accepted() {
        assert!(ColumnKind::Numeric.accepts(&DataType::Null));
        assert!(ColumnKind::Text.accepts(&DataType::Null));
        assert!(!ColumnKind::Text.accepts(&DataType::Int64));
    }
}
