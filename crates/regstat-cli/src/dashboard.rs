//! Dataset loading and view evaluation behind the terminal dashboard.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, info_span, warn};

use regstat_aggregate::{
    AggregateError, CategoryTotal, EqualsFilter, GroupCount, NameContains, count_by_group,
    distinct_values, record_count, require_columns, sum_columns, sum_matching_columns,
};
use regstat_ingest::{DatasetCache, LoadedTable, SchemaViolation, dataset_schema};
use regstat_model::{DashboardConfig, Dataset, View, ViewQuery};

/// One metric tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: usize,
}

/// Data behind one rendered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewData {
    Metrics {
        metrics: Vec<Metric>,
    },
    Totals {
        totals: Vec<CategoryTotal>,
    },
    Groups {
        /// Value the rows were filtered on; `None` when there was nothing to choose.
        selection: Option<String>,
        options: Vec<String>,
        counts: Vec<GroupCount>,
    },
    Text {
        bullets: Vec<String>,
    },
}

impl ViewData {
    pub fn selection(&self) -> Option<&str> {
        match self {
            ViewData::Groups { selection, .. } => selection.as_deref(),
            _ => None,
        }
    }

    /// Chart rows as (label, value).
    pub fn points(&self) -> Vec<(String, f64)> {
        match self {
            ViewData::Metrics { metrics } => metrics
                .iter()
                .map(|m| (m.label.clone(), m.value as f64))
                .collect(),
            ViewData::Totals { totals } => totals
                .iter()
                .map(|t| (t.label.clone(), t.total))
                .collect(),
            ViewData::Groups { counts, .. } => counts
                .iter()
                .map(|c| (c.group.clone(), c.count as f64))
                .collect(),
            ViewData::Text { .. } => Vec::new(),
        }
    }
}

/// Datasets of one data root, loaded through a shared cache.
pub struct Dashboard {
    config: DashboardConfig,
    cache: DatasetCache,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            cache: DatasetCache::new(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Table of `dataset`, read from disk on first use.
    pub fn dataset(&self, dataset: Dataset) -> Arc<LoadedTable> {
        self.cache.load(&self.config.dataset_dir(dataset))
    }

    /// Loads every dataset up front, logging skipped files and schema gaps.
    pub fn load_all(&self) -> Vec<(Dataset, Arc<LoadedTable>)> {
        let span = info_span!("load_datasets", root = %self.config.data_root.display());
        let _guard = span.enter();

        Dataset::ALL
            .iter()
            .map(|&dataset| {
                let table = self.dataset(dataset);
                for violation in self.schema_violations(dataset) {
                    warn!(dataset = %dataset, %violation, "dataset does not match its schema");
                }
                info!(
                    dataset = %dataset,
                    rows = table.row_count(),
                    files = table.files.len(),
                    skipped = table.warnings.len(),
                    "dataset ready"
                );
                (dataset, table)
            })
            .collect()
    }

    /// Schema violations of a loaded dataset. Empty tables are not checked.
    pub fn schema_violations(&self, dataset: Dataset) -> Vec<SchemaViolation> {
        let table = self.dataset(dataset);
        if table.is_empty() {
            return Vec::new();
        }
        dataset_schema(dataset).validate(&table.table)
    }

    /// Values offered by the regional state selector.
    pub fn states(&self) -> Result<Vec<String>, AggregateError> {
        let ViewQuery::GroupCount {
            dataset,
            filter_column,
            ..
        } = View::RegionalInsights.query()
        else {
            return Ok(Vec::new());
        };
        distinct_values(&self.dataset(dataset).table, filter_column)
    }

    /// Evaluates `view`. `selection` only applies to grouped views.
    pub fn evaluate(&self, view: View, selection: Option<&str>) -> Result<ViewData, AggregateError> {
        let span = info_span!("evaluate_view", view = view.slug());
        let _guard = span.enter();

        match view.query() {
            ViewQuery::RecordCounts => Ok(ViewData::Metrics {
                metrics: Dataset::ALL
                    .iter()
                    .map(|&dataset| Metric {
                        label: dataset.record_label().to_string(),
                        value: record_count(&self.dataset(dataset).table),
                    })
                    .collect(),
            }),
            ViewQuery::FixedSum { dataset, columns } => Ok(ViewData::Totals {
                totals: sum_columns(&self.dataset(dataset).table, columns)?,
            }),
            ViewQuery::MatchingSum { dataset, pattern } => Ok(ViewData::Totals {
                totals: sum_matching_columns(
                    &self.dataset(dataset).table,
                    &NameContains::new(pattern),
                )?,
            }),
            ViewQuery::GroupCount {
                dataset,
                group_column,
                filter_column,
            } => {
                let table = self.dataset(dataset);
                let options = distinct_values(&table.table, filter_column)?;
                let selection = selection
                    .map(str::to_string)
                    .or_else(|| options.first().cloned());
                let counts = match &selection {
                    Some(value) => count_by_group(
                        &table.table,
                        group_column,
                        Some(EqualsFilter::new(filter_column, value)),
                    )?,
                    None => {
                        // An empty selector still reports a missing group column.
                        require_columns(&table.table, [group_column])?;
                        Vec::new()
                    }
                };
                Ok(ViewData::Groups {
                    selection,
                    options,
                    counts,
                })
            }
            ViewQuery::Static => Ok(ViewData::Text {
                bullets: view.bullets().iter().map(ToString::to_string).collect(),
            }),
        }
    }
}
