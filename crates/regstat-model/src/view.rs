//! The six dashboard views and what each one asks of the data layer.
//!
//! A view is pure description: which dataset it reads, which aggregation it
//! runs, how the result is charted, and the text shown around it. Rendering
//! lives in the presentation shell.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::ModelError;

/// Navigation entries, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Overview,
    AgeWiseEnrolment,
    DemographicUpdates,
    BiometricLifecycle,
    RegionalInsights,
    SmartUpdateFramework,
}

/// How a view presents its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Line,
    Metric,
    Text,
}

/// Tone of the message shown under a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Info,
    Success,
    Warning,
}

/// Message shown under a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub tone: Tone,
    pub text: &'static str,
}

/// The aggregation a view needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewQuery {
    /// Row counts of every dataset.
    RecordCounts,
    /// Sum of a fixed, ordered set of columns.
    FixedSum {
        dataset: Dataset,
        columns: &'static [&'static str],
    },
    /// Sum of every column whose name contains `pattern` (case-insensitive).
    MatchingSum {
        dataset: Dataset,
        pattern: &'static str,
    },
    /// Row count per `group_column`, restricted to `filter_column == selection`.
    GroupCount {
        dataset: Dataset,
        group_column: &'static str,
        filter_column: &'static str,
    },
    /// No data needed.
    Static,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Overview,
        View::AgeWiseEnrolment,
        View::DemographicUpdates,
        View::BiometricLifecycle,
        View::RegionalInsights,
        View::SmartUpdateFramework,
    ];

    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::AgeWiseEnrolment => "Age-wise Enrolment",
            View::DemographicUpdates => "Demographic Updates",
            View::BiometricLifecycle => "Biometric Lifecycle",
            View::RegionalInsights => "Regional Insights",
            View::SmartUpdateFramework => "Smart Update Framework",
        }
    }

    /// Command-line slug.
    pub fn slug(&self) -> &'static str {
        match self {
            View::Overview => "overview",
            View::AgeWiseEnrolment => "age-wise-enrolment",
            View::DemographicUpdates => "demographic-updates",
            View::BiometricLifecycle => "biometric-lifecycle",
            View::RegionalInsights => "regional-insights",
            View::SmartUpdateFramework => "smart-update-framework",
        }
    }

    /// Page header.
    pub fn header(&self) -> &'static str {
        match self {
            View::Overview => "Lifecycle-Based Update Analysis",
            View::AgeWiseEnrolment => "Age-wise Enrolment",
            View::DemographicUpdates => "Demographic Update Analysis",
            View::BiometricLifecycle => "Biometric Update Lifecycle",
            View::RegionalInsights => "Regional Update Insights",
            View::SmartUpdateFramework => "Smart Update Framework",
        }
    }

    /// Chart title. `selection` is substituted for regional views.
    pub fn chart_title(&self, selection: Option<&str>) -> String {
        match self {
            View::AgeWiseEnrolment => "Age-wise Enrolment Distribution".to_string(),
            View::DemographicUpdates => "Age-wise Demographic Updates".to_string(),
            View::BiometricLifecycle => "Biometric Update Peaks Across Lifecycle".to_string(),
            View::RegionalInsights => match selection {
                Some(state) => format!("Biometric Updates by District - {state}"),
                None => "Biometric Updates by District".to_string(),
            },
            View::Overview | View::SmartUpdateFramework => self.header().to_string(),
        }
    }

    pub fn chart(&self) -> ChartKind {
        match self {
            View::Overview => ChartKind::Metric,
            View::AgeWiseEnrolment | View::DemographicUpdates | View::RegionalInsights => {
                ChartKind::Bar
            }
            View::BiometricLifecycle => ChartKind::Line,
            View::SmartUpdateFramework => ChartKind::Text,
        }
    }

    pub fn query(&self) -> ViewQuery {
        match self {
            View::Overview => ViewQuery::RecordCounts,
            View::AgeWiseEnrolment => ViewQuery::FixedSum {
                dataset: Dataset::Enrolment,
                columns: Dataset::Enrolment.age_columns(),
            },
            View::DemographicUpdates => ViewQuery::FixedSum {
                dataset: Dataset::Demographic,
                columns: Dataset::Demographic.age_columns(),
            },
            View::BiometricLifecycle => ViewQuery::MatchingSum {
                dataset: Dataset::Biometric,
                pattern: "age",
            },
            View::RegionalInsights => ViewQuery::GroupCount {
                dataset: Dataset::Biometric,
                group_column: "district",
                filter_column: "state",
            },
            View::SmartUpdateFramework => ViewQuery::Static,
        }
    }

    /// Axis labels as (category, value).
    pub fn axis_labels(&self) -> (&'static str, &'static str) {
        match self {
            View::AgeWiseEnrolment => ("Age Group", "Total Enrolments"),
            View::DemographicUpdates => ("Age Group", "Demographic Updates"),
            View::BiometricLifecycle => ("Age Group", "Biometric Updates"),
            View::RegionalInsights => ("district", "Update Records"),
            View::Overview => ("Dataset", "Records"),
            View::SmartUpdateFramework => ("", ""),
        }
    }

    /// Message shown instead of a chart when the data cannot support the view.
    pub fn unavailable_message(&self) -> &'static str {
        match self {
            View::AgeWiseEnrolment => "Required age columns not found in enrolment data.",
            View::DemographicUpdates => "Required demographic age columns not found.",
            View::BiometricLifecycle => "No biometric age columns found.",
            View::RegionalInsights => "State or district columns missing in biometric data.",
            View::Overview | View::SmartUpdateFramework => "View unavailable.",
        }
    }

    pub fn insight(&self) -> Option<Insight> {
        match self {
            View::AgeWiseEnrolment => Some(Insight {
                tone: Tone::Info,
                text: "Higher enrolment volumes are observed during early childhood \
                       and adulthood, reflecting key lifecycle registration phases.",
            }),
            View::DemographicUpdates => Some(Insight {
                tone: Tone::Success,
                text: "A sharp rise in demographic updates after age 17 highlights \
                       identity detail changes during adulthood.",
            }),
            View::BiometricLifecycle => Some(Insight {
                tone: Tone::Info,
                text: "Biometric updates peak during adolescence and early adulthood, \
                       indicating mandatory compliance transition phases.",
            }),
            View::RegionalInsights => Some(Insight {
                tone: Tone::Warning,
                text: "Districts with lower update activity may indicate \
                       service access gaps or awareness issues.",
            }),
            View::SmartUpdateFramework => Some(Insight {
                tone: Tone::Success,
                text: "Reduced update backlog. Improved record accuracy. \
                       Better citizen experience. Optimised service planning.",
            }),
            View::Overview => None,
        }
    }

    /// Static bullet content for text-only sections.
    pub fn bullets(&self) -> &'static [&'static str] {
        match self {
            View::Overview => &[
                "Analyse age-wise enrolment patterns",
                "Identify lifecycle-based update peaks",
                "Detect regional update disparities",
                "Propose a smart, proactive update framework",
            ],
            View::SmartUpdateFramework => &[
                "Lifecycle Trigger Engine",
                "Regional Risk Scoring",
                "Update Demand Forecasting",
                "Citizen Notification Layer",
            ],
            _ => &[],
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for View {
    type Err = ModelError;

    /// Accepts the slug or the menu label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        View::ALL
            .into_iter()
            .find(|view| view.slug() == normalized || view.label().to_lowercase() == normalized)
            .ok_or_else(|| ModelError::UnknownView(s.to_string()))
    }
}
