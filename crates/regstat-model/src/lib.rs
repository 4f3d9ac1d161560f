//! Shared model types for the registration statistics dashboard.
//!
//! - [`Dataset`]: the three record categories and their folders
//! - [`View`]: the six navigation entries and the aggregation each needs
//! - [`DashboardConfig`]: directory layout for loading and conversion

pub mod config;
pub mod dataset;
pub mod error;
pub mod view;

pub use config::DashboardConfig;
pub use dataset::Dataset;
pub use error::{ModelError, Result};
pub use view::{ChartKind, Insight, Tone, View, ViewQuery};
