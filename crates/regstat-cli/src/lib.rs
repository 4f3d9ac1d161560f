//! CLI library components for the registration statistics dashboard.

pub mod dashboard;
pub mod logging;
pub mod render;
