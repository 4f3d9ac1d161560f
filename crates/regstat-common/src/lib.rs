//! Shared utilities for the registration statistics crates.
//!
//! Everything here operates on Polars values and is free of any dataset
//! knowledge, so the ingest, aggregate and presentation crates can agree on
//! how a cell is rendered as text and how numbers are formatted.

mod values;

pub use values::{any_to_string, compare_labels, format_numeric, is_numeric_dtype, parse_f64};
