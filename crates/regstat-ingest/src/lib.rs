//! Dataset folder ingestion.
//!
//! This crate discovers the CSV files of a dataset folder, parses each into a
//! Polars DataFrame, and concatenates them into one table.
//!
//! # Features
//!
//! - **Discovery**: non-recursive `*.csv` listing in file-name order
//! - **Tolerant loading**: unreadable files are skipped with a warning
//! - **Union schema**: fragments with different columns are concatenated diagonally
//! - **Caching**: [`DatasetCache`] loads each folder once
//! - **Schema descriptors**: optional per-dataset column requirements
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use regstat_ingest::DatasetCache;
//!
//! let cache = DatasetCache::new();
//! let enrolment = cache.load(Path::new("data/api_data_aadhar_enrolment"));
//! for warning in &enrolment.warnings {
//!     eprintln!("{warning}");
//! }
//! println!("{} rows", enrolment.row_count());
//! ```

mod cache;
mod csv;
mod discovery;
mod error;
mod loader;
mod schema;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, read_csv_table,
    validate_encoding,
};

// === File Discovery ===
pub use discovery::{CSV_EXTENSION, has_extension, list_csv_files};

// === Loading ===
pub use cache::DatasetCache;
pub use loader::{LoadWarning, LoadedTable, load_folder};
pub use source::{CsvFolderSource, FragmentSource};

// === Schema ===
pub use schema::{ColumnKind, ColumnSpec, DatasetSchema, SchemaViolation, dataset_schema};
