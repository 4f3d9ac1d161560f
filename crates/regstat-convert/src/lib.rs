//! Spreadsheet-to-CSV conversion.
//!
//! A one-time preprocessing step: every spreadsheet in each configured input
//! folder is read (first worksheet only) and written as a CSV file of the same
//! base name into a mirrored output folder. Values are copied as text; the
//! first row becomes the CSV header.
//!
//! # Example
//!
//! ```ignore
//! use regstat_convert::{ConvertConfig, FailurePolicy, convert_folders};
//! use regstat_model::DashboardConfig;
//!
//! let config = ConvertConfig::from_dashboard(&DashboardConfig::default())
//!     .with_policy(FailurePolicy::Skip);
//! let report = convert_folders(&config)?;
//! println!("{} files converted", report.converted.len());
//! ```

mod convert;
mod error;
mod sheet;

pub use convert::{
    ConversionFailure, ConversionReport, ConvertConfig, ConvertedFile, FailurePolicy,
    convert_file, convert_folders, list_spreadsheets,
};
pub use error::{ConvertError, Result};
pub use sheet::{SPREADSHEET_EXTENSIONS, SheetTable, read_first_sheet, write_csv};
