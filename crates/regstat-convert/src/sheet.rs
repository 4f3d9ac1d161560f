//! Reading the first worksheet of a spreadsheet and writing it as CSV.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use chrono::NaiveTime;

use regstat_common::format_numeric;

use crate::error::{ConvertError, Result};

/// File extensions treated as spreadsheets, compared case-insensitively.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// A worksheet as text: the first row names the columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Reads the first worksheet of `path`.
pub fn read_first_sheet(path: &Path) -> Result<SheetTable> {
    let workbook_error = |source| ConvertError::Workbook {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_error)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ConvertError::NoWorksheet {
            path: path.to_path_buf(),
        })?
        .map_err(workbook_error)?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    let headers = rows.next().unwrap_or_default();
    Ok(SheetTable::new(headers, rows.collect()))
}

/// Writes `table` to `path` as CSV, replacing any existing file.
pub fn write_csv(table: &SheetTable, path: &Path) -> Result<()> {
    let write_error = |source| ConvertError::CsvWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_path(path).map_err(write_error)?;
    if !table.headers.is_empty() {
        writer.write_record(&table.headers).map_err(write_error)?;
    }
    for row in &table.rows {
        writer.write_record(row).map_err(write_error)?;
    }
    writer
        .flush()
        .map_err(|e| write_error(csv::Error::from(e)))?;
    Ok(())
}

/// Natural text of a cell.
///
/// Whole-number floats lose their fractional part, dates without a time
/// component are written as `YYYY-MM-DD`, empty cells as empty fields.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(v) => v.to_string(),
        Data::Float(v) => format_numeric(*v),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) if datetime.time() == NaiveTime::MIN => {
                datetime.format("%Y-%m-%d").to_string()
            }
            Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => format_numeric(dt.as_f64()),
        },
        Data::Error(e) => e.to_string(),
    }
}
