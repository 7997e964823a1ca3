//! Attendance and salary exports.
//!
//! Both exports are produced as either CSV or an XLSX workbook.
//!
//! # Example
//!
//! ```
//! use attendance_payroll::export::{export_attendance, ExportFormat};
//! use attendance_payroll::models::EmployeeRecord;
//! use rust_decimal::Decimal;
//!
//! let records = vec![EmployeeRecord::new("Asha", Decimal::from(271000))];
//! let file = export_attendance(&records, "csv".parse::<ExportFormat>()?)?;
//! assert_eq!(file.filename, "attendance_data.csv");
//! # Ok::<(), attendance_payroll::error::EngineError>(())
//! ```

mod tables;
mod writers;

use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeRecord, SalaryReport};

pub use tables::{Cell, TOTALS_ROW_LABEL, Table, attendance_table, salary_table};
pub use writers::{write_csv, write_xlsx};

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated text.
    Csv,
    /// XLSX spreadsheet.
    Excel,
}

impl ExportFormat {
    /// Returns the MIME type of the output.
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Excel => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Returns the file extension of the output.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xlsx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => f.write_str("csv"),
            ExportFormat::Excel => f.write_str("excel"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(ExportFormat::Csv),
            "excel" => Ok(ExportFormat::Excel),
            other => Err(EngineError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// A rendered export ready to be sent as a download.
#[derive(Debug, Clone)]
pub struct ExportFile {
    /// Suggested download name.
    pub filename: String,
    /// MIME type.
    pub content_type: &'static str,
    /// File contents.
    pub bytes: Vec<u8>,
}

fn render(table: &Table, stem: &str, format: ExportFormat) -> EngineResult<ExportFile> {
    let bytes = match format {
        ExportFormat::Csv => write_csv(table)?,
        ExportFormat::Excel => write_xlsx(table)?,
    };
    Ok(ExportFile {
        filename: format!("{}.{}", stem, format.extension()),
        content_type: format.content_type(),
        bytes,
    })
}

/// Exports the attendance table.
pub fn export_attendance(
    records: &[EmployeeRecord],
    format: ExportFormat,
) -> EngineResult<ExportFile> {
    render(&attendance_table(records), "attendance_data", format)
}

/// Exports the salary table, including the monthly totals row.
pub fn export_salary(report: &SalaryReport, format: ExportFormat) -> EngineResult<ExportFile> {
    render(&salary_table(report), "salary_data", format)
}
