//! Report tables for export.
//!
//! Turns the record set and the salary report into header-plus-rows tables
//! with human-readable column names.

use rust_decimal::Decimal;

use crate::models::{EmployeeRecord, Month, SalaryReport};

/// Label of the synthetic totals row in the salary export.
pub const TOTALS_ROW_LABEL: &str = "MONTHLY TOTAL";

/// A single table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Free text.
    Text(String),
    /// A money amount.
    Amount(Decimal),
    /// A day count.
    Count(u32),
    /// No value.
    Empty,
}

/// A sheet of export data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Worksheet name used for spreadsheet output.
    pub sheet_name: String,
    /// Column headers.
    pub headers: Vec<String>,
    /// Data rows; each has one cell per header.
    pub rows: Vec<Vec<Cell>>,
}

const NAME_HEADER: &str = "Employee Name";
const PACKAGE_HEADER: &str = "Annual Package (₹)";

/// Builds the attendance table: name, package, absences per month, remarks.
///
/// Months with no recorded value are left empty.
pub fn attendance_table(records: &[EmployeeRecord]) -> Table {
    let mut headers = vec![NAME_HEADER.to_string(), PACKAGE_HEADER.to_string()];
    headers.extend(
        Month::ALL
            .iter()
            .map(|m| format!("{} Absent Days", m.abbreviation())),
    );
    headers.push("Remarks".to_string());

    let rows = records
        .iter()
        .map(|record| {
            let mut row = vec![
                Cell::Text(record.name.clone()),
                Cell::Amount(record.annual_package),
            ];
            row.extend(Month::ALL.iter().map(|m| {
                record
                    .monthly_absences
                    .get(m)
                    .map_or(Cell::Empty, |&days| Cell::Count(days))
            }));
            row.push(Cell::Text(record.remarks.clone()));
            row
        })
        .collect();

    Table {
        sheet_name: "Attendance".to_string(),
        headers,
        rows,
    }
}

/// Builds the salary table: one row per employee plus a totals row.
///
/// The totals row carries the monthly totals and the grand total, with an
/// empty package cell.
pub fn salary_table(report: &SalaryReport) -> Table {
    let mut headers = vec![NAME_HEADER.to_string(), PACKAGE_HEADER.to_string()];
    headers.extend(
        Month::ALL
            .iter()
            .map(|m| format!("{} Salary (₹)", m.abbreviation())),
    );
    headers.push("Total Salary (₹)".to_string());

    let month_cells = |amounts: &std::collections::BTreeMap<Month, Decimal>| {
        Month::ALL
            .iter()
            .map(|m| amounts.get(m).map_or(Cell::Empty, |&a| Cell::Amount(a)))
            .collect::<Vec<_>>()
    };

    let mut rows: Vec<Vec<Cell>> = report
        .employees
        .iter()
        .map(|employee| {
            let mut row = vec![
                Cell::Text(employee.name.clone()),
                Cell::Amount(employee.annual_package),
            ];
            row.extend(month_cells(&employee.monthly_salaries));
            row.push(Cell::Amount(employee.total_salary));
            row
        })
        .collect();

    let mut totals = vec![Cell::Text(TOTALS_ROW_LABEL.to_string()), Cell::Empty];
    totals.extend(month_cells(&report.monthly_totals));
    totals.push(Cell::Amount(report.grand_total));
    rows.push(totals);

    Table {
        sheet_name: "Salary".to_string(),
        headers,
        rows,
    }
}
