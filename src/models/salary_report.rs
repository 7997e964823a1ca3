//! Salary report models.
//!
//! This module contains the [`SalaryReport`] type produced by
//! [`compute_salary_report`](crate::calculation::compute_salary_report).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Month;

/// Computed salaries for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSalary {
    /// The record's position in the store at computation time.
    pub index: usize,
    /// The employee's name.
    pub name: String,
    /// The annual package the salaries were derived from.
    pub annual_package: Decimal,
    /// Salary for each month, rounded to two decimal places.
    pub monthly_salaries: BTreeMap<Month, Decimal>,
    /// Sum of the monthly salaries, rounded to two decimal places.
    pub total_salary: Decimal,
}

/// Salaries for the whole record set.
///
/// The report carries the working-day table it was computed with, so the
/// figures can be checked against the configuration in force at the time.
///
/// # Example
///
/// ```
/// use attendance_payroll::calculation::compute_salary_report;
/// use attendance_payroll::config::WorkingDaysConfig;
/// use rust_decimal::Decimal;
///
/// let report = compute_salary_report(&[], &WorkingDaysConfig::default()).unwrap();
/// assert!(report.employees.is_empty());
/// assert_eq!(report.grand_total, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryReport {
    /// Per-employee detail, in store order.
    pub employees: Vec<EmployeeSalary>,
    /// Sum of each month's salary across all employees.
    pub monthly_totals: BTreeMap<Month, Decimal>,
    /// Sum of the monthly totals.
    pub grand_total: Decimal,
    /// The working days per month used for the computation.
    pub working_days: BTreeMap<Month, u32>,
    /// When the report was computed.
    pub generated_at: DateTime<Utc>,
}
