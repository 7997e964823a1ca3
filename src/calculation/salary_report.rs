//! Salary report aggregation.
//!
//! Applies [`calculate_salary`] to every employee and month and sums the
//! results per employee, per month, and overall.

use std::collections::BTreeMap;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::WorkingDaysConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeRecord, EmployeeSalary, Month, SalaryReport};

use super::monthly_salary::{calculate_salary, round_currency};

/// Computes salaries for a whole record set.
///
/// Each monthly salary is rounded on its own. An employee's total is the
/// sum of those rounded figures, rounded again. Monthly totals sum the
/// employees' salaries for that month, and the grand total sums every
/// employee's total, which equals the sum of the monthly totals.
///
/// # Arguments
///
/// * `records` - The employee records, in store order
/// * `working_days` - Working days per month
///
/// # Returns
///
/// Returns the report, or `InvalidRecord` naming the first record whose
/// annual package is negative or whose figures overflow the decimal range.
///
/// # Example
///
/// ```
/// use attendance_payroll::calculation::compute_salary_report;
/// use attendance_payroll::config::WorkingDaysConfig;
/// use attendance_payroll::models::{EmployeeRecord, Month};
/// use rust_decimal::Decimal;
///
/// let records = vec![EmployeeRecord::new("Asha", Decimal::from(271000))];
/// let report = compute_salary_report(&records, &WorkingDaysConfig::default()).unwrap();
///
/// assert_eq!(report.employees[0].monthly_salaries[&Month::January], Decimal::from(23000));
/// assert_eq!(report.grand_total, Decimal::from(271000));
/// ```
pub fn compute_salary_report(
    records: &[EmployeeRecord],
    working_days: &WorkingDaysConfig,
) -> EngineResult<SalaryReport> {
    let mut employees = Vec::with_capacity(records.len());
    let mut monthly_totals: BTreeMap<Month, Decimal> =
        Month::ALL.into_iter().map(|m| (m, Decimal::ZERO)).collect();
    let mut grand_total = Decimal::ZERO;

    for (index, record) in records.iter().enumerate() {
        let salary = compute_employee_salary(index, record, working_days)?;
        for (month, amount) in &salary.monthly_salaries {
            let total = monthly_totals.entry(*month).or_insert(Decimal::ZERO);
            *total = total
                .checked_add(*amount)
                .ok_or_else(|| out_of_range(index, record, &format!("{} total", month)))?;
        }
        grand_total = grand_total
            .checked_add(salary.total_salary)
            .ok_or_else(|| out_of_range(index, record, "grand total"))?;
        employees.push(salary);
    }

    for total in monthly_totals.values_mut() {
        *total = round_currency(*total);
    }
    let grand_total = round_currency(grand_total);

    debug!(
        employees = employees.len(),
        grand_total = %grand_total,
        "Computed salary report"
    );

    Ok(SalaryReport {
        employees,
        monthly_totals,
        grand_total,
        working_days: working_days.as_map().clone(),
        generated_at: Utc::now(),
    })
}

/// Computes one employee's monthly salaries and total.
///
/// Fails with `InvalidRecord` if the record's annual package is negative or
/// a salary figure does not fit in a `Decimal`.
pub fn compute_employee_salary(
    index: usize,
    record: &EmployeeRecord,
    working_days: &WorkingDaysConfig,
) -> EngineResult<EmployeeSalary> {
    if record.annual_package.is_sign_negative() && !record.annual_package.is_zero() {
        return Err(EngineError::InvalidRecord {
            index,
            name: record.name.clone(),
            message: format!("annual package {} is negative", record.annual_package),
        });
    }

    let mut monthly_salaries = BTreeMap::new();
    for (&month, &days) in working_days.as_map() {
        let salary = calculate_salary(record.annual_package, record.absences(month), days)
            .ok_or_else(|| out_of_range(index, record, &format!("{} salary", month)))?;
        monthly_salaries.insert(month, salary);
    }

    let total_salary = monthly_salaries
        .values()
        .try_fold(Decimal::ZERO, |sum, amount| sum.checked_add(*amount))
        .map(round_currency)
        .ok_or_else(|| out_of_range(index, record, "total salary"))?;

    Ok(EmployeeSalary {
        index,
        name: record.name.clone(),
        annual_package: record.annual_package,
        monthly_salaries,
        total_salary,
    })
}

fn out_of_range(index: usize, record: &EmployeeRecord, figure: &str) -> EngineError {
    EngineError::InvalidRecord {
        index,
        name: record.name.clone(),
        message: format!(
            "{} for annual package {} is too large to compute",
            figure, record.annual_package
        ),
    }
}
