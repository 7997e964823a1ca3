//! Salary calculation.
//!
//! This module contains the monthly salary formula and the aggregation of
//! monthly salaries into per-employee, per-month, and grand totals. Nothing
//! here performs I/O.

mod monthly_salary;
mod salary_report;

pub use monthly_salary::{
    ANNUAL_PAY_DIVISOR, CURRENCY_DECIMAL_PLACES, calculate_salary, daily_rate, effective_days,
    round_currency,
};
pub use salary_report::{compute_employee_salary, compute_salary_report};
