//! Core data models for the attendance and salary service.
//!
//! This module contains all the domain models used throughout the service.

mod coerce;
mod employee;
mod month;
mod salary_report;

pub use coerce::{coerce_count, coerce_decimal, coerce_text};
pub use employee::{EmployeeRecord, EmployeeRow, EmployeeUpdate, NewEmployee};
pub use month::Month;
pub use salary_report::{EmployeeSalary, SalaryReport};
