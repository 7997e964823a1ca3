//! Attendance and salary service.
//!
//! This crate keeps a flat list of employee records with monthly absence
//! counts and derives monthly salaries from each employee's annual package,
//! the absences, and a configurable table of working days per month.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod store;
