//! Configuration for the attendance and salary service.
//!
//! This module provides the working-days table used by the salary
//! calculator and the service settings loaded from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use attendance_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/service.yaml").unwrap().into_config();
//! println!("Serving on {}", config.bind_address);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DEFAULT_BIND_ADDRESS, DEFAULT_DATA_FILE, DEFAULT_WORKING_DAYS, MAX_WORKING_DAYS, ServiceConfig,
    SettingsFile, WorkingDaysConfig, WorkingDaysUpdate,
};
