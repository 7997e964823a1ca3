//! Configuration types for the service.
//!
//! This module contains the working-days table and the service settings,
//! plus the raw settings-file structure deserialized from YAML.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{coerce_count, Month};

/// Default working days per month, January through December.
pub const DEFAULT_WORKING_DAYS: [u32; 12] = [23, 22, 23, 22, 23, 22, 23, 23, 22, 23, 22, 23];

/// Largest working-day count a month can be given.
pub const MAX_WORKING_DAYS: u32 = 31;

/// Default path of the record file.
pub const DEFAULT_DATA_FILE: &str = "employee_data.csv";

/// Default HTTP bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";

/// Working days in each month.
///
/// Always holds exactly one entry per month.
///
/// # Example
///
/// ```
/// use attendance_payroll::config::WorkingDaysConfig;
/// use attendance_payroll::models::Month;
///
/// let config = WorkingDaysConfig::default();
/// assert_eq!(config.get(Month::January), 23);
/// assert_eq!(config.get(Month::February), 22);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WorkingDaysConfig {
    days: BTreeMap<Month, u32>,
}

impl Default for WorkingDaysConfig {
    fn default() -> Self {
        Self {
            days: Month::ALL.into_iter().zip(DEFAULT_WORKING_DAYS).collect(),
        }
    }
}

/// The outcome of a working-days update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkingDaysUpdate {
    /// Months whose value was written.
    pub applied: Vec<Month>,
    /// Keys that did not name a month and were skipped.
    pub ignored_keys: Vec<String>,
}

impl WorkingDaysConfig {
    /// Returns the working days for a month.
    pub fn get(&self, month: Month) -> u32 {
        self.days.get(&month).copied().unwrap_or(0)
    }

    /// Sets the working days for a month.
    pub fn set(&mut self, month: Month, days: u32) {
        self.days.insert(month, days);
    }

    /// Returns the full table in calendar order.
    pub fn as_map(&self) -> &BTreeMap<Month, u32> {
        &self.days
    }

    /// Applies a partial update keyed by full month name.
    ///
    /// Every value for a known month must coerce to a whole number no larger
    /// than [`MAX_WORKING_DAYS`]; if any does not, nothing is changed and a
    /// validation error is returned.
    /// Keys that are not month names are skipped, logged, and reported back
    /// in [`WorkingDaysUpdate::ignored_keys`].
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_payroll::config::WorkingDaysConfig;
    /// use attendance_payroll::models::Month;
    /// use serde_json::json;
    ///
    /// let mut config = WorkingDaysConfig::default();
    /// let body = json!({"February": 20, "Febuary": 19});
    /// let outcome = config.update(body.as_object().unwrap()).unwrap();
    ///
    /// assert_eq!(config.get(Month::February), 20);
    /// assert_eq!(outcome.ignored_keys, vec!["Febuary".to_string()]);
    /// ```
    pub fn update(&mut self, changes: &Map<String, Value>) -> EngineResult<WorkingDaysUpdate> {
        let mut staged = Vec::new();
        let mut ignored_keys = Vec::new();

        for (key, value) in changes {
            match key.parse::<Month>() {
                Ok(month) => {
                    let days = coerce_count(key, value)?;
                    if days > MAX_WORKING_DAYS {
                        return Err(EngineError::validation(
                            key.as_str(),
                            format!("{} exceeds {} working days", days, MAX_WORKING_DAYS),
                        ));
                    }
                    staged.push((month, days));
                }
                Err(_) => ignored_keys.push(key.clone()),
            }
        }

        if !ignored_keys.is_empty() {
            warn!(keys = ?ignored_keys, "Ignoring unknown months in working-days update");
        }

        let applied = staged.iter().map(|(month, _)| *month).collect();
        for (month, days) in staged {
            self.set(month, days);
        }

        Ok(WorkingDaysUpdate {
            applied,
            ignored_keys,
        })
    }
}

impl From<WorkingDaysConfig> for BTreeMap<Month, u32> {
    fn from(config: WorkingDaysConfig) -> Self {
        config.days
    }
}

/// Settings-file structure.
///
/// Every key is optional; missing keys fall back to the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    /// Path of the record file.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// HTTP bind address.
    #[serde(default)]
    pub bind_address: Option<String>,
    /// Working-day overrides applied on top of the default table.
    #[serde(default)]
    pub working_days: BTreeMap<Month, u32>,
}

/// Resolved service settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Path of the record file.
    pub data_file: PathBuf,
    /// HTTP bind address.
    pub bind_address: String,
    /// Working days in effect at startup.
    pub working_days: WorkingDaysConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            working_days: WorkingDaysConfig::default(),
        }
    }
}

impl From<SettingsFile> for ServiceConfig {
    fn from(file: SettingsFile) -> Self {
        let mut config = ServiceConfig::default();
        if let Some(data_file) = file.data_file {
            config.data_file = data_file;
        }
        if let Some(bind_address) = file.bind_address {
            config.bind_address = bind_address;
        }
        for (month, days) in file.working_days {
            config.working_days.set(month, days);
        }
        config
    }
}

impl ServiceConfig {
    /// Checks that every month has between one and [`MAX_WORKING_DAYS`]
    /// working days.
    pub fn validate(&self) -> EngineResult<()> {
        let out_of_range = self
            .working_days
            .as_map()
            .iter()
            .find(|(_, days)| **days == 0 || **days > MAX_WORKING_DAYS);
        match out_of_range {
            Some((month, days)) => Err(EngineError::validation(
                format!("working_days.{}", month),
                format!("{} is not between 1 and {}", days, MAX_WORKING_DAYS),
            )),
            None => Ok(()),
        }
    }
}
