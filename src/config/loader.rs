//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading service
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{ServiceConfig, SettingsFile};

/// Loads and provides access to the service settings.
///
/// # File Format
///
/// ```yaml
/// data_file: employee_data.csv
/// bind_address: 127.0.0.1:5000
/// working_days:
///   February: 20
/// ```
///
/// Every key is optional. `working_days` overrides individual months of the
/// default table; month names must be spelled in full.
///
/// # Example
///
/// ```no_run
/// use attendance_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/service.yaml")?;
/// println!("Records in {}", loader.config().data_file.display());
/// # Ok::<(), attendance_payroll::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ServiceConfig,
}

impl ConfigLoader {
    /// Loads settings from the specified file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file cannot be read (`ConfigNotFound`)
    /// - The file is not valid YAML, has unknown keys, or names an unknown
    ///   month (`ConfigParseError`)
    /// - A month is configured with zero working days (`ValidationError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let file = Self::load_yaml::<SettingsFile>(path.as_ref())?;
        let config = ServiceConfig::from(file);
        config.validate()?;
        Ok(Self { config })
    }

    /// Creates a loader holding the built-in defaults.
    pub fn defaults() -> Self {
        Self {
            config: ServiceConfig::default(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded settings.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Consumes the loader, returning the settings.
    pub fn into_config(self) -> ServiceConfig {
        self.config
    }
}
