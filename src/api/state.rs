//! Application state for the HTTP API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::{ServiceConfig, WorkingDaysConfig};
use crate::store::{CsvFileStore, EmployeeStore};

/// Shared application state.
///
/// Holds the employee store and the working-days table. The table is
/// owned here for the life of the server: it starts from the loaded
/// settings and changes only through the working-days update endpoint.
#[derive(Clone)]
pub struct AppState {
    store: EmployeeStore,
    working_days: Arc<RwLock<WorkingDaysConfig>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(store: EmployeeStore, working_days: WorkingDaysConfig) -> Self {
        Self {
            store,
            working_days: Arc::new(RwLock::new(working_days)),
        }
    }

    /// Creates the state described by the service settings, with records
    /// kept in the configured CSV file.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(
            EmployeeStore::new(CsvFileStore::new(&config.data_file)),
            config.working_days.clone(),
        )
    }

    /// Returns the employee store.
    pub fn store(&self) -> &EmployeeStore {
        &self.store
    }

    /// Returns the working-days table.
    pub fn working_days(&self) -> &RwLock<WorkingDaysConfig> {
        &self.working_days
    }
}
