//! In-process record backend.

use std::sync::{Mutex, PoisonError};

use crate::error::EngineResult;
use crate::models::EmployeeRecord;

use super::RecordStore;

/// Keeps records in memory for the life of the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<EmployeeRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `records`.
    pub fn with_records(records: Vec<EmployeeRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl RecordStore for MemoryStore {
    fn read(&self) -> EngineResult<Vec<EmployeeRecord>> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn write(&self, records: &[EmployeeRecord]) -> EngineResult<()> {
        *self.records.lock().unwrap_or_else(PoisonError::into_inner) = records.to_vec();
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
