//! Employee record storage.
//!
//! [`RecordStore`] is the backend seam: something that can read and write
//! the whole ordered record list. [`EmployeeStore`] builds the positional
//! operations on top of any backend, reloading the list before every
//! operation and writing it back in full after every mutation.
//!
//! # Example
//!
//! ```
//! use attendance_payroll::models::NewEmployee;
//! use attendance_payroll::store::{EmployeeStore, MemoryStore};
//! use rust_decimal::Decimal;
//!
//! let store = EmployeeStore::new(MemoryStore::new());
//! store.append(NewEmployee { name: "Asha".into(), annual_package: Decimal::from(271000) })?;
//! assert_eq!(store.load_all().len(), 1);
//! # Ok::<(), attendance_payroll::error::EngineError>(())
//! ```

mod csv_file;
mod memory;

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeRecord, EmployeeUpdate, NewEmployee};

pub use csv_file::{CsvFileStore, record_columns};
pub use memory::MemoryStore;

/// A backend holding the full, ordered list of employee records.
pub trait RecordStore: Send + Sync {
    /// Reads every record, in order.
    fn read(&self) -> EngineResult<Vec<EmployeeRecord>>;

    /// Replaces the stored list with `records`.
    fn write(&self, records: &[EmployeeRecord]) -> EngineResult<()>;

    /// A short description of where the records live, for logs.
    fn location(&self) -> String;
}

/// Positional operations over a [`RecordStore`].
///
/// Indices are row positions and shift down after a delete; callers must
/// not hold on to an index across mutations. Mutations within one process
/// are serialized; across processes the last writer wins.
///
/// Every operation blocks on the backend. Async callers should run them on
/// a blocking thread (`tokio::task::spawn_blocking`).
#[derive(Clone)]
pub struct EmployeeStore {
    backend: Arc<dyn RecordStore>,
    write_lock: Arc<Mutex<()>>,
}

impl EmployeeStore {
    /// Creates a store over the given backend.
    pub fn new(backend: impl RecordStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Describes where the records live.
    pub fn location(&self) -> String {
        self.backend.location()
    }

    /// Loads every record.
    ///
    /// A backend that cannot be read yields an empty list. The failure is
    /// logged, not returned.
    pub fn load_all(&self) -> Vec<EmployeeRecord> {
        match self.backend.read() {
            Ok(records) => records,
            Err(err) => {
                warn!(
                    location = %self.backend.location(),
                    error = %err,
                    "Could not load employee records, continuing with none"
                );
                Vec::new()
            }
        }
    }

    /// Adds an employee at the end of the list and returns its index.
    ///
    /// The new record has zero absences in every month and empty remarks.
    pub fn append(&self, employee: NewEmployee) -> EngineResult<usize> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records = self.load_all();
        records.push(employee.into());
        self.backend.write(&records)?;

        let index = records.len() - 1;
        info!(index, name = %records[index].name, "Employee added");
        Ok(index)
    }

    /// Overwrites the supplied fields of the record at `index`.
    ///
    /// Returns the updated record, or `EmployeeNotFound` if `index` is out
    /// of range.
    pub fn update(&self, index: usize, update: &EmployeeUpdate) -> EngineResult<EmployeeRecord> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records = self.load_all();
        let len = records.len();
        let record = records
            .get_mut(index)
            .ok_or(EngineError::EmployeeNotFound { index, len })?;

        update.apply_to(record);
        let updated = record.clone();
        self.backend.write(&records)?;

        info!(index, name = %updated.name, "Employee updated");
        Ok(updated)
    }

    /// Removes the record at `index`, shifting later records down by one.
    ///
    /// Returns the removed record, or `EmployeeNotFound` if `index` is out
    /// of range.
    pub fn delete(&self, index: usize) -> EngineResult<EmployeeRecord> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records = self.load_all();
        if index >= records.len() {
            return Err(EngineError::EmployeeNotFound {
                index,
                len: records.len(),
            });
        }

        let removed = records.remove(index);
        self.backend.write(&records)?;

        info!(index, name = %removed.name, "Employee deleted");
        Ok(removed)
    }
}
