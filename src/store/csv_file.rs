//! Flat-file record backend.
//!
//! Records are kept as CSV with the header
//! `Name,Annual_Package,January_Absent,...,December_Absent,Remarks`.
//! Writes go to a sibling temporary file which is then renamed over the
//! record file, so a reader sees either the old list or the new one.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{EmployeeRecord, EmployeeRow, Month};

use super::RecordStore;

/// Returns the record file's column names, in order.
pub fn record_columns() -> Vec<String> {
    let mut columns = vec!["Name".to_string(), "Annual_Package".to_string()];
    columns.extend(Month::ALL.into_iter().map(Month::absent_column));
    columns.push("Remarks".to_string());
    columns
}

/// Stores records in a CSV file.
#[derive(Debug, Clone)]
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    /// Creates a backend for the file at `path`. The file need not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the record file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, message: impl Into<String>) -> EngineError {
        EngineError::StorageError {
            path: self.path.display().to_string(),
            message: message.into(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_rows(&self, target: &Path, records: &[EmployeeRecord]) -> EngineResult<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(target)
            .map_err(|e| self.storage_error(e.to_string()))?;

        writer
            .write_record(record_columns())
            .map_err(|e| self.storage_error(e.to_string()))?;
        for record in records {
            writer
                .write_record(EmployeeRow::from(record).to_cells())
                .map_err(|e| self.storage_error(e.to_string()))?;
        }
        writer.flush().map_err(|e| self.storage_error(e.to_string()))
    }
}

impl RecordStore for CsvFileStore {
    fn read(&self) -> EngineResult<Vec<EmployeeRecord>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Record file does not exist yet");
            return Ok(Vec::new());
        }

        let mut reader =
            csv::Reader::from_path(&self.path).map_err(|e| self.storage_error(e.to_string()))?;

        reader
            .deserialize::<EmployeeRow>()
            .map(|row| {
                row.map(EmployeeRow::into_record)
                    .map_err(|e| self.storage_error(e.to_string()))
            })
            .collect()
    }

    fn write(&self, records: &[EmployeeRecord]) -> EngineResult<()> {
        let temp = self.temp_path();
        if let Err(err) = self.write_rows(&temp, records) {
            let _ = fs::remove_file(&temp);
            return Err(err);
        }
        fs::rename(&temp, &self.path).map_err(|e| self.storage_error(e.to_string()))?;

        debug!(path = %self.path.display(), records = records.len(), "Record file written");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
