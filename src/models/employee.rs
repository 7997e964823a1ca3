//! Employee record model and related types.
//!
//! [`EmployeeRecord`] is the typed domain record. [`EmployeeRow`] is its flat
//! tabular form, one column per field, used both for the record file and for
//! the employee listing at the HTTP boundary.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::EngineResult;

use super::coerce::{coerce_count, coerce_decimal, coerce_text};
use super::Month;

/// An employee's attendance record.
///
/// Absence counts may be missing for some months (gaps); a gap counts as
/// zero absences when salaries are computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// The employee's name.
    pub name: String,
    /// Annual gross compensation.
    pub annual_package: Decimal,
    /// Days absent per month.
    pub monthly_absences: BTreeMap<Month, u32>,
    /// Free-text remarks.
    pub remarks: String,
}

impl EmployeeRecord {
    /// Creates a record with zero absences in every month and no remarks.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_payroll::models::{EmployeeRecord, Month};
    /// use rust_decimal::Decimal;
    ///
    /// let record = EmployeeRecord::new("Asha", Decimal::from(271000));
    /// assert_eq!(record.absences(Month::July), 0);
    /// assert!(record.remarks.is_empty());
    /// ```
    pub fn new(name: impl Into<String>, annual_package: Decimal) -> Self {
        Self {
            name: name.into(),
            annual_package,
            monthly_absences: Month::ALL.into_iter().map(|m| (m, 0)).collect(),
            remarks: String::new(),
        }
    }

    /// Returns the absence count for a month, treating a gap as zero.
    pub fn absences(&self, month: Month) -> u32 {
        self.monthly_absences.get(&month).copied().unwrap_or(0)
    }
}

/// Input for adding an employee.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    /// The employee's name.
    pub name: String,
    /// Annual gross compensation.
    pub annual_package: Decimal,
}

impl From<NewEmployee> for EmployeeRecord {
    fn from(new: NewEmployee) -> Self {
        EmployeeRecord::new(new.name, new.annual_package)
    }
}

/// A partial update to an employee record.
///
/// Only the fields that are `Some` (and the months present in
/// `monthly_absences`) are written; everything else is left as it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeUpdate {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement annual package.
    pub annual_package: Option<Decimal>,
    /// Replacement absence counts for the listed months.
    pub monthly_absences: BTreeMap<Month, u32>,
    /// Replacement remarks.
    pub remarks: Option<String>,
}

impl EmployeeUpdate {
    /// Builds an update from a JSON object using the boundary keys.
    ///
    /// Recognised keys are `name`, `annual_package`, `<Month>_Absent` and
    /// `Remarks`. Other keys are ignored. Values are coerced to their field
    /// types; a value that cannot be coerced fails the whole update.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_payroll::models::{EmployeeUpdate, Month};
    /// use serde_json::json;
    ///
    /// let body = json!({"March_Absent": "2", "Remarks": "medical leave"});
    /// let update = EmployeeUpdate::from_json(body.as_object().unwrap()).unwrap();
    /// assert_eq!(update.monthly_absences.get(&Month::March), Some(&2));
    /// assert!(update.name.is_none());
    /// ```
    pub fn from_json(fields: &Map<String, Value>) -> EngineResult<Self> {
        let mut update = EmployeeUpdate::default();

        if let Some(value) = fields.get("name") {
            update.name = Some(coerce_text("name", value)?);
        }
        if let Some(value) = fields.get("annual_package") {
            update.annual_package = Some(coerce_decimal("annual_package", value)?);
        }
        for month in Month::ALL {
            let key = month.absent_column();
            if let Some(value) = fields.get(&key) {
                update.monthly_absences.insert(month, coerce_count(&key, value)?);
            }
        }
        if let Some(value) = fields.get("Remarks") {
            update.remarks = Some(coerce_text("Remarks", value)?);
        }

        Ok(update)
    }

    /// Returns true if the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.annual_package.is_none()
            && self.monthly_absences.is_empty()
            && self.remarks.is_none()
    }

    /// Writes the supplied fields onto a record.
    pub fn apply_to(&self, record: &mut EmployeeRecord) {
        if let Some(name) = &self.name {
            record.name = name.clone();
        }
        if let Some(package) = self.annual_package {
            record.annual_package = package;
        }
        for (&month, &days) in &self.monthly_absences {
            record.monthly_absences.insert(month, days);
        }
        if let Some(remarks) = &self.remarks {
            record.remarks = remarks.clone();
        }
    }
}

/// The flat tabular form of an [`EmployeeRecord`].
///
/// Column names match the record file header. Empty absence cells are gaps.
/// The package is read from its exact decimal text and serialized as a
/// number, like the absence columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRow {
    /// Employee name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Annual gross compensation.
    #[serde(
        rename = "Annual_Package",
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "rust_decimal::serde::str::deserialize"
    )]
    pub annual_package: Decimal,
    /// January absences.
    #[serde(rename = "January_Absent", default)]
    pub january_absent: Option<u32>,
    /// February absences.
    #[serde(rename = "February_Absent", default)]
    pub february_absent: Option<u32>,
    /// March absences.
    #[serde(rename = "March_Absent", default)]
    pub march_absent: Option<u32>,
    /// April absences.
    #[serde(rename = "April_Absent", default)]
    pub april_absent: Option<u32>,
    /// May absences.
    #[serde(rename = "May_Absent", default)]
    pub may_absent: Option<u32>,
    /// June absences.
    #[serde(rename = "June_Absent", default)]
    pub june_absent: Option<u32>,
    /// July absences.
    #[serde(rename = "July_Absent", default)]
    pub july_absent: Option<u32>,
    /// August absences.
    #[serde(rename = "August_Absent", default)]
    pub august_absent: Option<u32>,
    /// September absences.
    #[serde(rename = "September_Absent", default)]
    pub september_absent: Option<u32>,
    /// October absences.
    #[serde(rename = "October_Absent", default)]
    pub october_absent: Option<u32>,
    /// November absences.
    #[serde(rename = "November_Absent", default)]
    pub november_absent: Option<u32>,
    /// December absences.
    #[serde(rename = "December_Absent", default)]
    pub december_absent: Option<u32>,
    /// Free-text remarks.
    #[serde(rename = "Remarks", default)]
    pub remarks: String,
}

impl EmployeeRow {
    /// Returns the absence cell for a month.
    pub fn absent(&self, month: Month) -> Option<u32> {
        match month {
            Month::January => self.january_absent,
            Month::February => self.february_absent,
            Month::March => self.march_absent,
            Month::April => self.april_absent,
            Month::May => self.may_absent,
            Month::June => self.june_absent,
            Month::July => self.july_absent,
            Month::August => self.august_absent,
            Month::September => self.september_absent,
            Month::October => self.october_absent,
            Month::November => self.november_absent,
            Month::December => self.december_absent,
        }
    }

    fn absent_mut(&mut self, month: Month) -> &mut Option<u32> {
        match month {
            Month::January => &mut self.january_absent,
            Month::February => &mut self.february_absent,
            Month::March => &mut self.march_absent,
            Month::April => &mut self.april_absent,
            Month::May => &mut self.may_absent,
            Month::June => &mut self.june_absent,
            Month::July => &mut self.july_absent,
            Month::August => &mut self.august_absent,
            Month::September => &mut self.september_absent,
            Month::October => &mut self.october_absent,
            Month::November => &mut self.november_absent,
            Month::December => &mut self.december_absent,
        }
    }

    /// Converts the row into a typed record.
    pub fn into_record(self) -> EmployeeRecord {
        let monthly_absences = Month::ALL
            .into_iter()
            .filter_map(|m| self.absent(m).map(|days| (m, days)))
            .collect();

        EmployeeRecord {
            name: self.name,
            annual_package: self.annual_package,
            monthly_absences,
            remarks: self.remarks,
        }
    }

    /// Returns the row as record-file cells, in header order.
    ///
    /// The package keeps its exact decimal text; gaps are empty cells.
    pub fn to_cells(&self) -> Vec<String> {
        let mut cells = vec![self.name.clone(), self.annual_package.to_string()];
        cells.extend(
            Month::ALL
                .into_iter()
                .map(|m| self.absent(m).map(|days| days.to_string()).unwrap_or_default()),
        );
        cells.push(self.remarks.clone());
        cells
    }
}

impl From<&EmployeeRecord> for EmployeeRow {
    fn from(record: &EmployeeRecord) -> Self {
        let mut row = EmployeeRow {
            name: record.name.clone(),
            annual_package: record.annual_package,
            january_absent: None,
            february_absent: None,
            march_absent: None,
            april_absent: None,
            may_absent: None,
            june_absent: None,
            july_absent: None,
            august_absent: None,
            september_absent: None,
            october_absent: None,
            november_absent: None,
            december_absent: None,
            remarks: record.remarks.clone(),
        };
        for (&month, &days) in &record.monthly_absences {
            *row.absent_mut(month) = Some(days);
        }
        row
    }
}
