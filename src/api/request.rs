//! Request types for the HTTP API.
//!
//! Update bodies for employees and working days are free-form JSON objects
//! and are handled by [`EmployeeUpdate::from_json`](crate::models::EmployeeUpdate::from_json)
//! and [`WorkingDaysConfig::update`](crate::config::WorkingDaysConfig::update).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EngineError;
use crate::models::{NewEmployee, coerce_decimal, coerce_text};

/// Request body for `POST /api/employees`.
///
/// `annual_package` may be a JSON number or a numeric string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddEmployeeRequest {
    /// The employee's name.
    pub name: Value,
    /// Annual gross compensation.
    pub annual_package: Value,
}

impl TryFrom<AddEmployeeRequest> for NewEmployee {
    type Error = EngineError;

    fn try_from(req: AddEmployeeRequest) -> Result<Self, Self::Error> {
        Ok(NewEmployee {
            name: coerce_text("name", &req.name)?,
            annual_package: coerce_decimal("annual_package", &req.annual_package)?,
        })
    }
}
