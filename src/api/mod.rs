//! HTTP API module for the attendance and salary service.
//!
//! This module provides the JSON endpoints for managing employee records,
//! the working-days table, salary reports, and exports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::AddEmployeeRequest;
pub use response::{ActionResponse, ApiError, ApiErrorResponse, WorkingDaysResponse};
pub use state::AppState;
