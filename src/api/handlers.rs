//! HTTP request handlers for the attendance and salary API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use serde_json::{Map, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_salary_report;
use crate::error::{EngineError, EngineResult};
use crate::export::{ExportFile, ExportFormat, export_attendance, export_salary};
use crate::models::{EmployeeRecord, EmployeeRow, EmployeeUpdate, NewEmployee};
use crate::store::EmployeeStore;

use super::request::AddEmployeeRequest;
use super::response::{ActionResponse, ApiError, ApiErrorResponse, WorkingDaysResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/employees",
            get(list_employees_handler).post(add_employee_handler),
        )
        .route(
            "/api/employees/:index",
            put(update_employee_handler).delete(delete_employee_handler),
        )
        .route("/api/salary-data", get(salary_data_handler))
        .route(
            "/api/working-days",
            get(get_working_days_handler).put(update_working_days_handler),
        )
        .route(
            "/api/export/attendance/:format",
            get(export_attendance_handler),
        )
        .route("/api/export/salary/:format", get(export_salary_handler))
        .with_state(state)
}

/// Runs a store operation on the blocking thread pool.
///
/// The store reads and rewrites the record file synchronously, so it must
/// not run on an async worker.
async fn with_store<T, F>(state: &AppState, op: F) -> EngineResult<T>
where
    F: FnOnce(&EmployeeStore) -> EngineResult<T> + Send + 'static,
    T: Send + 'static,
{
    let store = state.store().clone();
    let location = store.location();
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|err| EngineError::StorageError {
            path: location,
            message: format!("store task failed: {}", err),
        })?
}

async fn load_records(state: &AppState) -> EngineResult<Vec<EmployeeRecord>> {
    with_store(state, |store| Ok(store.load_all())).await
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    ApiErrorResponse::from(err).into_response()
}

fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error).into_response()
}

fn index_rejection_response(correlation_id: Uuid, rejection: PathRejection) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %rejection,
        "Employee index is not a position"
    );
    ApiErrorResponse::new(
        StatusCode::NOT_FOUND,
        ApiError::employee_not_found(rejection.body_text()),
    )
    .into_response()
}

fn download_response(file: ExportFile) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", file.filename),
            ),
        ],
        file.bytes,
    )
        .into_response()
}

/// Handler for GET /api/employees.
///
/// Lists every record in store order, using the record-file column names.
async fn list_employees_handler(State(state): State<AppState>) -> Response {
    match load_records(&state).await {
        Ok(records) => {
            let rows: Vec<EmployeeRow> = records.iter().map(EmployeeRow::from).collect();
            Json(rows).into_response()
        }
        Err(err) => error_response(Uuid::new_v4(), err),
    }
}

/// Handler for POST /api/employees.
async fn add_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<AddEmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing add employee request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let employee = match NewEmployee::try_from(request) {
        Ok(employee) => employee,
        Err(err) => return error_response(correlation_id, err),
    };
    match with_store(&state, move |store| store.append(employee)).await {
        Ok(index) => {
            info!(correlation_id = %correlation_id, index, "Employee added");
            Json(ActionResponse::ok("Employee added successfully")).into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for PUT /api/employees/:index.
///
/// Only the fields present in the body are changed.
async fn update_employee_handler(
    State(state): State<AppState>,
    index: Result<Path<usize>, PathRejection>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing update employee request");

    let Path(index) = match index {
        Ok(index) => index,
        Err(rejection) => return index_rejection_response(correlation_id, rejection),
    };
    let fields = match payload {
        Ok(Json(fields)) => fields,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let update = match EmployeeUpdate::from_json(&fields) {
        Ok(update) => update,
        Err(err) => return error_response(correlation_id, err),
    };
    match with_store(&state, move |store| store.update(index, &update)).await {
        Ok(_) => Json(ActionResponse::ok("Employee updated successfully")).into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for DELETE /api/employees/:index.
///
/// Records after `index` move down one position.
async fn delete_employee_handler(
    State(state): State<AppState>,
    index: Result<Path<usize>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing delete employee request");

    let Path(index) = match index {
        Ok(index) => index,
        Err(rejection) => return index_rejection_response(correlation_id, rejection),
    };

    match with_store(&state, move |store| store.delete(index)).await {
        Ok(_) => Json(ActionResponse::ok("Employee deleted successfully")).into_response(),
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /api/salary-data.
async fn salary_data_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    let records = match load_records(&state).await {
        Ok(records) => records,
        Err(err) => return error_response(correlation_id, err),
    };
    let working_days = state.working_days().read().await.clone();

    match compute_salary_report(&records, &working_days) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                employees = report.employees.len(),
                grand_total = %report.grand_total,
                "Salary report computed"
            );
            Json(report).into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /api/working-days.
async fn get_working_days_handler(State(state): State<AppState>) -> Response {
    let working_days = state.working_days().read().await.clone();
    Json(working_days).into_response()
}

/// Handler for PUT /api/working-days.
///
/// Keys that are not month names are skipped and listed in the response.
async fn update_working_days_handler(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing working days update");

    let changes = match payload {
        Ok(Json(changes)) => changes,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let mut working_days = state.working_days().write().await;
    match working_days.update(&changes) {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                applied = ?outcome.applied,
                "Working days updated"
            );
            Json(WorkingDaysResponse {
                success: true,
                working_days: working_days.as_map().clone(),
                ignored_keys: outcome.ignored_keys,
            })
            .into_response()
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /api/export/attendance/:format.
async fn export_attendance_handler(
    State(state): State<AppState>,
    Path(format): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let format = match format.parse::<ExportFormat>() {
        Ok(format) => format,
        Err(err) => return error_response(correlation_id, err),
    };
    let result = load_records(&state)
        .await
        .and_then(|records| export_attendance(&records, format));
    match result {
        Ok(file) => {
            info!(correlation_id = %correlation_id, filename = %file.filename, "Attendance exported");
            download_response(file)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /api/export/salary/:format.
async fn export_salary_handler(
    State(state): State<AppState>,
    Path(format): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let format = match format.parse::<ExportFormat>() {
        Ok(format) => format,
        Err(err) => return error_response(correlation_id, err),
    };
    let records = match load_records(&state).await {
        Ok(records) => records,
        Err(err) => return error_response(correlation_id, err),
    };
    let working_days = state.working_days().read().await.clone();

    let result = compute_salary_report(&records, &working_days)
        .and_then(|report| export_salary(&report, format));
    match result {
        Ok(file) => {
            info!(correlation_id = %correlation_id, filename = %file.filename, "Salary exported");
            download_response(file)
        }
        Err(err) => error_response(correlation_id, err),
    }
}
