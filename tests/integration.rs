//! Integration tests for the attendance and salary service.
//!
//! This test suite drives the HTTP router end to end:
//! - Employee add / list / update / delete
//! - Positional index shifting after deletes
//! - Salary report figures and totals
//! - Working-days configuration
//! - CSV and XLSX exports
//! - Record file persistence and degraded loads
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use attendance_payroll::api::{AppState, create_router};
use attendance_payroll::config::{ConfigLoader, WorkingDaysConfig};
use attendance_payroll::store::{CsvFileStore, EmployeeStore, MemoryStore};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    AppState::new(
        EmployeeStore::new(MemoryStore::new()),
        WorkingDaysConfig::default(),
    )
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn assert_amount(value: &Value, expected: &str) {
    let actual = value
        .as_str()
        .unwrap_or_else(|| panic!("expected a decimal string, got {}", value));
    assert_eq!(
        decimal(actual),
        decimal(expected),
        "Expected amount {}, got {}",
        expected,
        actual
    );
}

async fn send_raw(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn send(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(create_router(state.clone()), method, uri, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn add_employee(state: &AppState, name: &str, package: Value) {
    let (status, body) = send(
        state,
        "POST",
        "/api/employees",
        Some(json!({"name": name, "annual_package": package})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "add failed: {}", body);
}

async fn list_names(state: &AppState) -> Vec<String> {
    let (_, body) = send(state, "GET", "/api/employees", None).await;
    body.as_array()
        .unwrap()
        .iter()
        .map(|row| row["Name"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Employee records
// =============================================================================

#[tokio::test]
async fn test_list_starts_empty() {
    let state = create_test_state();
    let (status, body) = send(&state, "GET", "/api/employees", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_add_defaults_absences_and_remarks() {
    let state = create_test_state();
    add_employee(&state, "Asha", json!(271000)).await;

    let (_, body) = send(&state, "GET", "/api/employees", None).await;
    let row = &body[0];
    assert_eq!(row["Name"], "Asha");
    assert_eq!(row["Annual_Package"], 271000.0);
    for month in [
        "January", "February", "March", "April", "May", "June", "July", "August",
        "September", "October", "November", "December",
    ] {
        assert_eq!(row[format!("{}_Absent", month)], 0, "{} absences", month);
    }
    assert_eq!(row["Remarks"], "");
}

#[tokio::test]
async fn test_add_accepts_string_package() {
    let state = create_test_state();
    add_employee(&state, "Ravi", json!("542000.50")).await;

    let (_, body) = send(&state, "GET", "/api/employees", None).await;
    assert_eq!(body[0]["Annual_Package"].as_f64(), Some(542000.5));
}

#[tokio::test]
async fn test_add_rejects_non_numeric_package() {
    let state = create_test_state();
    let (status, body) = send(
        &state,
        "POST",
        "/api/employees",
        Some(json!({"name": "Asha", "annual_package": "plenty"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(list_names(&state).await.is_empty());
}

#[tokio::test]
async fn test_add_missing_name_is_rejected() {
    let state = create_test_state();
    let (status, body) = send(
        &state,
        "POST",
        "/api/employees",
        Some(json!({"annual_package": 1000})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("missing field"));
}

#[tokio::test]
async fn test_update_name_only() {
    let state = create_test_state();
    add_employee(&state, "Asha", json!(271000)).await;
    add_employee(&state, "Ravi", json!(542000)).await;
    let (_, before) = send(&state, "GET", "/api/employees", None).await;

    let (status, body) = send(
        &state,
        "PUT",
        "/api/employees/0",
        Some(json!({"name": "Asha K"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, after) = send(&state, "GET", "/api/employees", None).await;
    let mut expected = before.clone();
    expected[0]["Name"] = json!("Asha K");
    assert_eq!(after, expected);
}

#[tokio::test]
async fn test_update_absences_and_remarks() {
    let state = create_test_state();
    add_employee(&state, "Asha", json!(271000)).await;

    let (status, _) = send(
        &state,
        "PUT",
        "/api/employees/0",
        Some(json!({"March_Absent": 2, "July_Absent": "5", "Remarks": "leave"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&state, "GET", "/api/employees", None).await;
    assert_eq!(body[0]["March_Absent"], 2);
    assert_eq!(body[0]["July_Absent"], 5);
    assert_eq!(body[0]["April_Absent"], 0);
    assert_eq!(body[0]["Remarks"], "leave");
}

#[tokio::test]
async fn test_update_bad_absence_changes_nothing() {
    let state = create_test_state();
    add_employee(&state, "Asha", json!(271000)).await;
    let (_, before) = send(&state, "GET", "/api/employees", None).await;

    let (status, body) = send(
        &state,
        "PUT",
        "/api/employees/0",
        Some(json!({"name": "Changed", "May_Absent": "two"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (_, after) = send(&state, "GET", "/api/employees", None).await;
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_update_out_of_range_returns_404() {
    let state = create_test_state();
    add_employee(&state, "Asha", json!(271000)).await;

    let (status, body) = send(
        &state,
        "PUT",
        "/api/employees/1",
        Some(json!({"name": "Nobody"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
}

#[tokio::test]
async fn test_delete_shifts_indices() {
    let state = create_test_state();
    for name in ["A", "B", "C", "D"] {
        add_employee(&state, name, json!(100000)).await;
    }

    let (status, body) = send(&state, "DELETE", "/api/employees/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee deleted successfully");
    assert_eq!(list_names(&state).await, vec!["A", "C", "D"]);

    // Index 1 now refers to what used to be index 2
    send(&state, "DELETE", "/api/employees/1", None).await;
    assert_eq!(list_names(&state).await, vec!["A", "D"]);
}

#[tokio::test]
async fn test_delete_out_of_range_returns_404() {
    let state = create_test_state();
    let (status, body) = send(&state, "DELETE", "/api/employees/0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
}

#[tokio::test]
async fn test_negative_index_returns_404() {
    let state = create_test_state();
    add_employee(&state, "A", json!(1)).await;
    let (status, _) = send(&state, "DELETE", "/api/employees/-1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(list_names(&state).await, vec!["A"]);
}

#[tokio::test]
async fn test_malformed_json_body() {
    let state = create_test_state();
    let (status, bytes) = send_raw(
        create_router(state),
        "PUT",
        "/api/working-days",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "MISSING_CONTENT_TYPE");
}

// =============================================================================
// Salary report
// =============================================================================

#[tokio::test]
async fn test_salary_report_for_no_employees() {
    let state = create_test_state();
    let (status, body) = send(&state, "GET", "/api/salary-data", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employees"], json!([]));
    let totals = body["monthly_totals"].as_object().unwrap();
    assert_eq!(totals.len(), 12);
    for total in totals.values() {
        assert_amount(total, "0");
    }
    assert_amount(&body["grand_total"], "0");
    assert_eq!(body["working_days"]["January"], 23);
}

#[tokio::test]
async fn test_salary_reference_scenario() {
    let state = create_test_state();
    add_employee(&state, "Asha", json!(271000)).await;
    send(
        &state,
        "PUT",
        "/api/employees/0",
        Some(json!({"January_Absent": 3})),
    )
    .await;

    let (_, body) = send(&state, "GET", "/api/salary-data", None).await;
    let asha = &body["employees"][0];

    assert_eq!(asha["name"], "Asha");
    // 23 working days, 3 absent: 20 days at 1000.00
    assert_amount(&asha["monthly_salaries"]["January"], "20000.00");
    assert_amount(&asha["monthly_salaries"]["February"], "22000.00");
    assert_amount(&asha["total_salary"], "268000.00");
    assert_amount(&body["monthly_totals"]["January"], "20000.00");
    assert_amount(&body["grand_total"], "268000.00");
}

#[tokio::test]
async fn test_salary_over_absence_pays_nothing() {
    let state = create_test_state();
    add_employee(&state, "Asha", json!(271000)).await;
    send(
        &state,
        "PUT",
        "/api/employees/0",
        Some(json!({"February_Absent": 30})),
    )
    .await;

    let (_, body) = send(&state, "GET", "/api/salary-data", None).await;
    assert_amount(&body["employees"][0]["monthly_salaries"]["February"], "0");
}

#[tokio::test]
async fn test_salary_totals_across_employees() {
    let state = create_test_state();
    add_employee(&state, "Asha", json!(271000)).await;
    add_employee(&state, "Ravi", json!(542000)).await;

    let (_, body) = send(&state, "GET", "/api/salary-data", None).await;
    assert_amount(&body["monthly_totals"]["March"], "69000.00");
    assert_amount(&body["grand_total"], "813000.00");
    assert_amount(&body["employees"][1]["total_salary"], "542000.00");
}

#[tokio::test]
async fn test_salary_totals_past_decimal_range_are_rejected() {
    let state = create_test_state();
    add_employee(&state, "First", json!("5e28")).await;
    add_employee(&state, "Second", json!("5e28")).await;

    let (status, body) = send(&state, "GET", "/api/salary-data", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_RECORD");
    assert!(body["message"].as_str().unwrap().contains("Second"));

    let (status, body) = send(&state, "GET", "/api/export/salary/csv", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_RECORD");

    // Removing the record that tips the total makes the report work again
    send(&state, "DELETE", "/api/employees/1", None).await;
    let (status, _) = send(&state, "GET", "/api/salary-data", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_salary_rejects_negative_package() {
    let state = create_test_state();
    add_employee(&state, "Asha", json!(271000)).await;
    add_employee(&state, "Broken", json!(-100)).await;

    let (status, body) = send(&state, "GET", "/api/salary-data", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_RECORD");
    assert!(body["message"].as_str().unwrap().contains("Broken"));
}

// =============================================================================
// Working days
// =============================================================================

#[tokio::test]
async fn test_get_default_working_days() {
    let state = create_test_state();
    let (status, body) = send(&state, "GET", "/api/working-days", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["January"], 23);
    assert_eq!(body["February"], 22);
    assert_eq!(body["December"], 23);
}

#[tokio::test]
async fn test_update_february_working_days() {
    let state = create_test_state();
    let (_, defaults) = send(&state, "GET", "/api/working-days", None).await;

    let (status, body) = send(
        &state,
        "PUT",
        "/api/working-days",
        Some(json!({"February": 20})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["working_days"]["February"], 20);

    let (_, after) = send(&state, "GET", "/api/working-days", None).await;
    let mut expected = defaults.clone();
    expected["February"] = json!(20);
    assert_eq!(after, expected);
}

#[tokio::test]
async fn test_working_days_update_reports_unknown_keys() {
    let state = create_test_state();
    let (status, body) = send(
        &state,
        "PUT",
        "/api/working-days",
        Some(json!({"Febuary": 20, "March": "21"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ignored_keys"], json!(["Febuary"]));
    assert_eq!(body["working_days"]["February"], 22);
    assert_eq!(body["working_days"]["March"], 21);
}

#[tokio::test]
async fn test_working_days_update_rejects_bad_value() {
    let state = create_test_state();
    let (status, body) = send(
        &state,
        "PUT",
        "/api/working-days",
        Some(json!({"April": "some"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_working_days_update_rejects_more_than_a_month_holds() {
    let state = create_test_state();
    add_employee(&state, "Big", json!("1e25")).await;

    for days in [json!(4_000_000_000u64), json!(32)] {
        let (status, body) = send(
            &state,
            "PUT",
            "/api/working-days",
            Some(json!({"January": days})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    let (_, body) = send(&state, "GET", "/api/working-days", None).await;
    assert_eq!(body["January"], 23);

    let (status, _) = send(&state, "GET", "/api/salary-data", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_working_days_change_flows_into_report() {
    let state = create_test_state();
    add_employee(&state, "Asha", json!(271000)).await;
    send(
        &state,
        "PUT",
        "/api/working-days",
        Some(json!({"February": 20})),
    )
    .await;

    let (_, body) = send(&state, "GET", "/api/salary-data", None).await;
    assert_eq!(body["working_days"]["February"], 20);
    assert_amount(&body["employees"][0]["monthly_salaries"]["February"], "20000.00");
}

// =============================================================================
// Exports
// =============================================================================

#[tokio::test]
async fn test_export_attendance_csv() {
    let state = create_test_state();
    add_employee(&state, "Asha", json!(271000)).await;
    send(
        &state,
        "PUT",
        "/api/employees/0",
        Some(json!({"January_Absent": 3, "Remarks": "flu"})),
    )
    .await;

    let (status, bytes) = send_raw(
        create_router(state),
        "GET",
        "/api/export/attendance/csv",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let text = String::from_utf8(bytes).unwrap();
    let mut lines = text.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("Employee Name,Annual Package (₹),Jan Absent Days,Feb Absent Days"));
    assert!(header.ends_with("Dec Absent Days,Remarks"));
    assert_eq!(lines.next().unwrap(), "Asha,271000,3,0,0,0,0,0,0,0,0,0,0,0,flu");
}

#[tokio::test]
async fn test_export_salary_csv_has_totals_row() {
    let state = create_test_state();
    add_employee(&state, "Asha", json!(271000)).await;

    let router = create_router(state);
    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/export/salary/csv")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/csv");
    assert!(
        response.headers()["content-disposition"]
            .to_str()
            .unwrap()
            .contains("salary_data.csv")
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("Dec Salary (₹),Total Salary (₹)"));
    assert!(lines[2].starts_with("MONTHLY TOTAL,,23000.00,22000.00"));
    assert!(lines[2].ends_with(",271000.00"));
}

#[tokio::test]
async fn test_export_excel() {
    let state = create_test_state();
    add_employee(&state, "Asha", json!(271000)).await;

    for kind in ["attendance", "salary"] {
        let (status, bytes) = send_raw(
            create_router(state.clone()),
            "GET",
            &format!("/api/export/{}/excel", kind),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{} export", kind);
        assert_eq!(&bytes[..2], b"PK");
    }
}

#[tokio::test]
async fn test_export_invalid_format() {
    let state = create_test_state();
    let (status, body) = send(&state, "GET", "/api/export/attendance/pdf", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "UNSUPPORTED_FORMAT");
}

// =============================================================================
// Record file persistence
// =============================================================================

#[tokio::test]
async fn test_records_persist_in_csv_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employee_data.csv");

    let state = AppState::new(
        EmployeeStore::new(CsvFileStore::new(&path)),
        WorkingDaysConfig::default(),
    );
    add_employee(&state, "Asha", json!(271000)).await;
    add_employee(&state, "Ravi", json!(542000)).await;
    send(&state, "DELETE", "/api/employees/0", None).await;

    // A fresh state over the same file sees the same records
    let reopened = AppState::new(
        EmployeeStore::new(CsvFileStore::new(&path)),
        WorkingDaysConfig::default(),
    );
    assert_eq!(list_names(&reopened).await, vec!["Ravi"]);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("Name,Annual_Package,January_Absent"));
}

#[tokio::test]
async fn test_corrupt_record_file_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("employee_data.csv");
    std::fs::write(&path, "Name,Annual_Package\nAsha,not-a-number\n").unwrap();

    let state = AppState::new(
        EmployeeStore::new(CsvFileStore::new(&path)),
        WorkingDaysConfig::default(),
    );

    let (status, body) = send(&state, "GET", "/api/employees", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&state, "GET", "/api/salary-data", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_amount(&body["grand_total"], "0");
}

#[tokio::test]
async fn test_state_from_shipped_settings() {
    let mut config = ConfigLoader::load("./config/service.yaml")
        .expect("Failed to load config")
        .into_config();
    let dir = tempfile::tempdir().unwrap();
    config.data_file = dir.path().join("employee_data.csv");

    let state = AppState::from_config(&config);
    add_employee(&state, "Asha", json!(271000)).await;
    assert!(config.data_file.exists());
    assert_eq!(list_names(&state).await, vec!["Asha"]);
}
