//! Integration tests for the attendance and payroll HTTP API.
//!
//! This test suite drives the router end to end against the default
//! configuration and an in-memory store:
//! - Clock-in and clock-out, including rejected punches
//! - Daily generation and the absent sweep
//! - Attendance summary and daily report
//! - Payroll calculate, save, overlap, recalculate, process, delete
//! - Request parsing errors

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::models::{
    Employee, Holiday, LeaveRequest, OvertimeRequest, RequestStatus,
};
use payroll_engine::store::InMemoryStore;

// =============================================================================
// Test Helpers
// =============================================================================

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

/// Seeds two active employees and returns the store plus a router sharing it.
fn setup() -> (InMemoryStore, Router) {
    let store = InMemoryStore::new();
    store.add_employee(Employee::new("emp_001", "Ana Reyes", decimal("100")));
    store.add_employee(Employee::new("emp_002", "Ben Cruz", decimal("80")));

    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    let router = create_router(AppState::new(config, store.clone()));
    (store, router)
}

fn approved_overtime(day: u32, hours: &str) -> OvertimeRequest {
    OvertimeRequest {
        id: format!("ot_{day}"),
        employee_id: "emp_001".to_string(),
        overtime_type: "regular".to_string(),
        request_date: date(day),
        start_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        hours: decimal(hours),
        multiplier: decimal("1.5"),
        status: RequestStatus::Approved,
    }
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    (status, json)
}

async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, "POST", uri, Some(body)).await
}

async fn clock(router: &Router, action: &str, employee_id: &str, timestamp: &str) -> (StatusCode, Value) {
    post(
        router,
        &format!("/attendance/{action}"),
        json!({ "employee_id": employee_id, "timestamp": timestamp }),
    )
    .await
}

/// Compares a decimal field numerically, ignoring trailing zeros.
fn assert_decimal(json: &Value, field: &str, expected: &str) {
    let actual = json[field]
        .as_str()
        .unwrap_or_else(|| panic!("{field} missing in {json}"));
    assert_eq!(
        decimal(actual),
        decimal(expected),
        "{field}: expected {expected}, got {actual}"
    );
}

// =============================================================================
// Clock-in / clock-out
// =============================================================================

#[tokio::test]
async fn test_clock_in_after_grace_is_late() {
    let (_, router) = setup();

    let (status, json) = clock(&router, "clock-in", "emp_001", "2026-03-02T08:20:00").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "late");
    assert_eq!(json["late_minutes"], 5);
    assert_eq!(json["schedule_version"], 2);
}

#[tokio::test]
async fn test_clock_in_within_grace_is_present() {
    let (_, router) = setup();

    let (status, json) = clock(&router, "clock-in", "emp_001", "2026-03-02T08:15:00").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "present");
    assert_eq!(json["late_minutes"], 0);
}

#[tokio::test]
async fn test_duplicate_clock_in_rejected() {
    let (_, router) = setup();
    clock(&router, "clock-in", "emp_001", "2026-03-02T08:00:00").await;

    let (status, json) = clock(&router, "clock-in", "emp_001", "2026-03-02T09:00:00").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "ALREADY_CLOCKED_IN");
}

#[tokio::test]
async fn test_clock_in_unknown_employee() {
    let (_, router) = setup();

    let (status, json) = clock(&router, "clock-in", "ghost", "2026-03-02T08:00:00").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "EMPLOYEE_NOT_FOUND");
}

#[tokio::test]
async fn test_clock_in_outside_work_date_rejected() {
    let (_, router) = setup();

    let (status, json) = post(
        &router,
        "/attendance/clock-in",
        json!({
            "employee_id": "emp_001",
            "date": "2026-03-02",
            "timestamp": "2026-03-12T08:00:00"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "INVALID_PUNCH");
    let (_, report) = send(&router, "GET", "/attendance/daily-report?date=2026-03-02", None).await;
    assert_eq!(report["total_records"], 0);
}

#[tokio::test]
async fn test_clock_out_computes_hours_and_overtime() {
    let (_, router) = setup();
    clock(&router, "clock-in", "emp_001", "2026-03-02T08:00:00").await;

    let (status, json) = clock(&router, "clock-out", "emp_001", "2026-03-02T18:30:00").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "present");
    assert_decimal(&json, "hours_worked", "10.5");
    assert_decimal(&json, "overtime_hours", "1.5");
}

#[tokio::test]
async fn test_early_clock_out_is_half_day() {
    let (_, router) = setup();
    clock(&router, "clock-in", "emp_001", "2026-03-02T08:00:00").await;

    let (_, json) = clock(&router, "clock-out", "emp_001", "2026-03-02T12:00:00").await;

    assert_eq!(json["status"], "half_day");
}

#[tokio::test]
async fn test_clock_out_errors() {
    let (_, router) = setup();

    let (status, json) = clock(&router, "clock-out", "emp_001", "2026-03-02T17:00:00").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "NOT_CLOCKED_IN");

    clock(&router, "clock-in", "emp_001", "2026-03-02T08:00:00").await;
    let (status, json) = post(
        &router,
        "/attendance/clock-out",
        json!({ "employee_id": "emp_001", "date": "2026-03-02", "timestamp": "2026-03-02T07:00:00" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "INVALID_PUNCH");

    clock(&router, "clock-out", "emp_001", "2026-03-02T17:00:00").await;
    let (status, json) = clock(&router, "clock-out", "emp_001", "2026-03-02T17:05:00").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "ALREADY_CLOCKED_OUT");
}

#[tokio::test]
async fn test_clock_in_on_holiday_keeps_holiday_status() {
    let (store, router) = setup();
    store.add_holiday(Holiday {
        date: date(2),
        name: "Founders Day".to_string(),
    });

    let (status, json) = clock(&router, "clock-in", "emp_001", "2026-03-02T09:00:00").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "holiday");
    assert_eq!(json["late_minutes"], 0);
    assert!(json["clock_in"].is_string());
}

// =============================================================================
// Generation and absent sweep
// =============================================================================

#[tokio::test]
async fn test_generate_before_day_end_creates_pending_records() {
    let (_, router) = setup();
    clock(&router, "clock-in", "emp_001", "2026-03-02T08:00:00").await;

    let (status, json) = post(
        &router,
        "/attendance/generate",
        json!({ "date": "2026-03-02", "now": "2026-03-02T10:00:00" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["generated"], 1);
    assert_eq!(json["pending"], 1);
    assert_eq!(json["already_exists"], 1);
}

#[tokio::test]
async fn test_generate_is_idempotent() {
    let (_, router) = setup();
    let body = json!({ "date": "2026-03-02", "now": "2026-03-02T18:00:00" });

    let (_, first) = post(&router, "/attendance/generate", body.clone()).await;
    let (_, second) = post(&router, "/attendance/generate", body).await;

    assert_eq!(first["generated"], 2);
    assert_eq!(first["absent"], 2);
    assert_eq!(second["generated"], 0);
    assert_eq!(second["already_exists"], 2);
}

#[tokio::test]
async fn test_generate_marks_approved_leave() {
    let (store, router) = setup();
    store.add_leave_request(LeaveRequest {
        id: "lv_001".to_string(),
        employee_id: "emp_002".to_string(),
        leave_type: "vacation".to_string(),
        start_date: date(2),
        end_date: date(4),
        days_requested: decimal("3"),
        status: RequestStatus::Approved,
    });

    let (_, json) = post(
        &router,
        "/attendance/generate",
        json!({ "date": "2026-03-03", "now": "2026-03-03T07:00:00" }),
    )
    .await;

    assert_eq!(json["on_leave"], 1);
    assert_eq!(json["pending"], 1);
}

#[tokio::test]
async fn test_mark_absent_before_day_end_reports_time_remaining() {
    let (_, router) = setup();
    post(
        &router,
        "/attendance/generate",
        json!({ "date": "2026-03-02", "now": "2026-03-02T07:00:00" }),
    )
    .await;

    let (status, json) = post(
        &router,
        "/attendance/mark-absent",
        json!({ "date": "2026-03-02", "now": "2026-03-02T10:00:00" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "TIME_REMAINING");
    assert_eq!(
        json["message"],
        "Cannot update status yet. Working hours are still ongoing. Time remaining: 7 hours."
    );
}

#[tokio::test]
async fn test_mark_absent_requires_generated_attendance() {
    let (_, router) = setup();

    let (status, json) = post(
        &router,
        "/attendance/mark-absent",
        json!({ "date": "2026-03-02", "now": "2026-03-02T18:00:00" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "ATTENDANCE_NOT_GENERATED");
}

#[tokio::test]
async fn test_mark_absent_closes_pending_records() {
    let (_, router) = setup();
    clock(&router, "clock-in", "emp_001", "2026-03-02T08:00:00").await;
    post(
        &router,
        "/attendance/generate",
        json!({ "date": "2026-03-02", "now": "2026-03-02T07:30:00" }),
    )
    .await;

    let sweep = json!({ "date": "2026-03-02", "now": "2026-03-02T17:00:00" });
    let (status, json) = post(&router, "/attendance/mark-absent", sweep.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["succeeded"], json!(["emp_002"]));

    let (status, json) = post(&router, "/attendance/mark-absent", sweep).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["succeeded"], json!([]));
}

#[tokio::test]
async fn test_refresh_applies_leave_approved_later() {
    let (store, router) = setup();
    post(
        &router,
        "/attendance/generate",
        json!({ "date": "2026-03-02", "now": "2026-03-02T18:00:00" }),
    )
    .await;
    store.add_leave_request(LeaveRequest {
        id: "lv_002".to_string(),
        employee_id: "emp_002".to_string(),
        leave_type: "sick".to_string(),
        start_date: date(2),
        end_date: date(2),
        days_requested: decimal("1"),
        status: RequestStatus::Approved,
    });

    let (status, json) = post(
        &router,
        "/attendance/refresh",
        json!({ "employee_id": "emp_002", "date": "2026-03-02", "now": "2026-03-02T18:00:00" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "on_leave");
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn test_daily_report_counts_and_rate() {
    let (_, router) = setup();
    clock(&router, "clock-in", "emp_001", "2026-03-02T08:00:00").await;
    clock(&router, "clock-out", "emp_001", "2026-03-02T17:00:00").await;
    post(
        &router,
        "/attendance/generate",
        json!({ "date": "2026-03-02", "now": "2026-03-02T18:00:00" }),
    )
    .await;

    let (status, json) = send(&router, "GET", "/attendance/daily-report?date=2026-03-02", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_records"], 2);
    assert_eq!(json["present"], 1);
    assert_eq!(json["absent"], 1);
    assert_decimal(&json, "attendance_rate", "50");
    assert_decimal(&json, "total_hours", "9");
}

#[tokio::test]
async fn test_attendance_summary_over_range() {
    let (_, router) = setup();
    clock(&router, "clock-in", "emp_001", "2026-03-02T08:20:00").await;
    clock(&router, "clock-out", "emp_001", "2026-03-02T17:00:00").await;
    clock(&router, "clock-in", "emp_001", "2026-03-03T08:00:00").await;
    clock(&router, "clock-out", "emp_001", "2026-03-03T17:00:00").await;

    let (status, json) = send(
        &router,
        "GET",
        "/attendance/summary?employee_id=emp_001&start_date=2026-03-01&end_date=2026-03-31",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_days"], 2);
    assert_eq!(json["late"], 1);
    assert_eq!(json["present"], 1);
    assert_eq!(json["total_late_minutes"], 5);
}

#[tokio::test]
async fn test_summary_with_missing_query_field() {
    let (_, router) = setup();

    let (status, json) = send(&router, "GET", "/attendance/summary?employee_id=emp_001", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Payroll
// =============================================================================

async fn work_late_day_with_overtime(store: &InMemoryStore, router: &Router) {
    clock(router, "clock-in", "emp_001", "2026-03-02T08:20:00").await;
    clock(router, "clock-out", "emp_001", "2026-03-02T17:30:00").await;
    store.add_overtime_request(approved_overtime(2, "1"));
}

fn payroll_body(start: &str, end: &str) -> Value {
    json!({ "employee_id": "emp_001", "start_date": start, "end_date": end })
}

#[tokio::test]
async fn test_calculate_returns_figures_and_audit_trace() {
    let (store, router) = setup();
    work_late_day_with_overtime(&store, &router).await;

    let (status, json) = post(&router, "/payroll/calculate", payroll_body("2026-03-01", "2026-03-15")).await;

    assert_eq!(status, StatusCode::OK);
    assert_decimal(&json, "basic_pay", "916.67");
    assert_decimal(&json, "overtime_pay", "150.00");
    // Schedule version 2 deducts 50.00 per late day
    assert_decimal(&json, "late_deductions", "50.00");
    assert_decimal(&json, "gross_pay", "1066.67");
    assert_decimal(&json, "net_pay", "1016.67");
    assert_eq!(json["audit_trace"].as_array().unwrap().len(), 5);

    // Nothing saved
    let (_, overlap) = post(&router, "/payroll/check-overlap", payroll_body("2026-03-01", "2026-03-31")).await;
    assert_eq!(overlap["has_overlap"], false);
}

#[tokio::test]
async fn test_calculate_rejects_bad_input() {
    let (_, router) = setup();

    let (status, json) = post(&router, "/payroll/calculate", payroll_body("2026-03-15", "2026-03-01")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "INVALID_PERIOD");

    let (status, json) = post(
        &router,
        "/payroll/calculate",
        json!({ "employee_id": "emp_001", "start_date": "2026-03-01", "end_date": "2026-03-15", "allowances": "-5" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], "INVALID_ALLOWANCES");
}

#[tokio::test]
async fn test_save_then_overlapping_save_conflicts() {
    let (store, router) = setup();
    work_late_day_with_overtime(&store, &router).await;

    let (status, saved) = post(&router, "/payroll", payroll_body("2026-03-01", "2026-03-15")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(saved["status"], "calculated");
    assert_decimal(&saved, "net_pay", "1016.67");

    let (status, json) = post(&router, "/payroll", payroll_body("2026-03-15", "2026-03-31")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "PERIOD_OVERLAP");

    let (_, json) = post(&router, "/payroll/check-overlap", payroll_body("2026-03-10", "2026-03-20")).await;
    assert_eq!(json["has_overlap"], true);

    let (_, json) = post(
        &router,
        "/payroll/check-overlap",
        json!({ "employee_id": "emp_001", "start_date": "2026-03-01", "end_date": "2026-03-15", "exclude_id": saved["id"] }),
    )
    .await;
    assert_eq!(json["has_overlap"], false);
}

#[tokio::test]
async fn test_recalculate_picks_up_late_attendance() {
    let (store, router) = setup();
    let (_, saved) = post(&router, "/payroll", payroll_body("2026-03-01", "2026-03-15")).await;
    assert_decimal(&saved, "net_pay", "0");

    work_late_day_with_overtime(&store, &router).await;
    let id = saved["id"].as_u64().unwrap();
    let (status, json) = post(&router, &format!("/payroll/{id}/recalculate"), json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["id"], saved["id"]);
    assert_decimal(&json, "net_pay", "1016.67");

    let (_, fetched) = send(&router, "GET", &format!("/payroll/{id}"), None).await;
    assert_eq!(fetched, json);
}

#[tokio::test]
async fn test_paid_records_are_locked() {
    let (_, router) = setup();
    let (_, saved) = post(&router, "/payroll", payroll_body("2026-03-01", "2026-03-15")).await;
    let id = saved["id"].as_u64().unwrap();

    let (status, json) = post(
        &router,
        "/payroll/process",
        json!({ "payroll_ids": [id], "paid_date": "2026-03-20" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["succeeded"], json!([id]));

    let (_, fetched) = send(&router, "GET", &format!("/payroll/{id}"), None).await;
    assert_eq!(fetched["status"], "paid");
    assert_eq!(fetched["paid_date"], "2026-03-20");

    let (status, json) = post(&router, &format!("/payroll/{id}/recalculate"), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_STATE_TRANSITION");

    let (status, json) = send(&router, "DELETE", &format!("/payroll/{id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_STATE_TRANSITION");
}

#[tokio::test]
async fn test_process_batch_partial_and_total_failure() {
    let (_, router) = setup();
    let (_, saved) = post(&router, "/payroll", payroll_body("2026-03-01", "2026-03-15")).await;
    let id = saved["id"].as_u64().unwrap();

    let (status, json) = post(
        &router,
        "/payroll/process",
        json!({ "payroll_ids": [id, 999], "paid_date": "2026-03-20" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["failed"][0]["key"], 999);
    assert_eq!(json["failed"][0]["code"], "PAYROLL_NOT_FOUND");

    let (status, json) = post(
        &router,
        "/payroll/process",
        json!({ "payroll_ids": [id], "paid_date": "2026-03-21" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["failed"][0]["code"], "INVALID_STATE_TRANSITION");

    let (status, json) = post(&router, "/payroll/process", json!({ "payroll_ids": [] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "EMPTY_BATCH");
}

#[tokio::test]
async fn test_delete_calculated_record_frees_period() {
    let (_, router) = setup();
    let (_, saved) = post(&router, "/payroll", payroll_body("2026-03-01", "2026-03-15")).await;
    let id = saved["id"].as_u64().unwrap();

    let (status, json) = send(&router, "DELETE", &format!("/payroll/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["deleted"], true);

    let (status, _) = send(&router, "GET", &format!("/payroll/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(&router, "/payroll", payroll_body("2026-03-01", "2026-03-15")).await;
    assert_eq!(status, StatusCode::CREATED);
}

// =============================================================================
// Request parsing
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let (_, router) = setup();
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payroll/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(json["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_field_returns_validation_error() {
    let (_, router) = setup();

    let (status, json) = post(&router, "/payroll/calculate", json!({ "employee_id": "emp_001" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["message"].as_str().unwrap().contains("missing field"));
}
