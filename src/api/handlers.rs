//! HTTP request handlers for the attendance and payroll API.
//!
//! This module contains the handler functions for all API endpoints. Each
//! handler tags its work with a correlation id, delegates to the engines, and
//! maps engine errors through [`ApiErrorResponse`].

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::PayrollId;

use super::request::{
    ClockRequest, DailyReportQuery, OverlapRequest, PayrollRequest, ProcessRequest,
    RefreshRequest, SummaryQuery, SweepRequest,
};
use super::response::{ApiError, ApiErrorResponse, DeletedResponse, OverlapResponse};
use super::state::AppState;

type HandlerResult = Result<Response, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/clock-in", post(clock_in_handler))
        .route("/attendance/clock-out", post(clock_out_handler))
        .route("/attendance/generate", post(generate_handler))
        .route("/attendance/mark-absent", post(mark_absent_handler))
        .route("/attendance/refresh", post(refresh_handler))
        .route("/attendance/summary", get(summary_handler))
        .route("/attendance/daily-report", get(daily_report_handler))
        .route("/payroll", post(create_payroll_handler))
        .route("/payroll/calculate", post(calculate_payroll_handler))
        .route("/payroll/check-overlap", post(check_overlap_handler))
        .route("/payroll/process", post(process_payroll_handler))
        .route(
            "/payroll/:id",
            get(get_payroll_handler).delete(delete_payroll_handler),
        )
        .route("/payroll/:id/recalculate", post(recalculate_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Batch endpoints answer 422 only when every item failed.
fn batch_status(is_success: bool) -> StatusCode {
    if is_success {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    }
}

fn engine_failure(correlation_id: Uuid, operation: &str, error: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        operation,
        code = error.code(),
        error = %error,
        "Request failed"
    );
    error.into()
}

fn parse_json<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's field-level message.
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
    Err(ApiErrorResponse::bad_request(error))
}

fn parse_query<T>(
    correlation_id: Uuid,
    query: Result<Query<T>, QueryRejection>,
) -> Result<T, ApiErrorResponse> {
    query.map(|Query(q)| q).map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "Query string rejected"
        );
        ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
    })
}

fn current_time(
    state: &AppState,
    correlation_id: Uuid,
    given: Option<NaiveDateTime>,
) -> Result<NaiveDateTime, ApiErrorResponse> {
    match given {
        Some(now) => Ok(now),
        None => state
            .config()
            .now()
            .map_err(|e| engine_failure(correlation_id, "clock", e)),
    }
}

// =============================================================================
// Attendance
// =============================================================================

/// Handler for POST /attendance/clock-in.
async fn clock_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        "Processing clock-in request"
    );

    let now = current_time(&state, correlation_id, request.timestamp)?;
    let (date, timestamp) = request.resolve(now);
    let record = state
        .attendance()
        .clock_in(&request.employee_id, date, timestamp)
        .map_err(|e| engine_failure(correlation_id, "clock_in", e))?;

    Ok(json_response(StatusCode::OK, record))
}

/// Handler for POST /attendance/clock-out.
async fn clock_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        "Processing clock-out request"
    );

    let now = current_time(&state, correlation_id, request.timestamp)?;
    let (date, timestamp) = request.resolve(now);
    let record = state
        .attendance()
        .clock_out(&request.employee_id, date, timestamp)
        .map_err(|e| engine_failure(correlation_id, "clock_out", e))?;

    Ok(json_response(StatusCode::OK, record))
}

/// Handler for POST /attendance/generate.
async fn generate_handler(
    State(state): State<AppState>,
    payload: Result<Json<SweepRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;
    let now = current_time(&state, correlation_id, request.now)?;
    let date = request.date.unwrap_or(now.date());
    info!(correlation_id = %correlation_id, %date, "Generating attendance");

    let summary = state
        .attendance()
        .generate_for_date(date, now)
        .map_err(|e| engine_failure(correlation_id, "generate", e))?;

    Ok(json_response(StatusCode::OK, summary))
}

/// Handler for POST /attendance/mark-absent.
async fn mark_absent_handler(
    State(state): State<AppState>,
    payload: Result<Json<SweepRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;
    let now = current_time(&state, correlation_id, request.now)?;
    let date = request.date.unwrap_or(now.date());
    info!(correlation_id = %correlation_id, %date, "Running absent sweep");

    let outcome = state
        .attendance()
        .mark_absent_sweep(date, now)
        .map_err(|e| engine_failure(correlation_id, "mark_absent", e))?;

    Ok(json_response(batch_status(outcome.is_success()), outcome))
}

/// Handler for POST /attendance/refresh.
async fn refresh_handler(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;
    let now = current_time(&state, correlation_id, request.now)?;

    let record = state
        .attendance()
        .refresh_status(&request.employee_id, request.date, now)
        .map_err(|e| engine_failure(correlation_id, "refresh", e))?;

    Ok(json_response(StatusCode::OK, record))
}

/// Handler for GET /attendance/summary.
async fn summary_handler(
    State(state): State<AppState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let query = parse_query(correlation_id, query)?;

    let summary = state
        .attendance()
        .attendance_summary(&query.employee_id, query.start_date, query.end_date)
        .map_err(|e| engine_failure(correlation_id, "summary", e))?;

    Ok(json_response(StatusCode::OK, summary))
}

/// Handler for GET /attendance/daily-report.
async fn daily_report_handler(
    State(state): State<AppState>,
    query: Result<Query<DailyReportQuery>, QueryRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let query = parse_query(correlation_id, query)?;
    let date = match query.date {
        Some(date) => date,
        None => state
            .config()
            .today()
            .map_err(|e| engine_failure(correlation_id, "daily_report", e))?,
    };

    let report = state
        .attendance()
        .daily_report(date)
        .map_err(|e| engine_failure(correlation_id, "daily_report", e))?;

    Ok(json_response(StatusCode::OK, report))
}

// =============================================================================
// Payroll
// =============================================================================

/// Handler for POST /payroll/calculate.
///
/// Returns the computation with its audit trace without saving anything.
async fn calculate_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;
    info!(
        correlation_id = %correlation_id,
        employee_id = %request.employee_id,
        "Processing payroll calculation request"
    );

    let start_time = Instant::now();
    let computation = state
        .payroll()
        .calculate(
            &request.employee_id,
            request.start_date,
            request.end_date,
            request.allowances,
        )
        .map_err(|e| engine_failure(correlation_id, "calculate", e))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = %computation.employee_id,
        net_pay = %computation.net_pay,
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );
    Ok(json_response(StatusCode::OK, computation))
}

/// Handler for POST /payroll.
///
/// Calculates server-side and saves the result as a new record.
async fn create_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;
    let engine = state.payroll();

    let record = engine
        .calculate(
            &request.employee_id,
            request.start_date,
            request.end_date,
            request.allowances,
        )
        .and_then(|computation| engine.save(&computation))
        .map_err(|e| engine_failure(correlation_id, "save", e))?;

    info!(
        correlation_id = %correlation_id,
        payroll_id = %record.id,
        "Payroll record created"
    );
    Ok(json_response(StatusCode::CREATED, record))
}

/// Handler for POST /payroll/check-overlap.
async fn check_overlap_handler(
    State(state): State<AppState>,
    payload: Result<Json<OverlapRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;

    let has_overlap = state
        .payroll()
        .has_overlap(
            &request.employee_id,
            request.start_date,
            request.end_date,
            request.exclude_id,
        )
        .map_err(|e| engine_failure(correlation_id, "check_overlap", e))?;

    Ok(json_response(StatusCode::OK, OverlapResponse { has_overlap }))
}

/// Handler for GET /payroll/{id}.
async fn get_payroll_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let record = state
        .payroll()
        .payroll(PayrollId(id))
        .map_err(|e| engine_failure(correlation_id, "get_payroll", e))?;

    Ok(json_response(StatusCode::OK, record))
}

/// Handler for POST /payroll/{id}/recalculate.
async fn recalculate_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, payroll_id = id, "Processing recalculation request");
    let engine = state.payroll();

    let record = engine
        .payroll(PayrollId(id))
        .and_then(|existing| engine.recalculate(&existing))
        .map_err(|e| engine_failure(correlation_id, "recalculate", e))?;

    Ok(json_response(StatusCode::OK, record))
}

/// Handler for DELETE /payroll/{id}.
async fn delete_payroll_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let payroll_id = PayrollId(id);
    state
        .payroll()
        .delete(payroll_id)
        .map_err(|e| engine_failure(correlation_id, "delete", e))?;

    Ok(json_response(
        StatusCode::OK,
        DeletedResponse {
            payroll_id,
            deleted: true,
        },
    ))
}

/// Handler for POST /payroll/process.
async fn process_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> HandlerResult {
    let correlation_id = Uuid::new_v4();
    let request = parse_json(correlation_id, payload)?;
    let paid_date = match request.paid_date {
        Some(date) => date,
        None => state
            .config()
            .today()
            .map_err(|e| engine_failure(correlation_id, "process", e))?,
    };
    info!(
        correlation_id = %correlation_id,
        records = request.payroll_ids.len(),
        %paid_date,
        "Processing payroll batch"
    );

    let outcome = state
        .payroll()
        .process_batch(&request.payroll_ids, paid_date)
        .map_err(|e| engine_failure(correlation_id, "process", e))?;

    Ok(json_response(batch_status(outcome.is_success()), outcome))
}
