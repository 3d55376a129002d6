//! Request types for the attendance and payroll API.
//!
//! Optional `now`/`timestamp` fields default to the organization's current
//! local time; supplying them makes a request reproducible.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::PayrollId;

/// Body for `POST /attendance/clock-in` and `POST /attendance/clock-out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockRequest {
    /// The employee punching.
    pub employee_id: String,
    /// When the punch happened, in organization local time.
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
    /// The work date the punch belongs to. Defaults to the timestamp's date;
    /// set it when clocking out of an overnight shift.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl ClockRequest {
    /// Resolves the punch time and work date against the current time.
    pub fn resolve(&self, now: NaiveDateTime) -> (NaiveDate, NaiveDateTime) {
        let timestamp = self.timestamp.unwrap_or(now);
        (self.date.unwrap_or(timestamp.date()), timestamp)
    }
}

/// Body for `POST /attendance/generate` and `POST /attendance/mark-absent`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepRequest {
    /// The work date. Defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// The current time used for day-ended checks.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

/// Body for `POST /attendance/refresh`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// The employee whose record is refreshed.
    pub employee_id: String,
    /// The work date.
    pub date: NaiveDate,
    /// The current time used for day-ended checks.
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

/// Query for `GET /attendance/summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryQuery {
    /// The employee.
    pub employee_id: String,
    /// First date, inclusive.
    pub start_date: NaiveDate,
    /// Last date, inclusive.
    pub end_date: NaiveDate,
}

/// Query for `GET /attendance/daily-report`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyReportQuery {
    /// The work date. Defaults to today.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Body for `POST /payroll/calculate` and `POST /payroll`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// The employee.
    pub employee_id: String,
    /// First date of the period, inclusive.
    pub start_date: NaiveDate,
    /// Last date of the period, inclusive.
    pub end_date: NaiveDate,
    /// Allowances added to gross pay.
    #[serde(default)]
    pub allowances: Decimal,
}

/// Body for `POST /payroll/check-overlap`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlapRequest {
    /// The employee.
    pub employee_id: String,
    /// First date of the candidate period.
    pub start_date: NaiveDate,
    /// Last date of the candidate period.
    pub end_date: NaiveDate,
    /// A record to ignore, typically the one being edited.
    #[serde(default)]
    pub exclude_id: Option<PayrollId>,
}

/// Body for `POST /payroll/process`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRequest {
    /// Records to mark as paid.
    pub payroll_ids: Vec<PayrollId>,
    /// The payment date. Defaults to today.
    #[serde(default)]
    pub paid_date: Option<NaiveDate>,
}
