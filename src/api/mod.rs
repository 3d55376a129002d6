//! HTTP API module for the attendance and payroll engine.
//!
//! This module exposes clock-in/out, the daily sweeps, attendance reports,
//! and the payroll lifecycle as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    ClockRequest, DailyReportQuery, OverlapRequest, PayrollRequest, ProcessRequest,
    RefreshRequest, SummaryQuery, SweepRequest,
};
pub use response::{ApiError, ApiErrorResponse, DeletedResponse, OverlapResponse, status_for};
pub use state::AppState;
