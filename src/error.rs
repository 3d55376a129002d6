//! Error types for the attendance and payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report. Each variant belongs to one
//! [`ErrorKind`] so callers can decide how to surface it (user-facing
//! precondition, recoverable conflict, fatal configuration problem, ...).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{PayrollId, PayrollStatus};
use crate::store::StoreError;

/// Broad classification of an [`EngineError`].
///
/// The engine never retries anything itself; the kind tells the caller
/// whether a retry, a different input, or an operator is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The operation is not allowed in the current state (already clocked in,
    /// working day not over, record already paid, ...).
    Precondition,
    /// Configuration is missing or invalid. Fatal for the enclosing operation.
    Configuration,
    /// The request collides with existing data (overlapping pay period,
    /// concurrent writer). Recoverable by choosing different input.
    Conflict,
    /// A referenced entity does not exist.
    NotFound,
    /// The input itself is malformed.
    Validation,
    /// The storage collaborator failed.
    Storage,
}

/// The main error type for the engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::{EngineError, ErrorKind};
/// use chrono::NaiveDate;
///
/// let error = EngineError::AlreadyClockedIn {
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Employee 'emp_001' has already clocked in on 2026-03-02"
/// );
/// assert_eq!(error.kind(), ErrorKind::Precondition);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but is semantically invalid.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },

    /// No work schedule is configured at all.
    #[error("Working hours not configured")]
    NoScheduleConfigured,

    /// No schedule version is effective on the given date.
    #[error("No work schedule is effective on {date}")]
    ScheduleNotEffective {
        /// The date for which a schedule was requested.
        date: NaiveDate,
    },

    /// A pinned schedule version no longer exists in the configuration.
    #[error("Work schedule version {version} not found")]
    ScheduleVersionNotFound {
        /// The missing version.
        version: u32,
    },

    /// The employee is unknown to the employee directory.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The employee identifier.
        employee_id: String,
    },

    /// No attendance record exists for the employee and date.
    #[error("No attendance record for employee '{employee_id}' on {date}")]
    AttendanceNotFound {
        /// The employee identifier.
        employee_id: String,
        /// The work date.
        date: NaiveDate,
    },

    /// The payroll record does not exist.
    #[error("Payroll record not found: {payroll_id}")]
    PayrollNotFound {
        /// The payroll record identifier.
        payroll_id: PayrollId,
    },

    /// A clock-in was attempted on a day that already has one.
    #[error("Employee '{employee_id}' has already clocked in on {date}")]
    AlreadyClockedIn {
        /// The employee identifier.
        employee_id: String,
        /// The work date.
        date: NaiveDate,
    },

    /// A clock-out was attempted without a prior clock-in.
    #[error("Employee '{employee_id}' has not clocked in on {date}")]
    NotClockedIn {
        /// The employee identifier.
        employee_id: String,
        /// The work date.
        date: NaiveDate,
    },

    /// A clock-out was attempted on a day that already has one.
    #[error("Employee '{employee_id}' has already clocked out on {date}")]
    AlreadyClockedOut {
        /// The employee identifier.
        employee_id: String,
        /// The work date.
        date: NaiveDate,
    },

    /// The punch timestamps are inconsistent.
    #[error("Invalid punch: {message}")]
    InvalidPunch {
        /// What is wrong with the punch.
        message: String,
    },

    /// A batch sweep was invoked before the working day ended.
    #[error("Cannot update status yet. {message}")]
    TimeRemaining {
        /// Human-readable remaining time.
        message: String,
    },

    /// The absent sweep found nothing to close for the date.
    #[error("No attendance records found for {date}. Please generate attendance first.")]
    AttendanceNotGenerated {
        /// The work date.
        date: NaiveDate,
    },

    /// The payroll record is not in a state that allows the action.
    #[error("Cannot {action} payroll record {payroll_id} with status {status}")]
    InvalidStateTransition {
        /// The payroll record identifier.
        payroll_id: PayrollId,
        /// The record's current status.
        status: PayrollStatus,
        /// The attempted action (e.g. "process", "recalculate").
        action: String,
    },

    /// A batch operation was invoked with no items.
    #[error("No payroll records selected for processing")]
    EmptyBatch,

    /// The pay period's end precedes its start.
    #[error("Invalid pay period: end date {end_date} is before start date {start_date}")]
    InvalidPeriod {
        /// The period start.
        start_date: NaiveDate,
        /// The period end.
        end_date: NaiveDate,
    },

    /// Allowances must not be negative.
    #[error("Invalid allowances amount: {amount}")]
    InvalidAllowances {
        /// The rejected amount.
        amount: Decimal,
    },

    /// The pay period overlaps an existing payroll record for the employee.
    #[error(
        "A payroll record already exists for employee '{employee_id}' overlapping {start_date} to {end_date} (record {existing})"
    )]
    PeriodOverlap {
        /// The employee identifier.
        employee_id: String,
        /// The requested period start.
        start_date: NaiveDate,
        /// The requested period end.
        end_date: NaiveDate,
        /// The conflicting record.
        existing: PayrollId,
    },

    /// Another writer modified the same row between read and write.
    #[error("Concurrent modification: {message}")]
    ConcurrentModification {
        /// Which row was contended.
        message: String,
    },

    /// The storage collaborator failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl EngineError {
    /// Returns the taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. }
            | EngineError::NoScheduleConfigured
            | EngineError::ScheduleNotEffective { .. }
            | EngineError::ScheduleVersionNotFound { .. } => ErrorKind::Configuration,
            EngineError::EmployeeNotFound { .. }
            | EngineError::AttendanceNotFound { .. }
            | EngineError::PayrollNotFound { .. } => ErrorKind::NotFound,
            EngineError::AlreadyClockedIn { .. }
            | EngineError::NotClockedIn { .. }
            | EngineError::AlreadyClockedOut { .. }
            | EngineError::TimeRemaining { .. }
            | EngineError::AttendanceNotGenerated { .. }
            | EngineError::InvalidStateTransition { .. }
            | EngineError::EmptyBatch => ErrorKind::Precondition,
            EngineError::InvalidPunch { .. }
            | EngineError::InvalidPeriod { .. }
            | EngineError::InvalidAllowances { .. } => ErrorKind::Validation,
            EngineError::PeriodOverlap { .. } | EngineError::ConcurrentModification { .. } => {
                ErrorKind::Conflict
            }
            EngineError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Returns a stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => "CONFIG_ERROR",
            EngineError::NoScheduleConfigured
            | EngineError::ScheduleNotEffective { .. }
            | EngineError::ScheduleVersionNotFound { .. } => "SCHEDULE_NOT_CONFIGURED",
            EngineError::EmployeeNotFound { .. } => "EMPLOYEE_NOT_FOUND",
            EngineError::AttendanceNotFound { .. } => "ATTENDANCE_NOT_FOUND",
            EngineError::PayrollNotFound { .. } => "PAYROLL_NOT_FOUND",
            EngineError::AlreadyClockedIn { .. } => "ALREADY_CLOCKED_IN",
            EngineError::NotClockedIn { .. } => "NOT_CLOCKED_IN",
            EngineError::AlreadyClockedOut { .. } => "ALREADY_CLOCKED_OUT",
            EngineError::InvalidPunch { .. } => "INVALID_PUNCH",
            EngineError::TimeRemaining { .. } => "TIME_REMAINING",
            EngineError::AttendanceNotGenerated { .. } => "ATTENDANCE_NOT_GENERATED",
            EngineError::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            EngineError::EmptyBatch => "EMPTY_BATCH",
            EngineError::InvalidPeriod { .. } => "INVALID_PERIOD",
            EngineError::InvalidAllowances { .. } => "INVALID_ALLOWANCES",
            EngineError::PeriodOverlap { .. } => "PERIOD_OVERLAP",
            EngineError::ConcurrentModification { .. } => "CONCURRENT_MODIFICATION",
            EngineError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
