//! Storage collaborator traits.
//!
//! The engine owns no persistence. It reads and writes through these focused
//! traits, one per concern, so a real database backend and the in-memory
//! [`InMemoryStore`] are interchangeable.
//!
//! # Trait Composition
//!
//! Anything implementing all five traits automatically implements
//! [`EngineStore`], which is the bound used by the engine services:
//!
//! ```
//! use payroll_engine::store::{EngineStore, InMemoryStore};
//!
//! fn needs_everything<S: EngineStore + ?Sized>(_store: &S) {}
//!
//! needs_everything(&InMemoryStore::new());
//! ```

mod memory;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{
    AttendanceRecord, Employee, Holiday, LeaveRequest, OvertimeRequest, PayPeriod,
    PayrollComputation, PayrollId, PayrollRecord, PayrollStatus, RequestStatus,
};

pub use memory::InMemoryStore;

/// Errors reported by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An attendance record already exists for the employee and date.
    #[error("attendance record already exists for employee '{employee_id}' on {date}")]
    Duplicate {
        /// The employee identifier.
        employee_id: String,
        /// The work date.
        date: NaiveDate,
    },

    /// The row changed since it was read.
    #[error(
        "attendance record for employee '{employee_id}' on {date} changed since revision {expected}"
    )]
    StaleRevision {
        /// The employee identifier.
        employee_id: String,
        /// The work date.
        date: NaiveDate,
        /// The revision the writer read.
        expected: u64,
    },

    /// The payroll period overlaps an existing record for the same employee.
    #[error("payroll period overlaps existing record {existing}")]
    PeriodConflict {
        /// The conflicting record.
        existing: PayrollId,
    },

    /// The payroll record is not in the status the write requires.
    #[error("payroll record {payroll_id} has status {actual}")]
    StatusMismatch {
        /// The payroll record identifier.
        payroll_id: PayrollId,
        /// The record's current status.
        actual: PayrollStatus,
    },

    /// The row to update or delete does not exist.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Kind of row (e.g. "payroll record").
        entity: &'static str,
        /// Key that was looked up.
        key: String,
    },

    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A type alias for Results that return StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

/// Read access to the employee directory.
pub trait EmployeeDirectory: Send + Sync {
    /// All employees flagged active, ordered by id.
    fn active_employees(&self) -> StoreResult<Vec<Employee>>;

    /// Looks up one employee.
    fn employee(&self, employee_id: &str) -> StoreResult<Option<Employee>>;

    /// The employee's current hourly rate.
    fn hourly_rate(&self, employee_id: &str) -> StoreResult<Option<Decimal>> {
        Ok(self.employee(employee_id)?.map(|e| e.hourly_rate))
    }
}

/// Attendance persistence with per-row optimistic concurrency.
pub trait AttendanceStore: Send + Sync {
    /// The record for one employee and date.
    fn attendance(&self, employee_id: &str, date: NaiveDate)
    -> StoreResult<Option<AttendanceRecord>>;

    /// Every record for a date, ordered by employee id.
    fn attendance_on(&self, date: NaiveDate) -> StoreResult<Vec<AttendanceRecord>>;

    /// An employee's records within a period, ordered by date.
    fn attendance_between(
        &self,
        employee_id: &str,
        period: &PayPeriod,
    ) -> StoreResult<Vec<AttendanceRecord>>;

    /// Inserts a new record.
    ///
    /// Fails with [`StoreError::Duplicate`] if a record already exists for
    /// the same employee and date. Returns the stored row.
    fn insert_attendance(&self, record: AttendanceRecord) -> StoreResult<AttendanceRecord>;

    /// Replaces an existing record.
    ///
    /// `record.revision` must equal the stored revision, otherwise the write
    /// fails with [`StoreError::StaleRevision`]. Returns the stored row with
    /// its new revision.
    fn update_attendance(&self, record: AttendanceRecord) -> StoreResult<AttendanceRecord>;
}

/// Read access to leave and overtime requests.
pub trait RequestStore: Send + Sync {
    /// Leave requests for an employee whose range intersects `period`.
    fn leave_requests(
        &self,
        employee_id: &str,
        status: Option<RequestStatus>,
        period: &PayPeriod,
    ) -> StoreResult<Vec<LeaveRequest>>;

    /// Overtime requests for an employee dated inside `period`.
    fn overtime_requests(
        &self,
        employee_id: &str,
        status: Option<RequestStatus>,
        period: &PayPeriod,
    ) -> StoreResult<Vec<OvertimeRequest>>;
}

/// Read access to the holiday calendar.
pub trait HolidayCalendar: Send + Sync {
    /// The holiday on a date, if any.
    fn holiday_on(&self, date: NaiveDate) -> StoreResult<Option<Holiday>>;

    /// Returns true if the date is a holiday.
    fn is_holiday(&self, date: NaiveDate) -> StoreResult<bool> {
        Ok(self.holiday_on(date)?.is_some())
    }
}

/// Payroll record persistence.
///
/// Implementations must re-check period overlap atomically with every insert
/// and update, so two concurrent writers cannot both succeed.
pub trait PayrollStore: Send + Sync {
    /// Looks up one payroll record.
    fn payroll(&self, payroll_id: PayrollId) -> StoreResult<Option<PayrollRecord>>;

    /// An employee's records whose period overlaps `period`, excluding one id.
    fn overlapping_payrolls(
        &self,
        employee_id: &str,
        period: &PayPeriod,
        excluding: Option<PayrollId>,
    ) -> StoreResult<Vec<PayrollRecord>>;

    /// Persists a computation as a new `Calculated` record.
    ///
    /// Fails with [`StoreError::PeriodConflict`] on overlap.
    fn insert_payroll(&self, computation: &PayrollComputation) -> StoreResult<PayrollRecord>;

    /// Replaces a `Calculated` record.
    ///
    /// Fails with [`StoreError::StatusMismatch`] if the stored record is not
    /// `Calculated`, and with [`StoreError::PeriodConflict`] on overlap.
    fn update_payroll(&self, record: &PayrollRecord) -> StoreResult<()>;

    /// Transitions a `Calculated` record to `Paid`.
    ///
    /// Fails with [`StoreError::StatusMismatch`] if it is already `Paid`.
    fn mark_payroll_paid(
        &self,
        payroll_id: PayrollId,
        paid_date: NaiveDate,
    ) -> StoreResult<PayrollRecord>;

    /// Deletes a `Calculated` record.
    fn delete_payroll(&self, payroll_id: PayrollId) -> StoreResult<()>;
}

/// Composite bound for a complete storage backend.
pub trait EngineStore:
    EmployeeDirectory + AttendanceStore + RequestStore + HolidayCalendar + PayrollStore
{
}

impl<T> EngineStore for T where
    T: EmployeeDirectory + AttendanceStore + RequestStore + HolidayCalendar + PayrollStore
{
}
