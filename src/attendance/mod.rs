//! Attendance tracking.
//!
//! [`AttendanceEngine`] handles clock-in and clock-out, the daily generation
//! and absent sweeps, and attendance reporting. It borrows a storage backend
//! and a schedule policy and holds no state of its own, so it is cheap to
//! build per request.
//!
//! # Example
//!
//! ```
//! use payroll_engine::attendance::AttendanceEngine;
//! use payroll_engine::config::ScheduleBook;
//! use payroll_engine::models::{AttendanceStatus, Employee, WorkSchedule};
//! use payroll_engine::store::InMemoryStore;
//! use chrono::{NaiveDate, NaiveTime};
//! use rust_decimal::Decimal;
//!
//! let store = InMemoryStore::new();
//! store.add_employee(Employee::new("emp_001", "Ana Reyes", Decimal::new(100, 0)));
//! let schedules = ScheduleBook::new(vec![WorkSchedule {
//!     version: 1,
//!     effective_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
//!     start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
//!     end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
//!     grace_minutes: 15,
//!     late_deduction_amount: Decimal::new(10, 0),
//! }])
//! .unwrap();
//!
//! let engine = AttendanceEngine::new(&store, &schedules);
//! let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
//! let record = engine
//!     .clock_in("emp_001", date, date.and_hms_opt(8, 20, 0).unwrap())
//!     .unwrap();
//!
//! assert_eq!(record.status, AttendanceStatus::Late);
//! assert_eq!(record.late_minutes, 5);
//! ```

mod clock;
mod status;
mod summary;
mod sweep;

use chrono::NaiveDate;

use crate::config::SchedulePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::Employee;
use crate::reconciliation;
use crate::store::{EmployeeDirectory, EngineStore, HolidayCalendar};

pub use status::{DayContext, PunchMetrics, derive_status, punch_metrics, reconcile_record};
pub use summary::{AttendanceSummary, DailyReport, StatusCounts};
pub use sweep::{GenerationSummary, format_time_remaining};

/// Attendance operations over a storage backend and schedule policy.
pub struct AttendanceEngine<'a, S: ?Sized, P: ?Sized> {
    store: &'a S,
    policy: &'a P,
}

impl<'a, S, P> AttendanceEngine<'a, S, P>
where
    S: EngineStore + ?Sized,
    P: SchedulePolicy + ?Sized,
{
    /// Creates an engine borrowing the given collaborators.
    pub fn new(store: &'a S, policy: &'a P) -> Self {
        Self { store, policy }
    }

    fn require_employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.store
            .employee(employee_id)?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    fn day_context(
        &self,
        employee_id: &str,
        date: NaiveDate,
        day_ended: bool,
    ) -> EngineResult<DayContext> {
        Ok(DayContext {
            is_holiday: self.store.is_holiday(date)?,
            is_on_leave: reconciliation::is_on_leave(self.store, employee_id, date)?,
            day_ended,
        })
    }
}
