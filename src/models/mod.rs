//! Core data models for the attendance and payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod audit;
mod batch;
mod employee;
mod holiday;
mod payroll;
mod period;
mod request;
mod schedule;

pub use attendance::{AttendanceRecord, AttendanceStatus, Punches, hours_between};
pub use audit::AuditStep;
pub use batch::{BatchFailure, BatchOutcome};
pub use employee::Employee;
pub use holiday::Holiday;
pub use payroll::{PayrollComputation, PayrollId, PayrollRecord, PayrollStatus};
pub use period::PayPeriod;
pub use request::{LeaveRequest, OvertimeRequest, RequestStatus};
pub use schedule::{CLOCK_OUT_CUTOFF_HOURS, WorkSchedule};
