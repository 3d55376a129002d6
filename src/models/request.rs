//! Leave and overtime request models.
//!
//! Requests are filed and approved elsewhere; the engine only reads them.
//! Only requests with [`RequestStatus::Approved`] have any effect.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Approval state of a leave or overtime request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved by a manager.
    Approved,
    /// Rejected by a manager.
    Rejected,
}

/// A leave request covering an inclusive date range.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{LeaveRequest, RequestStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let leave = LeaveRequest {
///     id: "leave_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     leave_type: "vacation".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 3, 4).unwrap(),
///     days_requested: Decimal::new(3, 0),
///     status: RequestStatus::Approved,
/// };
/// assert!(leave.covers(NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()));
/// assert!(!leave.covers(NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier.
    pub id: String,
    /// The requesting employee.
    pub employee_id: String,
    /// Leave category (e.g. "vacation", "sick").
    pub leave_type: String,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Number of days requested.
    pub days_requested: Decimal,
    /// Approval state.
    pub status: RequestStatus,
}

impl LeaveRequest {
    /// Returns true if `date` falls inside the leave range.
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if the request is approved.
    pub fn is_approved(&self) -> bool {
        self.status == RequestStatus::Approved
    }
}

/// An overtime request for a specific date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeRequest {
    /// Unique identifier.
    pub id: String,
    /// The requesting employee.
    pub employee_id: String,
    /// Overtime category name (e.g. "regular", "rest_day").
    pub overtime_type: String,
    /// The date the overtime was worked.
    pub request_date: NaiveDate,
    /// Start of the overtime block.
    pub start_time: NaiveTime,
    /// End of the overtime block.
    pub end_time: NaiveTime,
    /// Approved hours.
    pub hours: Decimal,
    /// Pay multiplier for the overtime type (e.g. 1.5).
    pub multiplier: Decimal,
    /// Approval state.
    pub status: RequestStatus,
}

impl OvertimeRequest {
    /// Returns true if the request is approved.
    pub fn is_approved(&self) -> bool {
        self.status == RequestStatus::Approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Approved).unwrap(),
            "\"approved\""
        );
    }

    #[test]
    fn test_single_day_leave_covers_only_that_day() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let leave = LeaveRequest {
            id: "leave_001".to_string(),
            employee_id: "emp_001".to_string(),
            leave_type: "sick".to_string(),
            start_date: day,
            end_date: day,
            days_requested: Decimal::ONE,
            status: RequestStatus::Pending,
        };
        assert!(leave.covers(day));
        assert!(!leave.covers(day.succ_opt().unwrap()));
        assert!(!leave.is_approved());
    }
}
