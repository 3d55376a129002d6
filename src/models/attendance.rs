//! Attendance record model and related types.
//!
//! An [`AttendanceRecord`] exists at most once per employee per work date.
//! Its status is always a function of the punches, the schedule, and the
//! holiday/leave context; see [`crate::attendance::derive_status`].

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The status of one employee's work day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Clocked in within the grace window.
    Present,
    /// Clocked in after the grace window.
    Late,
    /// Completed day with fewer hours than half the scheduled length.
    HalfDay,
    /// No clock-in by the end of the working day.
    Absent,
    /// Covered by an approved leave request.
    OnLeave,
    /// The date is an organization holiday.
    Holiday,
    /// Working day still in progress and no clock-in yet.
    Pending,
}

impl AttendanceStatus {
    /// Returns true for statuses that come from a clock-in.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::AttendanceStatus;
    ///
    /// assert!(AttendanceStatus::Late.is_worked());
    /// assert!(!AttendanceStatus::OnLeave.is_worked());
    /// ```
    pub fn is_worked(&self) -> bool {
        matches!(
            self,
            AttendanceStatus::Present | AttendanceStatus::Late | AttendanceStatus::HalfDay
        )
    }

    /// Returns true for statuses that override punch data.
    pub fn is_override(&self) -> bool {
        matches!(self, AttendanceStatus::Holiday | AttendanceStatus::OnLeave)
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AttendanceStatus::Present => "Present",
            AttendanceStatus::Late => "Late",
            AttendanceStatus::HalfDay => "Half Day",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::OnLeave => "On Leave",
            AttendanceStatus::Holiday => "Holiday",
            AttendanceStatus::Pending => "Pending",
        };
        f.write_str(label)
    }
}

/// Clock-in and clock-out timestamps for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Punches {
    /// When the employee clocked in, if they have.
    pub clock_in: Option<NaiveDateTime>,
    /// When the employee clocked out, if they have.
    pub clock_out: Option<NaiveDateTime>,
}

/// One employee's attendance for one work date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The employee this record belongs to.
    pub employee_id: String,
    /// The work date (the date the scheduled day begins on).
    pub date: NaiveDate,
    /// Clock-in timestamp in organization local time.
    pub clock_in: Option<NaiveDateTime>,
    /// Clock-out timestamp in organization local time.
    pub clock_out: Option<NaiveDateTime>,
    /// The derived status.
    pub status: AttendanceStatus,
    /// Minutes late past the grace window. Zero when an override applies.
    pub late_minutes: u32,
    /// Hours worked past the scheduled end, never more than `hours_worked`.
    pub overtime_hours: Decimal,
    /// Hours between clock-in and clock-out.
    pub hours_worked: Decimal,
    /// The schedule version used to derive this record.
    pub schedule_version: u32,
    /// Optimistic concurrency token, bumped by the store on every write.
    pub revision: u64,
}

impl AttendanceRecord {
    /// Creates an empty `Pending` record for the given employee and date.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{AttendanceRecord, AttendanceStatus};
    /// use chrono::NaiveDate;
    ///
    /// let record = AttendanceRecord::new(
    ///     "emp_001",
    ///     NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
    ///     1,
    /// );
    /// assert_eq!(record.status, AttendanceStatus::Pending);
    /// assert!(record.clock_in.is_none());
    /// ```
    pub fn new(employee_id: impl Into<String>, date: NaiveDate, schedule_version: u32) -> Self {
        Self {
            employee_id: employee_id.into(),
            date,
            clock_in: None,
            clock_out: None,
            status: AttendanceStatus::Pending,
            late_minutes: 0,
            overtime_hours: Decimal::ZERO,
            hours_worked: Decimal::ZERO,
            schedule_version,
            revision: 0,
        }
    }

    /// Returns the punch pair of this record.
    pub fn punches(&self) -> Punches {
        Punches {
            clock_in: self.clock_in,
            clock_out: self.clock_out,
        }
    }

    /// Returns true if this day counts as a late occurrence.
    pub fn is_late(&self) -> bool {
        self.late_minutes > 0 && !self.status.is_override()
    }
}

/// Hours between two timestamps as an exact decimal of whole minutes.
///
/// Seconds are truncated. Negative spans yield a negative result.
///
/// # Example
///
/// ```
/// use payroll_engine::models::hours_between;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let hours = hours_between(
///     day.and_hms_opt(8, 0, 0).unwrap(),
///     day.and_hms_opt(12, 30, 0).unwrap(),
/// );
/// assert_eq!(hours, Decimal::new(45, 1));
/// ```
pub fn hours_between(from: NaiveDateTime, to: NaiveDateTime) -> Decimal {
    Decimal::from((to - from).num_minutes()) / Decimal::from(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::HalfDay).unwrap(),
            "\"half_day\""
        );
        assert_eq!(
            serde_json::from_str::<AttendanceStatus>("\"on_leave\"").unwrap(),
            AttendanceStatus::OnLeave
        );
    }

    #[test]
    fn test_status_display_uses_readable_labels() {
        assert_eq!(AttendanceStatus::OnLeave.to_string(), "On Leave");
        assert_eq!(AttendanceStatus::HalfDay.to_string(), "Half Day");
    }

    #[test]
    fn test_overridden_day_is_never_late() {
        let mut record = AttendanceRecord::new("emp_001", date(), 1);
        record.late_minutes = 12;
        record.status = AttendanceStatus::Late;
        assert!(record.is_late());

        record.status = AttendanceStatus::Holiday;
        assert!(!record.is_late());
    }

    #[test]
    fn test_hours_between_truncates_seconds() {
        let from = date().and_hms_opt(8, 0, 0).unwrap();
        let to = date().and_hms_opt(8, 30, 59).unwrap();
        assert_eq!(hours_between(from, to), Decimal::new(5, 1));
    }
}
