//! Status derivation for attendance records.
//!
//! The status of a day is a pure function of its punches, the schedule, and
//! the day's context. Precedence, highest first:
//!
//! 1. `Holiday` if the date is an organization holiday
//! 2. `OnLeave` if an approved leave request covers the date
//! 3. punch-derived: `HalfDay` for a completed day shorter than half the
//!    schedule, otherwise `Late` or `Present`
//! 4. `Absent` once the working day has ended with no clock-in
//! 5. `Pending` while the working day is still in progress

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{AttendanceRecord, AttendanceStatus, Punches, WorkSchedule, hours_between};

/// Inputs besides the punches that influence a day's status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayContext {
    /// The date is an organization holiday.
    pub is_holiday: bool,
    /// An approved leave request covers the date.
    pub is_on_leave: bool,
    /// The scheduled end of the working day has passed.
    pub day_ended: bool,
}

/// Figures computed from the punches alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PunchMetrics {
    /// Minutes late past the grace window.
    pub late_minutes: u32,
    /// Hours between clock-in and clock-out.
    pub hours_worked: Decimal,
    /// Hours past the scheduled end, capped at `hours_worked`.
    pub overtime_hours: Decimal,
}

/// Computes lateness, worked hours, and overtime for one day.
///
/// Worked and overtime hours stay zero until both punches exist.
pub fn punch_metrics(punches: &Punches, date: NaiveDate, schedule: &WorkSchedule) -> PunchMetrics {
    let late_minutes = punches
        .clock_in
        .map_or(0, |clock_in| schedule.late_minutes(date, clock_in));

    let (hours_worked, overtime_hours) = match (punches.clock_in, punches.clock_out) {
        (Some(clock_in), Some(clock_out)) => {
            let worked = hours_between(clock_in, clock_out).max(Decimal::ZERO);
            let past_end = hours_between(schedule.end_on(date), clock_out).max(Decimal::ZERO);
            (worked, past_end.min(worked))
        }
        _ => (Decimal::ZERO, Decimal::ZERO),
    };

    PunchMetrics {
        late_minutes,
        hours_worked,
        overtime_hours,
    }
}

/// Derives the status of one day.
///
/// # Example
///
/// ```
/// use payroll_engine::attendance::{DayContext, derive_status};
/// use payroll_engine::models::{AttendanceStatus, Punches, WorkSchedule};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let schedule = WorkSchedule {
///     version: 1,
///     effective_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     grace_minutes: 15,
///     late_deduction_amount: Decimal::new(10, 0),
/// };
/// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
/// let punches = Punches {
///     clock_in: Some(date.and_hms_opt(8, 20, 0).unwrap()),
///     clock_out: None,
/// };
///
/// let status = derive_status(&punches, date, &schedule, &DayContext::default());
/// assert_eq!(status, AttendanceStatus::Late);
///
/// let holiday = DayContext { is_holiday: true, ..DayContext::default() };
/// assert_eq!(
///     derive_status(&punches, date, &schedule, &holiday),
///     AttendanceStatus::Holiday
/// );
/// ```
pub fn derive_status(
    punches: &Punches,
    date: NaiveDate,
    schedule: &WorkSchedule,
    context: &DayContext,
) -> AttendanceStatus {
    if context.is_holiday {
        return AttendanceStatus::Holiday;
    }
    if context.is_on_leave {
        return AttendanceStatus::OnLeave;
    }
    if punches.clock_in.is_some() {
        let metrics = punch_metrics(punches, date, schedule);
        if punches.clock_out.is_some() && metrics.hours_worked < schedule.half_day_threshold() {
            return AttendanceStatus::HalfDay;
        }
        if metrics.late_minutes > 0 {
            return AttendanceStatus::Late;
        }
        return AttendanceStatus::Present;
    }
    if context.day_ended {
        AttendanceStatus::Absent
    } else {
        AttendanceStatus::Pending
    }
}

/// Recomputes every derived field of a record in place.
///
/// Lateness is cleared when a holiday or leave override applies. Punches are
/// kept as recorded. Returns true if anything changed.
pub fn reconcile_record(
    record: &mut AttendanceRecord,
    schedule: &WorkSchedule,
    context: &DayContext,
) -> bool {
    let punches = record.punches();
    let metrics = punch_metrics(&punches, record.date, schedule);
    let status = derive_status(&punches, record.date, schedule, context);
    let late_minutes = if status.is_override() {
        0
    } else {
        metrics.late_minutes
    };

    let changed = record.status != status
        || record.late_minutes != late_minutes
        || record.hours_worked != metrics.hours_worked
        || record.overtime_hours != metrics.overtime_hours
        || record.schedule_version != schedule.version;

    record.status = status;
    record.late_minutes = late_minutes;
    record.hours_worked = metrics.hours_worked;
    record.overtime_hours = metrics.overtime_hours;
    record.schedule_version = schedule.version;
    changed
}
