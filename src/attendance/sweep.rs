//! Daily attendance sweeps.
//!
//! Both sweeps are idempotent: re-running them for the same date and
//! inputs changes nothing. A failure on one employee is recorded and the
//! sweep moves on to the next.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::AttendanceEngine;
use super::status::{DayContext, reconcile_record};
use crate::config::SchedulePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceRecord, AttendanceStatus, BatchFailure, BatchOutcome};
use crate::reconciliation;
use crate::store::{AttendanceStore, EmployeeDirectory, EngineStore, HolidayCalendar, StoreError};

/// Counts from one run of daily attendance generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    /// The work date.
    pub date: NaiveDate,
    /// Records created by this run.
    pub generated: u32,
    /// Created records still waiting for a clock-in.
    pub pending: u32,
    /// Created records marked absent because the day had already ended.
    pub absent: u32,
    /// Created records covered by approved leave.
    pub on_leave: u32,
    /// Created records on a holiday.
    pub holiday: u32,
    /// Employees that already had a record.
    pub already_exists: u32,
    /// Employees that could not be processed.
    pub failed: Vec<BatchFailure<String>>,
}

/// Formats a remaining duration as hours and minutes, rounding minutes up.
///
/// # Example
///
/// ```
/// use payroll_engine::attendance::format_time_remaining;
/// use chrono::Duration;
///
/// assert_eq!(
///     format_time_remaining(Duration::minutes(125)),
///     "Working hours are still ongoing. Time remaining: 2 hours and 5 minutes."
/// );
/// assert_eq!(
///     format_time_remaining(Duration::seconds(30)),
///     "Working hours are still ongoing. Time remaining: 1 minute."
/// );
/// ```
pub fn format_time_remaining(remaining: Duration) -> String {
    let seconds = remaining.num_seconds().max(0);
    let total_minutes = (seconds + 59) / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("{n} {unit}")
        } else {
            format!("{n} {unit}s")
        }
    };

    let remaining = match (hours, minutes) {
        (0, m) => plural(m, "minute"),
        (h, 0) => plural(h, "hour"),
        (h, m) => format!("{} and {}", plural(h, "hour"), plural(m, "minute")),
    };
    format!("Working hours are still ongoing. Time remaining: {remaining}.")
}

impl<S, P> AttendanceEngine<'_, S, P>
where
    S: EngineStore + ?Sized,
    P: SchedulePolicy + ?Sized,
{
    /// Creates a record for every active employee lacking one on `date`.
    ///
    /// Each new record gets the status its context implies: `Holiday`,
    /// `OnLeave`, `Absent` if `now` is past the end of the working day, and
    /// `Pending` otherwise. Existing records are never touched.
    pub fn generate_for_date(
        &self,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> EngineResult<GenerationSummary> {
        let schedule = self.policy.schedule_for(date)?;
        let is_holiday = self.store.is_holiday(date)?;
        let day_ended = schedule.day_ended(date, now);
        let employees = self.store.active_employees()?;

        let mut summary = GenerationSummary {
            date,
            ..GenerationSummary::default()
        };

        for employee in employees {
            match self.store.attendance(&employee.id, date) {
                Ok(Some(_)) => {
                    summary.already_exists += 1;
                    continue;
                }
                Ok(None) => {}
                Err(e) => {
                    let e = EngineError::from(e);
                    warn!(employee_id = %employee.id, %date, error = %e, "Attendance lookup failed");
                    summary.failed.push(BatchFailure::from_error(employee.id, &e));
                    continue;
                }
            }

            let is_on_leave =
                match reconciliation::is_on_leave(self.store, &employee.id, date) {
                    Ok(on_leave) => on_leave,
                    Err(e) => {
                        warn!(employee_id = %employee.id, %date, error = %e, "Leave lookup failed");
                        summary.failed.push(BatchFailure::from_error(employee.id, &e));
                        continue;
                    }
                };

            let context = DayContext {
                is_holiday,
                is_on_leave,
                day_ended,
            };
            let mut record = AttendanceRecord::new(employee.id.clone(), date, schedule.version);
            reconcile_record(&mut record, schedule, &context);

            match self.store.insert_attendance(record) {
                Ok(stored) => {
                    summary.generated += 1;
                    match stored.status {
                        AttendanceStatus::Holiday => summary.holiday += 1,
                        AttendanceStatus::OnLeave => summary.on_leave += 1,
                        AttendanceStatus::Absent => summary.absent += 1,
                        _ => summary.pending += 1,
                    }
                }
                Err(StoreError::Duplicate { .. }) => summary.already_exists += 1,
                Err(e) => {
                    let e = EngineError::from(e);
                    warn!(employee_id = %employee.id, %date, error = %e, "Attendance generation failed");
                    summary.failed.push(BatchFailure::from_error(employee.id, &e));
                }
            }
        }

        info!(
            %date,
            generated = summary.generated,
            already_exists = summary.already_exists,
            failed = summary.failed.len(),
            "Attendance generated"
        );
        Ok(summary)
    }

    /// Marks every record for `date` without a clock-in as absent.
    ///
    /// Holiday and leave overrides are re-evaluated first and win over
    /// `Absent`. The outcome lists the employees newly marked absent.
    ///
    /// # Errors
    ///
    /// - [`EngineError::TimeRemaining`] if `now` is before the scheduled end.
    /// - [`EngineError::AttendanceNotGenerated`] if the date has no records.
    pub fn mark_absent_sweep(
        &self,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> EngineResult<BatchOutcome<String>> {
        let schedule = self.policy.schedule_for(date)?;
        let end = schedule.end_on(date);
        if now < end {
            return Err(EngineError::TimeRemaining {
                message: format_time_remaining(end - now),
            });
        }

        let records = self.store.attendance_on(date)?;
        if records.is_empty() {
            return Err(EngineError::AttendanceNotGenerated { date });
        }

        let is_holiday = self.store.is_holiday(date)?;
        let mut outcome = BatchOutcome::default();

        for mut record in records {
            if record.clock_in.is_some() {
                continue;
            }
            let employee_id = record.employee_id.clone();
            let context = match self.day_context_with(&employee_id, date, is_holiday) {
                Ok(context) => context,
                Err(e) => {
                    outcome.fail(employee_id, &e);
                    continue;
                }
            };
            if !reconcile_record(&mut record, schedule, &context) {
                continue;
            }
            let status = record.status;
            match self.store.update_attendance(record) {
                Ok(_) if status == AttendanceStatus::Absent => outcome.succeed(employee_id),
                Ok(_) => debug!(%employee_id, %date, %status, "Override applied during absent sweep"),
                Err(e) => {
                    let e = EngineError::from(e);
                    warn!(%employee_id, %date, error = %e, "Absent marking failed");
                    outcome.fail(employee_id, &e);
                }
            }
        }

        info!(
            %date,
            marked_absent = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            "Absent sweep complete"
        );
        Ok(outcome)
    }

    /// Re-derives one record from its current inputs and saves any change.
    ///
    /// Used after a leave approval or holiday change lands for a date that
    /// already has a record.
    pub fn refresh_status(
        &self,
        employee_id: &str,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> EngineResult<AttendanceRecord> {
        let mut record = self.store.attendance(employee_id, date)?.ok_or_else(|| {
            EngineError::AttendanceNotFound {
                employee_id: employee_id.to_string(),
                date,
            }
        })?;
        let schedule = self.policy.schedule_for(date)?;
        let context = self.day_context(employee_id, date, schedule.day_ended(date, now))?;

        if !reconcile_record(&mut record, schedule, &context) {
            return Ok(record);
        }
        let stored = self.store.update_attendance(record).map_err(|e| match e {
            StoreError::StaleRevision { .. } => EngineError::ConcurrentModification {
                message: format!("attendance for employee '{employee_id}' on {date} changed during refresh"),
            },
            other => other.into(),
        })?;
        info!(employee_id, %date, status = %stored.status, "Attendance status refreshed");
        Ok(stored)
    }

    fn day_context_with(
        &self,
        employee_id: &str,
        date: NaiveDate,
        is_holiday: bool,
    ) -> EngineResult<DayContext> {
        Ok(DayContext {
            is_holiday,
            is_on_leave: reconciliation::is_on_leave(self.store, employee_id, date)?,
            day_ended: true,
        })
    }
}
