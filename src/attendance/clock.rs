//! Clock-in and clock-out.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{info, warn};

use super::AttendanceEngine;
use super::status::reconcile_record;
use crate::config::SchedulePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::AttendanceRecord;
use crate::store::{AttendanceStore, EngineStore, StoreError};

impl<S, P> AttendanceEngine<'_, S, P>
where
    S: EngineStore + ?Sized,
    P: SchedulePolicy + ?Sized,
{
    /// Records a clock-in for an employee's work date.
    ///
    /// Creates the day's record if needed and derives status and lateness.
    /// A pre-generated `Pending` or `Absent` record is filled in. Holidays and
    /// approved leave still win the status; the punch is kept.
    ///
    /// # Errors
    ///
    /// - [`EngineError::EmployeeNotFound`] for an unknown employee.
    /// - [`EngineError::AlreadyClockedIn`] if the day already has a clock-in,
    ///   including when a concurrent request won the race.
    /// - [`EngineError::InvalidPunch`] if `timestamp` is outside the working
    ///   day beginning `date`.
    /// - Schedule errors if no schedule is effective on `date`.
    pub fn clock_in(
        &self,
        employee_id: &str,
        date: NaiveDate,
        timestamp: NaiveDateTime,
    ) -> EngineResult<AttendanceRecord> {
        self.require_employee(employee_id)?;
        let schedule = self.policy.schedule_for(date)?;
        if !schedule.accepts_clock_in(date, timestamp) {
            warn!(employee_id, %date, %timestamp, "Clock-in outside the working day rejected");
            return Err(EngineError::InvalidPunch {
                message: format!(
                    "clock-in {timestamp} is outside the working day of {date} ({} to {})",
                    date.and_time(NaiveTime::MIN),
                    schedule.end_on(date)
                ),
            });
        }

        let existing = self.store.attendance(employee_id, date)?;
        if existing.as_ref().is_some_and(|r| r.clock_in.is_some()) {
            warn!(employee_id, %date, "Duplicate clock-in rejected");
            return Err(EngineError::AlreadyClockedIn {
                employee_id: employee_id.to_string(),
                date,
            });
        }

        let context = self.day_context(employee_id, date, false)?;
        let is_new = existing.is_none();
        let mut record = existing
            .unwrap_or_else(|| AttendanceRecord::new(employee_id, date, schedule.version));
        record.clock_in = Some(timestamp);
        reconcile_record(&mut record, schedule, &context);

        let written = if is_new {
            self.store.insert_attendance(record)
        } else {
            self.store.update_attendance(record)
        };

        match written {
            Ok(stored) => {
                info!(
                    employee_id,
                    %date,
                    status = %stored.status,
                    late_minutes = stored.late_minutes,
                    "Clock-in recorded"
                );
                Ok(stored)
            }
            Err(StoreError::Duplicate { .. } | StoreError::StaleRevision { .. }) => {
                Err(self.clock_in_race(employee_id, date))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Records a clock-out and computes worked and overtime hours.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotClockedIn`] if there is no clock-in for the day.
    /// - [`EngineError::AlreadyClockedOut`] if the day already has a clock-out.
    /// - [`EngineError::InvalidPunch`] if `timestamp` precedes the clock-in or
    ///   is more than [`crate::models::CLOCK_OUT_CUTOFF_HOURS`] past the scheduled end.
    pub fn clock_out(
        &self,
        employee_id: &str,
        date: NaiveDate,
        timestamp: NaiveDateTime,
    ) -> EngineResult<AttendanceRecord> {
        let not_clocked_in = || EngineError::NotClockedIn {
            employee_id: employee_id.to_string(),
            date,
        };

        let mut record = self
            .store
            .attendance(employee_id, date)?
            .ok_or_else(not_clocked_in)?;
        let clock_in = record.clock_in.ok_or_else(not_clocked_in)?;
        if record.clock_out.is_some() {
            warn!(employee_id, %date, "Duplicate clock-out rejected");
            return Err(EngineError::AlreadyClockedOut {
                employee_id: employee_id.to_string(),
                date,
            });
        }
        if timestamp < clock_in {
            return Err(EngineError::InvalidPunch {
                message: format!("clock-out {timestamp} is before clock-in {clock_in}"),
            });
        }

        let schedule = self.policy.schedule_for(date)?;
        let cutoff = schedule.clock_out_cutoff(date);
        if timestamp > cutoff {
            warn!(employee_id, %date, %timestamp, "Clock-out past the cutoff rejected");
            return Err(EngineError::InvalidPunch {
                message: format!("clock-out {timestamp} is after the cutoff {cutoff} for {date}"),
            });
        }
        let context = self.day_context(employee_id, date, false)?;
        record.clock_out = Some(timestamp);
        reconcile_record(&mut record, schedule, &context);

        match self.store.update_attendance(record) {
            Ok(stored) => {
                info!(
                    employee_id,
                    %date,
                    status = %stored.status,
                    hours_worked = %stored.hours_worked.round_dp(2),
                    overtime_hours = %stored.overtime_hours.round_dp(2),
                    "Clock-out recorded"
                );
                Ok(stored)
            }
            Err(StoreError::StaleRevision { .. }) => {
                match self.store.attendance(employee_id, date)? {
                    Some(current) if current.clock_out.is_some() => {
                        Err(EngineError::AlreadyClockedOut {
                            employee_id: employee_id.to_string(),
                            date,
                        })
                    }
                    _ => Err(concurrent(employee_id, date)),
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    fn clock_in_race(&self, employee_id: &str, date: NaiveDate) -> EngineError {
        match self.store.attendance(employee_id, date) {
            Ok(Some(current)) if current.clock_in.is_some() => {
                warn!(employee_id, %date, "Concurrent clock-in lost the race");
                EngineError::AlreadyClockedIn {
                    employee_id: employee_id.to_string(),
                    date,
                }
            }
            Ok(_) => concurrent(employee_id, date),
            Err(e) => e.into(),
        }
    }
}

fn concurrent(employee_id: &str, date: NaiveDate) -> EngineError {
    EngineError::ConcurrentModification {
        message: format!("attendance for employee '{employee_id}' on {date} changed during the update"),
    }
}
