//! Attendance reporting.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::AttendanceEngine;
use crate::calculation::round_money;
use crate::config::SchedulePolicy;
use crate::error::EngineResult;
use crate::models::{AttendanceRecord, AttendanceStatus, PayPeriod};
use crate::store::{AttendanceStore, EngineStore};

/// Number of days in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Days marked `Present`.
    pub present: u32,
    /// Days marked `Late`.
    pub late: u32,
    /// Days marked `HalfDay`.
    pub half_day: u32,
    /// Days marked `Absent`.
    pub absent: u32,
    /// Days marked `OnLeave`.
    pub on_leave: u32,
    /// Days marked `Holiday`.
    pub holiday: u32,
    /// Days still `Pending`.
    pub pending: u32,
}

impl StatusCounts {
    /// Counts one day.
    pub fn add(&mut self, status: AttendanceStatus) {
        let slot = match status {
            AttendanceStatus::Present => &mut self.present,
            AttendanceStatus::Late => &mut self.late,
            AttendanceStatus::HalfDay => &mut self.half_day,
            AttendanceStatus::Absent => &mut self.absent,
            AttendanceStatus::OnLeave => &mut self.on_leave,
            AttendanceStatus::Holiday => &mut self.holiday,
            AttendanceStatus::Pending => &mut self.pending,
        };
        *slot += 1;
    }
}

/// One employee's attendance totals over a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceSummary {
    /// The employee.
    pub employee_id: String,
    /// The period summarized.
    pub period: PayPeriod,
    /// Number of attendance records in the period.
    pub total_days: u32,
    /// Sum of worked hours, rounded to two places.
    pub total_hours: Decimal,
    /// Sum of attendance overtime hours, rounded to two places.
    pub total_overtime_hours: Decimal,
    /// Sum of late minutes.
    pub total_late_minutes: u32,
    /// Days per status.
    #[serde(flatten)]
    pub counts: StatusCounts,
}

/// Organization-wide attendance for one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyReport {
    /// The work date.
    pub date: NaiveDate,
    /// Number of attendance records on the date.
    pub total_records: u32,
    /// Records per status.
    #[serde(flatten)]
    pub counts: StatusCounts,
    /// Sum of worked hours, rounded to two places.
    pub total_hours: Decimal,
    /// Sum of attendance overtime hours, rounded to two places.
    pub total_overtime_hours: Decimal,
    /// Present and late records as a percentage of all records.
    pub attendance_rate: Decimal,
    /// Records in ascending employee order.
    pub records: Vec<AttendanceRecord>,
}

fn tally(records: &[AttendanceRecord]) -> (StatusCounts, Decimal, Decimal) {
    let mut counts = StatusCounts::default();
    let mut hours = Decimal::ZERO;
    let mut overtime = Decimal::ZERO;
    for record in records {
        counts.add(record.status);
        hours += record.hours_worked;
        overtime += record.overtime_hours;
    }
    (counts, round_money(hours), round_money(overtime))
}

impl<S, P> AttendanceEngine<'_, S, P>
where
    S: EngineStore + ?Sized,
    P: SchedulePolicy + ?Sized,
{
    /// Totals one employee's attendance over an inclusive date range.
    pub fn attendance_summary(
        &self,
        employee_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> EngineResult<AttendanceSummary> {
        let period = PayPeriod::new(start_date, end_date)?;
        let records = self.store.attendance_between(employee_id, &period)?;
        let (counts, total_hours, total_overtime_hours) = tally(&records);

        Ok(AttendanceSummary {
            employee_id: employee_id.to_string(),
            period,
            total_days: records.len() as u32,
            total_hours,
            total_overtime_hours,
            total_late_minutes: records.iter().map(|r| r.late_minutes).sum(),
            counts,
        })
    }

    /// Reports every employee's attendance on one date.
    pub fn daily_report(&self, date: NaiveDate) -> EngineResult<DailyReport> {
        let records = self.store.attendance_on(date)?;
        let (counts, total_hours, total_overtime_hours) = tally(&records);
        let total = records.len() as u32;

        let attendance_rate = if total == 0 {
            Decimal::ZERO
        } else {
            round_money(
                Decimal::from(counts.present + counts.late) * Decimal::ONE_HUNDRED
                    / Decimal::from(total),
            )
        };

        Ok(DailyReport {
            date,
            total_records: total,
            counts,
            total_hours,
            total_overtime_hours,
            attendance_rate,
            records,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScheduleBook;
    use crate::error::EngineError;
    use crate::models::{Employee, WorkSchedule};
    use crate::store::InMemoryStore;
    use chrono::{NaiveDateTime, NaiveTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        d(day).and_hms_opt(hour, minute, 0).unwrap()
    }

    fn setup() -> (InMemoryStore, ScheduleBook) {
        let store = InMemoryStore::new();
        for id in ["emp_001", "emp_002", "emp_003"] {
            store.add_employee(Employee::new(id, id, dec("100")));
        }
        let schedules = ScheduleBook::new(vec![WorkSchedule {
            version: 1,
            effective_from: d(1),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            grace_minutes: 15,
            late_deduction_amount: dec("10"),
        }])
        .unwrap();
        (store, schedules)
    }

    #[test]
    fn test_summary_totals_over_period() {
        let (store, schedules) = setup();
        let engine = AttendanceEngine::new(&store, &schedules);
        engine.clock_in("emp_001", d(2), at(2, 8, 0)).unwrap();
        engine.clock_out("emp_001", d(2), at(2, 17, 0)).unwrap();
        engine.clock_in("emp_001", d(3), at(3, 8, 30)).unwrap();
        engine.clock_out("emp_001", d(3), at(3, 18, 0)).unwrap();

        let summary = engine.attendance_summary("emp_001", d(1), d(15)).unwrap();

        assert_eq!(summary.total_days, 2);
        assert_eq!(summary.total_hours, dec("18.50"));
        assert_eq!(summary.total_overtime_hours, dec("1.00"));
        assert_eq!(summary.total_late_minutes, 15);
        assert_eq!(summary.counts.present, 1);
        assert_eq!(summary.counts.late, 1);
    }

    #[test]
    fn test_summary_rejects_inverted_range() {
        let (store, schedules) = setup();
        let engine = AttendanceEngine::new(&store, &schedules);
        let err = engine.attendance_summary("emp_001", d(15), d(1)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidPeriod { .. }));
    }

    #[test]
    fn test_daily_report_attendance_rate() {
        let (store, schedules) = setup();
        let engine = AttendanceEngine::new(&store, &schedules);
        engine.generate_for_date(d(2), at(2, 7, 0)).unwrap();
        engine.clock_in("emp_001", d(2), at(2, 8, 0)).unwrap();
        engine.clock_in("emp_002", d(2), at(2, 9, 0)).unwrap();
        engine.mark_absent_sweep(d(2), at(2, 17, 0)).unwrap();

        let report = engine.daily_report(d(2)).unwrap();

        assert_eq!(report.total_records, 3);
        assert_eq!(report.counts.present, 1);
        assert_eq!(report.counts.late, 1);
        assert_eq!(report.counts.absent, 1);
        assert_eq!(report.attendance_rate, dec("66.67"));
    }

    #[test]
    fn test_daily_report_for_empty_date() {
        let (store, schedules) = setup();
        let engine = AttendanceEngine::new(&store, &schedules);
        let report = engine.daily_report(d(9)).unwrap();
        assert_eq!(report.total_records, 0);
        assert_eq!(report.attendance_rate, Decimal::ZERO);
    }
}
