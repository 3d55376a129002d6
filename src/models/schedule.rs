//! Work schedule model.
//!
//! A [`WorkSchedule`] is one version of the organization's working hours.
//! Versions are immutable once published; changing the hours means adding a
//! new version with a later `effective_from` date.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::attendance::hours_between;

/// Hours after the scheduled end during which a clock-out is still accepted.
pub const CLOCK_OUT_CUTOFF_HOURS: i64 = 12;

/// One version of the organization-wide work schedule.
///
/// When `end_time` is not after `start_time` the schedule is overnight and the
/// working day ends on the following calendar day.
///
/// # Example
///
/// ```
/// use payroll_engine::models::WorkSchedule;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let schedule = WorkSchedule {
///     version: 1,
///     effective_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     grace_minutes: 15,
///     late_deduction_amount: Decimal::new(50, 0),
/// };
///
/// assert_eq!(schedule.shift_hours(), Decimal::new(9, 0));
/// assert!(!schedule.is_overnight());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSchedule {
    /// Monotonic version number. Payroll records pin the version they used.
    pub version: u32,
    /// First date on which this version applies.
    pub effective_from: NaiveDate,
    /// Scheduled start of the working day.
    pub start_time: NaiveTime,
    /// Scheduled end of the working day.
    pub end_time: NaiveTime,
    /// Minutes after `start_time` before a clock-in counts as late.
    pub grace_minutes: u32,
    /// Flat amount deducted per late occurrence.
    pub late_deduction_amount: Decimal,
}

impl WorkSchedule {
    /// Returns true if the working day crosses midnight.
    pub fn is_overnight(&self) -> bool {
        self.end_time <= self.start_time
    }

    /// Scheduled start of the working day that begins on `date`.
    pub fn start_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.start_time)
    }

    /// Scheduled end of the working day that begins on `date`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::WorkSchedule;
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let night = WorkSchedule {
    ///     version: 1,
    ///     effective_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    ///     start_time: NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
    ///     grace_minutes: 0,
    ///     late_deduction_amount: Decimal::ZERO,
    /// };
    /// let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    ///
    /// assert_eq!(
    ///     night.end_on(date),
    ///     NaiveDate::from_ymd_opt(2026, 3, 3).unwrap().and_hms_opt(6, 0, 0).unwrap()
    /// );
    /// ```
    pub fn end_on(&self, date: NaiveDate) -> NaiveDateTime {
        let end = date.and_time(self.end_time);
        if self.is_overnight() {
            end + Duration::days(1)
        } else {
            end
        }
    }

    /// Length of the scheduled working day in hours.
    pub fn shift_hours(&self) -> Decimal {
        let date = self.effective_from;
        hours_between(self.start_on(date), self.end_on(date))
    }

    /// Worked hours below which a completed day is a half day.
    pub fn half_day_threshold(&self) -> Decimal {
        self.shift_hours() / Decimal::TWO
    }

    /// Minutes late for a clock-in at `clock_in` on the day beginning `date`.
    ///
    /// Lateness is measured from the scheduled start; the grace window is
    /// subtracted and the result floored at zero. Partial minutes are dropped.
    pub fn late_minutes(&self, date: NaiveDate, clock_in: NaiveDateTime) -> u32 {
        let minutes =
            (clock_in - self.start_on(date)).num_minutes() - i64::from(self.grace_minutes);
        u32::try_from(minutes.max(0)).unwrap_or(u32::MAX)
    }

    /// Returns true once `now` has reached the scheduled end of `date`.
    pub fn day_ended(&self, date: NaiveDate, now: NaiveDateTime) -> bool {
        now >= self.end_on(date)
    }

    /// Returns true if a clock-in at `clock_in` can belong to the working
    /// day beginning `date`: from midnight of `date` up to the scheduled end.
    pub fn accepts_clock_in(&self, date: NaiveDate, clock_in: NaiveDateTime) -> bool {
        clock_in >= date.and_time(NaiveTime::MIN) && clock_in <= self.end_on(date)
    }

    /// Latest clock-out accepted for the working day beginning `date`.
    pub fn clock_out_cutoff(&self, date: NaiveDate) -> NaiveDateTime {
        self.end_on(date) + Duration::hours(CLOCK_OUT_CUTOFF_HOURS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn schedule(start: (u32, u32), end: (u32, u32), grace: u32) -> WorkSchedule {
        WorkSchedule {
            version: 1,
            effective_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            grace_minutes: grace,
            late_deduction_amount: Decimal::new(10, 0),
        }
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn test_late_minutes_subtracts_grace() {
        let schedule = schedule((8, 0), (17, 0), 15);
        assert_eq!(schedule.late_minutes(date(), at(2, 8, 20)), 5);
    }

    #[test]
    fn test_clock_in_inside_grace_is_not_late() {
        let schedule = schedule((8, 0), (17, 0), 15);
        assert_eq!(schedule.late_minutes(date(), at(2, 8, 15)), 0);
        assert_eq!(schedule.late_minutes(date(), at(2, 7, 45)), 0);
    }

    #[test]
    fn test_zero_grace_counts_first_minute() {
        let schedule = schedule((8, 0), (17, 0), 0);
        assert_eq!(schedule.late_minutes(date(), at(2, 8, 1)), 1);
    }

    #[test]
    fn test_day_shift_length_and_half_day_threshold() {
        let schedule = schedule((8, 0), (17, 0), 0);
        assert_eq!(schedule.shift_hours(), Decimal::new(9, 0));
        assert_eq!(schedule.half_day_threshold(), Decimal::from_str("4.5").unwrap());
    }

    #[test]
    fn test_overnight_schedule_ends_next_day() {
        let schedule = schedule((22, 0), (6, 0), 0);
        assert!(schedule.is_overnight());
        assert_eq!(schedule.end_on(date()), at(3, 6, 0));
        assert_eq!(schedule.shift_hours(), Decimal::new(8, 0));
    }

    #[test]
    fn test_clock_in_window_spans_the_working_day() {
        let schedule = schedule((8, 0), (17, 0), 15);
        assert!(schedule.accepts_clock_in(date(), at(2, 0, 0)));
        assert!(schedule.accepts_clock_in(date(), at(2, 17, 0)));
        assert!(!schedule.accepts_clock_in(date(), at(2, 17, 1)));
        assert!(!schedule.accepts_clock_in(date(), at(1, 23, 59)));
        assert!(!schedule.accepts_clock_in(date(), at(12, 8, 0)));
    }

    #[test]
    fn test_overnight_clock_in_window_and_clock_out_cutoff() {
        let schedule = schedule((22, 0), (6, 0), 0);
        assert!(schedule.accepts_clock_in(date(), at(3, 5, 30)));
        assert!(!schedule.accepts_clock_in(date(), at(3, 6, 30)));
        assert_eq!(schedule.clock_out_cutoff(date()), at(3, 18, 0));
    }

    #[test]
    fn test_day_ended_at_exact_end_time() {
        let schedule = schedule((8, 0), (17, 0), 0);
        assert!(!schedule.day_ended(date(), at(2, 16, 59)));
        assert!(schedule.day_ended(date(), at(2, 17, 0)));
    }
}
