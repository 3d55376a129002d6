//! Configuration types for the attendance and payroll engine.
//!
//! These types represent the structure of the YAML configuration files.

use chrono::FixedOffset;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::WorkSchedule;

/// Organization settings from `organization.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationConfig {
    /// The organization's display name.
    pub name: String,
    /// Offset of organization local time from UTC, in minutes.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl OrganizationConfig {
    /// The organization's fixed UTC offset.
    pub fn offset(&self) -> EngineResult<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).ok_or_else(|| {
            EngineError::InvalidConfig {
                message: format!(
                    "utc_offset_minutes {} is out of range",
                    self.utc_offset_minutes
                ),
            }
        })
    }
}

/// Contents of `schedules.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulesConfig {
    /// Every published schedule version.
    pub schedules: Vec<WorkSchedule>,
}

/// Validated, ordered set of schedule versions.
///
/// Versions are sorted by `effective_from`, and version numbers increase
/// with the effective date.
#[derive(Debug, Clone)]
pub struct ScheduleBook {
    schedules: Vec<WorkSchedule>,
}

impl ScheduleBook {
    /// Validates and orders a list of schedule versions.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NoScheduleConfigured`] if the list is empty.
    /// - [`EngineError::InvalidConfig`] if two versions share a number or an
    ///   effective date, if version numbers do not increase with the effective
    ///   date, if a start time equals its end time, or if a deduction amount
    ///   is negative.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::ScheduleBook;
    /// use payroll_engine::models::WorkSchedule;
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let book = ScheduleBook::new(vec![WorkSchedule {
    ///     version: 1,
    ///     effective_from: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
    ///     start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
    ///     end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
    ///     grace_minutes: 15,
    ///     late_deduction_amount: Decimal::new(50, 0),
    /// }])
    /// .unwrap();
    /// assert_eq!(book.schedules().len(), 1);
    /// ```
    pub fn new(mut schedules: Vec<WorkSchedule>) -> EngineResult<Self> {
        if schedules.is_empty() {
            return Err(EngineError::NoScheduleConfigured);
        }
        schedules.sort_by_key(|s| s.effective_from);

        for schedule in &schedules {
            if schedule.start_time == schedule.end_time {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "schedule version {} starts and ends at {}",
                        schedule.version, schedule.start_time
                    ),
                });
            }
            if schedule.late_deduction_amount.is_sign_negative() {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "schedule version {} has a negative late deduction",
                        schedule.version
                    ),
                });
            }
        }

        for pair in schedules.windows(2) {
            let (earlier, later) = (&pair[0], &pair[1]);
            if earlier.effective_from == later.effective_from {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "schedule versions {} and {} share effective date {}",
                        earlier.version, later.version, later.effective_from
                    ),
                });
            }
            if earlier.version >= later.version {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "schedule version {} is effective after version {}",
                        later.version, earlier.version
                    ),
                });
            }
        }

        Ok(Self { schedules })
    }

    /// All versions, oldest first.
    pub fn schedules(&self) -> &[WorkSchedule] {
        &self.schedules
    }
}

/// Aggregated engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    organization: OrganizationConfig,
    schedules: ScheduleBook,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(organization: OrganizationConfig, schedules: ScheduleBook) -> Self {
        Self {
            organization,
            schedules,
        }
    }

    /// Returns the organization settings.
    pub fn organization(&self) -> &OrganizationConfig {
        &self.organization
    }

    /// Returns the schedule versions.
    pub fn schedules(&self) -> &ScheduleBook {
        &self.schedules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;

    fn schedule(version: u32, month: u32) -> WorkSchedule {
        WorkSchedule {
            version,
            effective_from: NaiveDate::from_ymd_opt(2026, month, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            grace_minutes: 15,
            late_deduction_amount: Decimal::new(50, 0),
        }
    }

    #[test]
    fn test_empty_schedule_list_is_rejected() {
        assert!(matches!(
            ScheduleBook::new(vec![]),
            Err(EngineError::NoScheduleConfigured)
        ));
    }

    #[test]
    fn test_versions_are_sorted_by_effective_date() {
        let book = ScheduleBook::new(vec![schedule(2, 6), schedule(1, 1)]).unwrap();
        let versions: Vec<u32> = book.schedules().iter().map(|s| s.version).collect();
        assert_eq!(versions, vec![1, 2]);
    }

    #[test]
    fn test_version_must_increase_with_effective_date() {
        let result = ScheduleBook::new(vec![schedule(2, 1), schedule(1, 6)]);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_duplicate_version_is_rejected() {
        let result = ScheduleBook::new(vec![schedule(1, 1), schedule(1, 6)]);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_zero_length_schedule_is_rejected() {
        let mut bad = schedule(1, 1);
        bad.end_time = bad.start_time;
        let result = ScheduleBook::new(vec![bad]);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_negative_deduction_is_rejected() {
        let mut bad = schedule(1, 1);
        bad.late_deduction_amount = Decimal::new(-1, 0);
        let result = ScheduleBook::new(vec![bad]);
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_offset_out_of_range_is_invalid() {
        let org = OrganizationConfig {
            name: "Acme".to_string(),
            utc_offset_minutes: 24 * 60,
        };
        assert!(org.offset().is_err());

        let manila = OrganizationConfig {
            name: "Acme".to_string(),
            utc_offset_minutes: 480,
        };
        assert_eq!(manila.offset().unwrap().local_minus_utc(), 8 * 3600);
    }
}
