//! Schedule lookup policy.
//!
//! Engine services never read the configuration directly; they ask a
//! [`SchedulePolicy`] which schedule version applies.

use chrono::NaiveDate;

use crate::error::{EngineError, EngineResult};
use crate::models::WorkSchedule;

use super::types::ScheduleBook;

/// Resolves which work schedule version applies.
pub trait SchedulePolicy: Send + Sync {
    /// The most recently published schedule version. It may not be in
    /// force yet; date-bound work goes through [`Self::schedule_for`].
    fn active_schedule(&self) -> EngineResult<&WorkSchedule>;

    /// The version effective on `date`: the latest whose `effective_from`
    /// is on or before it.
    fn schedule_for(&self, date: NaiveDate) -> EngineResult<&WorkSchedule>;

    /// A specific version, used to reproduce a pinned calculation.
    fn schedule_version(&self, version: u32) -> EngineResult<&WorkSchedule>;
}

impl SchedulePolicy for ScheduleBook {
    fn active_schedule(&self) -> EngineResult<&WorkSchedule> {
        self.schedules()
            .last()
            .ok_or(EngineError::NoScheduleConfigured)
    }

    fn schedule_for(&self, date: NaiveDate) -> EngineResult<&WorkSchedule> {
        self.schedules()
            .iter()
            .rev()
            .find(|s| s.effective_from <= date)
            .ok_or(EngineError::ScheduleNotEffective { date })
    }

    fn schedule_version(&self, version: u32) -> EngineResult<&WorkSchedule> {
        self.schedules()
            .iter()
            .find(|s| s.version == version)
            .ok_or(EngineError::ScheduleVersionNotFound { version })
    }
}
