//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the
//! organization settings and work schedule versions from YAML files.

use chrono::{NaiveDate, NaiveDateTime, Utc};
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::WorkSchedule;

use super::policy::SchedulePolicy;
use super::types::{EngineConfig, OrganizationConfig, ScheduleBook, SchedulesConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── organization.yaml   # Name and UTC offset
/// └── schedules.yaml      # Versioned work schedules
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::{ConfigLoader, SchedulePolicy};
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let schedule = loader.active_schedule()?;
/// println!("Working hours: {} - {}", schedule.start_time, schedule.end_time);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The schedules or UTC offset fail validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let organization = Self::load_yaml::<OrganizationConfig>(&path.join("organization.yaml"))?;
        organization.offset()?;

        let schedules = Self::load_yaml::<SchedulesConfig>(&path.join("schedules.yaml"))?;
        let book = ScheduleBook::new(schedules.schedules)?;

        tracing::info!(
            organization = %organization.name,
            schedule_versions = book.schedules().len(),
            "Configuration loaded"
        );

        Ok(Self {
            config: EngineConfig::new(organization, book),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the organization settings.
    pub fn organization(&self) -> &OrganizationConfig {
        self.config.organization()
    }

    /// Current wall-clock time in organization local time.
    pub fn now(&self) -> EngineResult<NaiveDateTime> {
        let offset = self.organization().offset()?;
        Ok(Utc::now().with_timezone(&offset).naive_local())
    }

    /// Today's date in organization local time.
    pub fn today(&self) -> EngineResult<NaiveDate> {
        Ok(self.now()?.date())
    }
}

impl SchedulePolicy for ConfigLoader {
    fn active_schedule(&self) -> EngineResult<&WorkSchedule> {
        self.config.schedules().active_schedule()
    }

    fn schedule_for(&self, date: NaiveDate) -> EngineResult<&WorkSchedule> {
        self.config.schedules().schedule_for(date)
    }

    fn schedule_version(&self, version: u32) -> EngineResult<&WorkSchedule> {
        self.config.schedules().schedule_version(version)
    }
}
