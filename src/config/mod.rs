//! Configuration loading and management.
//!
//! This module loads the organization settings and the versioned work
//! schedules from YAML files, and exposes schedule lookup through the
//! [`SchedulePolicy`] trait.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded organization: {}", config.organization().name);
//! ```

mod loader;
mod policy;
mod types;

pub use loader::ConfigLoader;
pub use policy::SchedulePolicy;
pub use types::{EngineConfig, OrganizationConfig, ScheduleBook, SchedulesConfig};
