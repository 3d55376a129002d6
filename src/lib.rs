//! Attendance and Payroll Computation Engine
//!
//! This crate turns employee punches, approved leave and overtime, holidays,
//! and a versioned working-hours schedule into daily attendance records, and
//! attendance into per-period payroll with a full audit trace.
//!
//! The engines borrow a storage backend implementing [`store::EngineStore`]
//! and a [`config::SchedulePolicy`]; [`store::InMemoryStore`] and
//! [`config::ConfigLoader`] are the bundled implementations.

#![warn(missing_docs)]

pub mod api;
pub mod attendance;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod payroll;
pub mod reconciliation;
pub mod store;
