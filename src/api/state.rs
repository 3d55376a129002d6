//! Application state for the attendance and payroll API.

use std::sync::Arc;

use crate::attendance::AttendanceEngine;
use crate::config::ConfigLoader;
use crate::payroll::PayrollEngine;
use crate::store::EngineStore;

/// Shared application state.
///
/// Holds the loaded configuration and the storage backend. Engines are cheap
/// borrowing views built per request.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<dyn EngineStore>,
}

impl AppState {
    /// Creates application state over the given configuration and store.
    pub fn new(config: ConfigLoader, store: impl EngineStore + 'static) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the storage backend.
    pub fn store(&self) -> &dyn EngineStore {
        self.store.as_ref()
    }

    /// Attendance operations over this state.
    pub fn attendance(&self) -> AttendanceEngine<'_, dyn EngineStore, ConfigLoader> {
        AttendanceEngine::new(self.store.as_ref(), self.config.as_ref())
    }

    /// Payroll operations over this state.
    pub fn payroll(&self) -> PayrollEngine<'_, dyn EngineStore, ConfigLoader> {
        PayrollEngine::new(self.store.as_ref(), self.config.as_ref())
    }
}
