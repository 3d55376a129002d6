//! Employee model.
//!
//! Employees are owned by an external directory; the engine only reads the
//! fields it needs for attendance generation and pay calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

/// Represents an employee known to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Current hourly rate. Payroll always reads the rate at calculation time.
    pub hourly_rate: Decimal,
    /// Inactive employees are skipped by daily attendance generation.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Employee {
    /// Creates an active employee.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee::new("emp_001", "Ana Reyes", Decimal::new(100, 0));
    /// assert!(employee.is_active);
    /// ```
    pub fn new(id: impl Into<String>, name: impl Into<String>, hourly_rate: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hourly_rate,
            is_active: true,
        }
    }
}
