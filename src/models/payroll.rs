//! Payroll computation and record models.
//!
//! A [`PayrollComputation`] is the pure result of a calculation and is never
//! stored by itself. A [`PayrollRecord`] is a persisted computation with an
//! identity and a lifecycle (`Calculated` then `Paid`).

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditStep, PayPeriod};

/// Identifier of a persisted payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayrollId(pub u64);

impl fmt::Display for PayrollId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a payroll record.
///
/// `Calculated` records are editable. `Paid` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Computed and saved, not yet paid.
    Calculated,
    /// Paid out. Immutable.
    Paid,
}

impl fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayrollStatus::Calculated => f.write_str("Calculated"),
            PayrollStatus::Paid => f.write_str("Paid"),
        }
    }
}

/// The complete result of a payroll calculation.
///
/// All monetary figures are rounded to two decimal places. Hours are kept at
/// full precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollComputation {
    /// The employee the calculation is for.
    pub employee_id: String,
    /// The pay period covered.
    pub period: PayPeriod,
    /// The hourly rate read at calculation time.
    pub hourly_rate: Decimal,
    /// Sum of `hours_worked` over worked days in the period.
    pub regular_hours: Decimal,
    /// Sum of approved overtime hours in the period.
    pub overtime_hours: Decimal,
    /// `regular_hours * hourly_rate`.
    pub basic_pay: Decimal,
    /// Sum of `hours * hourly_rate * multiplier` over approved overtime.
    pub overtime_pay: Decimal,
    /// Caller-supplied allowances.
    pub allowances: Decimal,
    /// Total late minutes in the period.
    pub late_minutes: u32,
    /// Number of late days in the period.
    pub late_occurrences: u32,
    /// `late_occurrences * late_deduction_amount`.
    pub late_deductions: Decimal,
    /// `basic_pay + overtime_pay + allowances`.
    pub gross_pay: Decimal,
    /// `max(0, gross_pay - late_deductions)`.
    pub net_pay: Decimal,
    /// The schedule version whose deduction amount was used.
    pub schedule_version: u32,
    /// Ordered record of every calculation step.
    pub audit_trace: Vec<AuditStep>,
}

/// A persisted payroll computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Store-assigned identifier.
    pub id: PayrollId,
    /// The employee the record is for.
    pub employee_id: String,
    /// The pay period covered.
    pub period: PayPeriod,
    /// See [`PayrollComputation::regular_hours`].
    pub regular_hours: Decimal,
    /// See [`PayrollComputation::overtime_hours`].
    pub overtime_hours: Decimal,
    /// See [`PayrollComputation::basic_pay`].
    pub basic_pay: Decimal,
    /// See [`PayrollComputation::overtime_pay`].
    pub overtime_pay: Decimal,
    /// Allowances supplied when the record was first calculated.
    pub allowances: Decimal,
    /// See [`PayrollComputation::late_minutes`].
    pub late_minutes: u32,
    /// See [`PayrollComputation::late_deductions`].
    pub late_deductions: Decimal,
    /// See [`PayrollComputation::gross_pay`].
    pub gross_pay: Decimal,
    /// See [`PayrollComputation::net_pay`].
    pub net_pay: Decimal,
    /// Lifecycle state.
    pub status: PayrollStatus,
    /// Set when the record transitions to `Paid`.
    pub paid_date: Option<NaiveDate>,
    /// Schedule version pinned at first calculation; reused on recalculation.
    pub schedule_version: u32,
}

impl PayrollRecord {
    /// Builds a new `Calculated` record from a computation.
    pub fn calculated(id: PayrollId, computation: &PayrollComputation) -> Self {
        Self {
            id,
            employee_id: computation.employee_id.clone(),
            period: computation.period,
            regular_hours: computation.regular_hours,
            overtime_hours: computation.overtime_hours,
            basic_pay: computation.basic_pay,
            overtime_pay: computation.overtime_pay,
            allowances: computation.allowances,
            late_minutes: computation.late_minutes,
            late_deductions: computation.late_deductions,
            gross_pay: computation.gross_pay,
            net_pay: computation.net_pay,
            status: PayrollStatus::Calculated,
            paid_date: None,
            schedule_version: computation.schedule_version,
        }
    }

    /// Overwrites every derived figure with those of `computation`.
    ///
    /// Identity, period, allowances, status, and the pinned schedule version
    /// are left untouched.
    pub fn apply(&mut self, computation: &PayrollComputation) {
        self.regular_hours = computation.regular_hours;
        self.overtime_hours = computation.overtime_hours;
        self.basic_pay = computation.basic_pay;
        self.overtime_pay = computation.overtime_pay;
        self.late_minutes = computation.late_minutes;
        self.late_deductions = computation.late_deductions;
        self.gross_pay = computation.gross_pay;
        self.net_pay = computation.net_pay;
    }

    /// Returns true if the record can still be changed.
    pub fn is_editable(&self) -> bool {
        self.status == PayrollStatus::Calculated
    }
}
