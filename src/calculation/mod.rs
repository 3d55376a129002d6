//! Payroll calculation logic.
//!
//! Each step of the calculation lives in its own module as a pure function
//! returning its figures together with an [`AuditStep`]. [`compute_payroll`]
//! runs the steps in order:
//!
//! 1. regular hours from attendance
//! 2. late deductions
//! 3. approved overtime hours and pay
//! 4. basic pay
//! 5. gross and net pay
//!
//! Money figures are rounded to two places, half away from zero, at the step
//! that produces them. Nothing here touches storage, so the same inputs
//! always produce the same computation.

mod basic_pay;
mod late_deduction;
mod net_pay;
mod overtime_pay;
mod regular_hours;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{
    AttendanceRecord, AuditStep, OvertimeRequest, PayPeriod, PayrollComputation, WorkSchedule,
};

pub use basic_pay::{BasicPayResult, calculate_basic_pay};
pub use late_deduction::{LateDeductionResult, calculate_late_deductions};
pub use net_pay::{NetPayResult, calculate_net_pay};
pub use overtime_pay::{OvertimePayResult, calculate_overtime_pay};
pub use regular_hours::{RegularHoursResult, sum_regular_hours};

/// Rounds a money amount to two decimal places, half away from zero.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(Decimal::new(10005, 3)), Decimal::new(1001, 2));
/// assert_eq!(round_money(Decimal::new(-10005, 3)), Decimal::new(-1001, 2));
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Everything a payroll calculation reads.
#[derive(Debug, Clone, Copy)]
pub struct PayrollInputs<'a> {
    /// The employee.
    pub employee_id: &'a str,
    /// The pay period.
    pub period: PayPeriod,
    /// The employee's hourly rate at calculation time.
    pub hourly_rate: Decimal,
    /// Caller-supplied allowances, already validated non-negative.
    pub allowances: Decimal,
    /// The schedule whose late deduction amount applies.
    pub schedule: &'a WorkSchedule,
    /// Attendance records inside the period.
    pub attendance: &'a [AttendanceRecord],
    /// Approved overtime requests inside the period.
    pub approved_overtime: &'a [OvertimeRequest],
}

/// Runs every calculation step and assembles the computation.
pub fn compute_payroll(inputs: &PayrollInputs<'_>) -> PayrollComputation {
    let mut audit_trace: Vec<AuditStep> = Vec::with_capacity(5);

    let hours = sum_regular_hours(inputs.attendance, 1);
    audit_trace.push(hours.audit_step);

    let late = calculate_late_deductions(
        inputs.attendance,
        inputs.schedule.late_deduction_amount,
        2,
    );
    audit_trace.push(late.audit_step);

    let overtime = calculate_overtime_pay(inputs.approved_overtime, inputs.hourly_rate, 3);
    audit_trace.push(overtime.audit_step);

    let basic = calculate_basic_pay(hours.regular_hours, inputs.hourly_rate, 4);
    audit_trace.push(basic.audit_step);

    let allowances = round_money(inputs.allowances);
    let net = calculate_net_pay(
        basic.basic_pay,
        overtime.overtime_pay,
        allowances,
        late.late_deductions,
        5,
    );
    audit_trace.push(net.audit_step);

    PayrollComputation {
        employee_id: inputs.employee_id.to_string(),
        period: inputs.period,
        hourly_rate: inputs.hourly_rate,
        regular_hours: hours.regular_hours,
        overtime_hours: overtime.overtime_hours,
        basic_pay: basic.basic_pay,
        overtime_pay: overtime.overtime_pay,
        allowances,
        late_minutes: late.late_minutes,
        late_occurrences: late.late_occurrences,
        late_deductions: late.late_deductions,
        gross_pay: net.gross_pay,
        net_pay: net.net_pay,
        schedule_version: inputs.schedule.version,
        audit_trace,
    }
}
