//! Regular hours aggregation.

use rust_decimal::Decimal;

use crate::models::{AttendanceRecord, AuditStep};

/// The result of summing worked hours over a period.
#[derive(Debug, Clone)]
pub struct RegularHoursResult {
    /// Sum of `hours_worked` across worked days.
    pub regular_hours: Decimal,
    /// Number of worked days with any hours.
    pub days_worked: u32,
    /// The audit step recording this aggregation.
    pub audit_step: AuditStep,
}

/// Sums `hours_worked` over the period's `Present`, `Late`, and `HalfDay`
/// records.
///
/// Punches on holiday or leave days are not paid as regular hours. Hours
/// are kept at full precision; rounding happens on the money figures.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::sum_regular_hours;
/// use payroll_engine::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut record = AttendanceRecord::new("emp_001", NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), 1);
/// record.status = AttendanceStatus::Present;
/// record.hours_worked = Decimal::new(8, 0);
///
/// let result = sum_regular_hours(&[record.clone(), record], 1);
/// assert_eq!(result.regular_hours, Decimal::new(16, 0));
/// assert_eq!(result.days_worked, 2);
/// ```
pub fn sum_regular_hours(records: &[AttendanceRecord], step_number: u32) -> RegularHoursResult {
    let worked: Vec<&AttendanceRecord> = records.iter().filter(|r| r.status.is_worked()).collect();
    let regular_hours: Decimal = worked.iter().map(|r| r.hours_worked).sum();
    let days_worked = worked
        .iter()
        .filter(|r| r.hours_worked > Decimal::ZERO)
        .count() as u32;

    let audit_step = AuditStep {
        step_number,
        rule_id: "regular_hours".to_string(),
        rule_name: "Regular Hours".to_string(),
        input: serde_json::json!({
            "attendance_records": records.len(),
            "worked_records": worked.len(),
        }),
        output: serde_json::json!({
            "regular_hours": regular_hours.round_dp(4).normalize().to_string(),
            "days_worked": days_worked,
        }),
        reasoning: format!(
            "Summed worked hours over {} attendance records: {}h across {} worked days",
            records.len(),
            regular_hours.round_dp(2).normalize(),
            days_worked
        ),
    };

    RegularHoursResult {
        regular_hours,
        days_worked,
        audit_step,
    }
}
