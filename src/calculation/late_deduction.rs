//! Late deduction calculation.
//!
//! Each late day costs a flat amount taken from the schedule. The number of
//! minutes late does not change the amount.

use rust_decimal::Decimal;

use super::round_money;
use crate::models::{AttendanceRecord, AuditStep};

/// The result of a late deduction calculation.
#[derive(Debug, Clone)]
pub struct LateDeductionResult {
    /// Total late minutes over the period.
    pub late_minutes: u32,
    /// Number of late days.
    pub late_occurrences: u32,
    /// `late_occurrences * deduction_per_occurrence`, rounded.
    pub late_deductions: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Counts late days and prices them at `deduction_per_occurrence`.
///
/// Days under a holiday or leave override are never late.
pub fn calculate_late_deductions(
    records: &[AttendanceRecord],
    deduction_per_occurrence: Decimal,
    step_number: u32,
) -> LateDeductionResult {
    let late_days: Vec<&AttendanceRecord> = records.iter().filter(|r| r.is_late()).collect();
    let late_occurrences = late_days.len() as u32;
    let late_minutes: u32 = late_days.iter().map(|r| r.late_minutes).sum();
    let late_deductions = round_money(deduction_per_occurrence * Decimal::from(late_occurrences));

    let audit_step = AuditStep {
        step_number,
        rule_id: "late_deduction".to_string(),
        rule_name: "Late Deduction".to_string(),
        input: serde_json::json!({
            "deduction_per_occurrence": deduction_per_occurrence.normalize().to_string(),
            "late_dates": late_days.iter().map(|r| r.date.to_string()).collect::<Vec<_>>(),
        }),
        output: serde_json::json!({
            "late_occurrences": late_occurrences,
            "late_minutes": late_minutes,
            "late_deductions": late_deductions.to_string(),
        }),
        reasoning: format!(
            "{} late day(s) totalling {} minutes at ${} each = ${}",
            late_occurrences,
            late_minutes,
            deduction_per_occurrence.normalize(),
            late_deductions
        ),
    };

    LateDeductionResult {
        late_minutes,
        late_occurrences,
        late_deductions,
        audit_step,
    }
}
