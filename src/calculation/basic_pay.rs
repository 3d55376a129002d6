//! Basic pay calculation.

use rust_decimal::Decimal;

use super::round_money;
use crate::models::AuditStep;

/// The result of a basic pay calculation.
#[derive(Debug, Clone)]
pub struct BasicPayResult {
    /// `regular_hours * hourly_rate`, rounded.
    pub basic_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Prices regular hours at the employee's current hourly rate.
pub fn calculate_basic_pay(
    regular_hours: Decimal,
    hourly_rate: Decimal,
    step_number: u32,
) -> BasicPayResult {
    let basic_pay = round_money(regular_hours * hourly_rate);

    let audit_step = AuditStep {
        step_number,
        rule_id: "basic_pay".to_string(),
        rule_name: "Basic Pay".to_string(),
        input: serde_json::json!({
            "regular_hours": regular_hours.round_dp(4).normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string(),
        }),
        output: serde_json::json!({
            "basic_pay": basic_pay.to_string(),
        }),
        reasoning: format!(
            "{}h x ${}/hr = ${}",
            regular_hours.round_dp(4).normalize(),
            hourly_rate.normalize(),
            basic_pay
        ),
    };

    BasicPayResult {
        basic_pay,
        audit_step,
    }
}
