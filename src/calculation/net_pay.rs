//! Gross and net pay calculation.

use rust_decimal::Decimal;

use crate::models::AuditStep;

/// The result of a gross/net pay calculation.
#[derive(Debug, Clone)]
pub struct NetPayResult {
    /// `basic_pay + overtime_pay + allowances`.
    pub gross_pay: Decimal,
    /// `max(0, gross_pay - late_deductions)`.
    pub net_pay: Decimal,
    /// True if deductions exceeded gross pay and net was floored at zero.
    pub floored: bool,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Totals gross pay and applies deductions, flooring net pay at zero.
///
/// Inputs are already rounded to two places, so the result is exact.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_net_pay;
/// use rust_decimal::Decimal;
///
/// let result = calculate_net_pay(
///     Decimal::new(10, 0),
///     Decimal::ZERO,
///     Decimal::ZERO,
///     Decimal::new(50, 0),
///     5,
/// );
/// assert_eq!(result.net_pay, Decimal::ZERO);
/// assert!(result.floored);
/// ```
pub fn calculate_net_pay(
    basic_pay: Decimal,
    overtime_pay: Decimal,
    allowances: Decimal,
    late_deductions: Decimal,
    step_number: u32,
) -> NetPayResult {
    let gross_pay = basic_pay + overtime_pay + allowances;
    let difference = gross_pay - late_deductions;
    let floored = difference < Decimal::ZERO;
    let net_pay = difference.max(Decimal::ZERO);

    let reasoning = if floored {
        format!(
            "Gross ${} less deductions ${} is negative; net pay floored at $0",
            gross_pay, late_deductions
        )
    } else {
        format!(
            "Gross ${} (basic ${} + overtime ${} + allowances ${}) less deductions ${} = ${}",
            gross_pay, basic_pay, overtime_pay, allowances, late_deductions, net_pay
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Gross and Net Pay".to_string(),
        input: serde_json::json!({
            "basic_pay": basic_pay.to_string(),
            "overtime_pay": overtime_pay.to_string(),
            "allowances": allowances.to_string(),
            "late_deductions": late_deductions.to_string(),
        }),
        output: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "net_pay": net_pay.to_string(),
            "floored": floored,
        }),
        reasoning,
    };

    NetPayResult {
        gross_pay,
        net_pay,
        floored,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_net_is_gross_less_deductions() {
        let result = calculate_net_pay(dec("916.67"), dec("150.00"), dec("20.00"), dec("10.00"), 5);
        assert_eq!(result.gross_pay, dec("1086.67"));
        assert_eq!(result.net_pay, dec("1076.67"));
        assert!(!result.floored);
    }

    #[test]
    fn test_deductions_equal_to_gross_give_zero_without_flooring() {
        let result = calculate_net_pay(dec("50.00"), dec("0"), dec("0"), dec("50.00"), 5);
        assert_eq!(result.net_pay, Decimal::ZERO);
        assert!(!result.floored);
    }
}
