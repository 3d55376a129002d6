//! Overtime pay calculation.
//!
//! Overtime pay comes only from approved overtime requests. Attendance-level
//! overtime (time past the scheduled end) is informational and never paid.

use rust_decimal::Decimal;

use super::round_money;
use crate::models::{AuditStep, OvertimeRequest};

/// The result of an overtime pay calculation.
#[derive(Debug, Clone)]
pub struct OvertimePayResult {
    /// Sum of approved overtime hours.
    pub overtime_hours: Decimal,
    /// Sum of `hours * hourly_rate * multiplier`, rounded.
    pub overtime_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Prices approved overtime requests at the employee's hourly rate.
///
/// Callers pass approved requests only; see
/// [`crate::reconciliation::approved_overtime`].
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_overtime_pay;
/// use payroll_engine::models::{OvertimeRequest, RequestStatus};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let request = OvertimeRequest {
///     id: "ot_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     overtime_type: "regular".to_string(),
///     request_date: NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
///     start_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     hours: Decimal::ONE,
///     multiplier: Decimal::new(15, 1),
///     status: RequestStatus::Approved,
/// };
///
/// let result = calculate_overtime_pay(&[request], Decimal::new(100, 0), 3);
/// assert_eq!(result.overtime_pay, Decimal::new(15000, 2));
/// ```
pub fn calculate_overtime_pay(
    approved: &[OvertimeRequest],
    hourly_rate: Decimal,
    step_number: u32,
) -> OvertimePayResult {
    let overtime_hours: Decimal = approved.iter().map(|r| r.hours).sum();
    let unrounded: Decimal = approved
        .iter()
        .map(|r| r.hours * hourly_rate * r.multiplier)
        .sum();
    let overtime_pay = round_money(unrounded);

    let breakdown: Vec<serde_json::Value> = approved
        .iter()
        .map(|r| {
            serde_json::json!({
                "request_id": r.id,
                "date": r.request_date.to_string(),
                "hours": r.hours.normalize().to_string(),
                "multiplier": r.multiplier.normalize().to_string(),
            })
        })
        .collect();

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_pay".to_string(),
        rule_name: "Approved Overtime Pay".to_string(),
        input: serde_json::json!({
            "hourly_rate": hourly_rate.normalize().to_string(),
            "approved_requests": breakdown,
        }),
        output: serde_json::json!({
            "overtime_hours": overtime_hours.normalize().to_string(),
            "overtime_pay": overtime_pay.to_string(),
        }),
        reasoning: format!(
            "{} approved request(s) totalling {}h at ${}/hr with per-type multipliers = ${}",
            approved.len(),
            overtime_hours.normalize(),
            hourly_rate.normalize(),
            overtime_pay
        ),
    };

    OvertimePayResult {
        overtime_hours,
        overtime_pay,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RequestStatus;
    use chrono::{NaiveDate, NaiveTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn request(id: &str, hours: &str, multiplier: &str) -> OvertimeRequest {
        OvertimeRequest {
            id: id.to_string(),
            employee_id: "emp_001".to_string(),
            overtime_type: "regular".to_string(),
            request_date: NaiveDate::from_ymd_opt(2026, 3, 3).unwrap(),
            start_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            hours: dec(hours),
            multiplier: dec(multiplier),
            status: RequestStatus::Approved,
        }
    }

    #[test]
    fn test_mixed_multipliers_are_summed() {
        let requests = vec![request("ot_1", "2", "1.25"), request("ot_2", "3", "2.0")];
        let result = calculate_overtime_pay(&requests, dec("80"), 3);

        assert_eq!(result.overtime_hours, dec("5"));
        // 2 * 80 * 1.25 + 3 * 80 * 2.0 = 200 + 480
        assert_eq!(result.overtime_pay, dec("680.00"));
    }

    #[test]
    fn test_rounds_only_the_total() {
        let requests = vec![request("ot_1", "0.333", "1.5"), request("ot_2", "0.333", "1.5")];
        let result = calculate_overtime_pay(&requests, dec("10.01"), 3);
        // 0.666 * 10.01 * 1.5 = 9.99999
        assert_eq!(result.overtime_pay, dec("10.00"));
    }

    #[test]
    fn test_no_requests_pay_nothing() {
        let result = calculate_overtime_pay(&[], dec("100"), 3);
        assert_eq!(result.overtime_pay, Decimal::ZERO);
        assert_eq!(result.overtime_hours, Decimal::ZERO);
    }
}
