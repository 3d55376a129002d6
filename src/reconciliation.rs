//! Leave and overtime request reconciliation.
//!
//! This is the only place request approval state is interpreted. Pending and
//! rejected requests never influence attendance status or pay.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{OvertimeRequest, PayPeriod, RequestStatus};
use crate::store::RequestStore;

/// Returns true if an approved leave request covers `date`.
pub fn is_on_leave<S: RequestStore + ?Sized>(
    store: &S,
    employee_id: &str,
    date: NaiveDate,
) -> EngineResult<bool> {
    let day = PayPeriod {
        start_date: date,
        end_date: date,
    };
    let leaves = store.leave_requests(employee_id, Some(RequestStatus::Approved), &day)?;
    Ok(leaves.iter().any(|l| l.is_approved() && l.covers(date)))
}

/// Approved overtime requests dated inside `period`, ordered by date.
pub fn approved_overtime<S: RequestStore + ?Sized>(
    store: &S,
    employee_id: &str,
    period: &PayPeriod,
) -> EngineResult<Vec<OvertimeRequest>> {
    Ok(store.overtime_requests(employee_id, Some(RequestStatus::Approved), period)?)
}

/// Total approved overtime hours inside `period`.
pub fn approved_overtime_hours<S: RequestStore + ?Sized>(
    store: &S,
    employee_id: &str,
    period: &PayPeriod,
) -> EngineResult<Decimal> {
    Ok(approved_overtime(store, employee_id, period)?
        .iter()
        .map(|r| r.hours)
        .sum())
}
