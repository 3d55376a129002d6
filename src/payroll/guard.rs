//! Pay period overlap guard.
//!
//! No employee may have two payroll records whose periods share a date.
//! The guard gives callers a clear error up front; the store re-checks under
//! its own lock so concurrent saves cannot both pass.

use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayPeriod, PayrollId};
use crate::store::{PayrollStore, StoreError};

/// Returns true if any other record for the employee overlaps `period`.
pub fn has_overlap<S: PayrollStore + ?Sized>(
    store: &S,
    employee_id: &str,
    period: &PayPeriod,
    excluding: Option<PayrollId>,
) -> EngineResult<bool> {
    Ok(!store
        .overlapping_payrolls(employee_id, period, excluding)?
        .is_empty())
}

/// Fails with [`EngineError::PeriodOverlap`] if `period` overlaps another
/// record for the employee.
pub fn ensure_no_overlap<S: PayrollStore + ?Sized>(
    store: &S,
    employee_id: &str,
    period: &PayPeriod,
    excluding: Option<PayrollId>,
) -> EngineResult<()> {
    match store
        .overlapping_payrolls(employee_id, period, excluding)?
        .first()
    {
        Some(existing) => {
            warn!(
                employee_id,
                start_date = %period.start_date,
                end_date = %period.end_date,
                existing = %existing.id,
                "Overlapping pay period rejected"
            );
            Err(overlap(employee_id, period, existing.id))
        }
        None => Ok(()),
    }
}

/// Maps a store write failure, turning a late-detected conflict into
/// [`EngineError::PeriodOverlap`].
pub fn map_write_error(error: StoreError, employee_id: &str, period: &PayPeriod) -> EngineError {
    match error {
        StoreError::PeriodConflict { existing } => {
            warn!(
                employee_id,
                existing = %existing,
                "Concurrent save produced an overlapping pay period"
            );
            overlap(employee_id, period, existing)
        }
        other => other.into(),
    }
}

fn overlap(employee_id: &str, period: &PayPeriod, existing: PayrollId) -> EngineError {
    EngineError::PeriodOverlap {
        employee_id: employee_id.to_string(),
        start_date: period.start_date,
        end_date: period.end_date,
        existing,
    }
}
