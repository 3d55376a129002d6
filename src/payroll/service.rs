//! Payroll operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::PayrollEngine;
use super::guard::{ensure_no_overlap, has_overlap, map_write_error};
use crate::calculation::{PayrollInputs, compute_payroll};
use crate::config::SchedulePolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BatchOutcome, PayPeriod, PayrollComputation, PayrollId, PayrollRecord, WorkSchedule,
};
use crate::reconciliation;
use crate::store::{AttendanceStore, EmployeeDirectory, EngineStore, PayrollStore, StoreError};

fn lifecycle_error(error: StoreError, payroll_id: PayrollId, action: &str) -> EngineError {
    match error {
        StoreError::StatusMismatch { actual, .. } => EngineError::InvalidStateTransition {
            payroll_id,
            status: actual,
            action: action.to_string(),
        },
        StoreError::NotFound { .. } => EngineError::PayrollNotFound { payroll_id },
        other => other.into(),
    }
}

impl<S, P> PayrollEngine<'_, S, P>
where
    S: EngineStore + ?Sized,
    P: SchedulePolicy + ?Sized,
{
    /// Computes payroll for an employee over an inclusive period.
    ///
    /// Pure with respect to storage: nothing is written. Uses the employee's
    /// current hourly rate and the late deduction of the schedule version in
    /// force on the period's last day.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidPeriod`] if `end_date < start_date`.
    /// - [`EngineError::InvalidAllowances`] if `allowances` is negative.
    /// - [`EngineError::EmployeeNotFound`] for an unknown employee.
    /// - [`EngineError::ScheduleNotEffective`] if no version covers `end_date`.
    pub fn calculate(
        &self,
        employee_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        allowances: Decimal,
    ) -> EngineResult<PayrollComputation> {
        let period = PayPeriod::new(start_date, end_date)?;
        let schedule = self.policy.schedule_for(period.end_date)?;
        self.compute(employee_id, period, allowances, schedule)
    }

    fn compute(
        &self,
        employee_id: &str,
        period: PayPeriod,
        allowances: Decimal,
        schedule: &WorkSchedule,
    ) -> EngineResult<PayrollComputation> {
        if allowances < Decimal::ZERO {
            return Err(EngineError::InvalidAllowances { amount: allowances });
        }
        let hourly_rate =
            self.store
                .hourly_rate(employee_id)?
                .ok_or_else(|| EngineError::EmployeeNotFound {
                    employee_id: employee_id.to_string(),
                })?;

        let attendance = self.store.attendance_between(employee_id, &period)?;
        let approved_overtime = reconciliation::approved_overtime(self.store, employee_id, &period)?;

        let computation = compute_payroll(&PayrollInputs {
            employee_id,
            period,
            hourly_rate,
            allowances,
            schedule,
            attendance: &attendance,
            approved_overtime: &approved_overtime,
        });

        debug!(
            employee_id,
            start_date = %period.start_date,
            end_date = %period.end_date,
            schedule_version = schedule.version,
            net_pay = %computation.net_pay,
            "Payroll computed"
        );
        Ok(computation)
    }

    /// Persists a computation as a new `Calculated` record.
    ///
    /// # Errors
    ///
    /// [`EngineError::PeriodOverlap`] if another record for the employee
    /// shares any date with the period, including when a concurrent save
    /// got there first.
    pub fn save(&self, computation: &PayrollComputation) -> EngineResult<PayrollRecord> {
        let employee_id = computation.employee_id.as_str();
        ensure_no_overlap(self.store, employee_id, &computation.period, None)?;

        let record = self
            .store
            .insert_payroll(computation)
            .map_err(|e| map_write_error(e, employee_id, &computation.period))?;

        info!(
            payroll_id = %record.id,
            employee_id,
            start_date = %record.period.start_date,
            end_date = %record.period.end_date,
            net_pay = %record.net_pay,
            "Payroll saved"
        );
        Ok(record)
    }

    /// Looks up a payroll record.
    pub fn payroll(&self, payroll_id: PayrollId) -> EngineResult<PayrollRecord> {
        self.store
            .payroll(payroll_id)?
            .ok_or(EngineError::PayrollNotFound { payroll_id })
    }

    /// Re-runs the calculation for an existing `Calculated` record.
    ///
    /// The stored period, allowances, and pinned schedule version are reused;
    /// attendance, approved overtime, and the hourly rate are read fresh.
    /// Recalculating twice with unchanged inputs yields identical figures.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidStateTransition`] if the record is `Paid`.
    /// - [`EngineError::ScheduleVersionNotFound`] if the pinned version was
    ///   removed from configuration.
    pub fn recalculate(&self, existing: &PayrollRecord) -> EngineResult<PayrollRecord> {
        if !existing.is_editable() {
            warn!(payroll_id = %existing.id, status = %existing.status, "Recalculation of locked payroll rejected");
            return Err(EngineError::InvalidStateTransition {
                payroll_id: existing.id,
                status: existing.status,
                action: "recalculate".to_string(),
            });
        }

        let schedule = self.policy.schedule_version(existing.schedule_version)?;
        let computation = self.compute(
            &existing.employee_id,
            existing.period,
            existing.allowances,
            schedule,
        )?;
        ensure_no_overlap(
            self.store,
            &existing.employee_id,
            &existing.period,
            Some(existing.id),
        )?;

        let mut updated = existing.clone();
        updated.apply(&computation);
        self.store.update_payroll(&updated).map_err(|e| match e {
            StoreError::PeriodConflict { .. } => {
                map_write_error(e, &existing.employee_id, &existing.period)
            }
            other => lifecycle_error(other, existing.id, "recalculate"),
        })?;

        info!(
            payroll_id = %updated.id,
            employee_id = %updated.employee_id,
            net_pay = %updated.net_pay,
            "Payroll recalculated"
        );
        Ok(updated)
    }

    /// Transitions each listed record from `Calculated` to `Paid`.
    ///
    /// Records that are missing or already paid are reported in the outcome
    /// and the rest of the batch still proceeds.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmptyBatch`] if `payroll_ids` is empty.
    pub fn process_batch(
        &self,
        payroll_ids: &[PayrollId],
        paid_date: NaiveDate,
    ) -> EngineResult<BatchOutcome<PayrollId>> {
        if payroll_ids.is_empty() {
            return Err(EngineError::EmptyBatch);
        }

        let mut outcome = BatchOutcome::default();
        for &payroll_id in payroll_ids {
            match self.store.mark_payroll_paid(payroll_id, paid_date) {
                Ok(_) => outcome.succeed(payroll_id),
                Err(e) => {
                    let e = lifecycle_error(e, payroll_id, "process");
                    warn!(payroll_id = %payroll_id, error = %e, "Payroll processing skipped");
                    outcome.fail(payroll_id, &e);
                }
            }
        }

        info!(
            processed = outcome.succeeded.len(),
            failed = outcome.failed.len(),
            %paid_date,
            "Payroll batch processed"
        );
        Ok(outcome)
    }

    /// Deletes a `Calculated` record.
    ///
    /// # Errors
    ///
    /// - [`EngineError::PayrollNotFound`] if the record does not exist.
    /// - [`EngineError::InvalidStateTransition`] if the record is `Paid`.
    pub fn delete(&self, payroll_id: PayrollId) -> EngineResult<()> {
        self.store
            .delete_payroll(payroll_id)
            .map_err(|e| lifecycle_error(e, payroll_id, "delete"))?;
        info!(payroll_id = %payroll_id, "Payroll deleted");
        Ok(())
    }

    /// Returns true if the period overlaps another record for the employee.
    pub fn has_overlap(
        &self,
        employee_id: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        excluding: Option<PayrollId>,
    ) -> EngineResult<bool> {
        let period = PayPeriod::new(start_date, end_date)?;
        has_overlap(self.store, employee_id, &period, excluding)
    }
}
