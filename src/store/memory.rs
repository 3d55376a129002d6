//! In-memory storage backend.
//!
//! This module provides an implementation of every storage trait suitable for
//! tests, benchmarks, and local development. All data lives in ordered maps
//! behind a single `RwLock`, so each trait method is atomic.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use super::{
    AttendanceStore, EmployeeDirectory, HolidayCalendar, PayrollStore, RequestStore, StoreError,
    StoreResult,
};
use crate::models::{
    AttendanceRecord, Employee, Holiday, LeaveRequest, OvertimeRequest, PayPeriod,
    PayrollComputation, PayrollId, PayrollRecord, PayrollStatus, RequestStatus,
};

/// In-memory storage backend.
///
/// Cloning is cheap and every clone shares the same data.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Employee;
/// use payroll_engine::store::{EmployeeDirectory, InMemoryStore};
/// use rust_decimal::Decimal;
///
/// let store = InMemoryStore::new();
/// store.add_employee(Employee::new("emp_001", "Ana Reyes", Decimal::new(100, 0)));
///
/// assert_eq!(store.active_employees().unwrap().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<MemoryData>>,
}

#[derive(Default)]
struct MemoryData {
    employees: BTreeMap<String, Employee>,
    attendance: BTreeMap<(NaiveDate, String), AttendanceRecord>,
    leave_requests: Vec<LeaveRequest>,
    overtime_requests: Vec<OvertimeRequest>,
    holidays: BTreeMap<NaiveDate, Holiday>,
    payrolls: BTreeMap<PayrollId, PayrollRecord>,
    next_payroll_id: u64,
}

impl MemoryData {
    fn first_overlap(
        &self,
        employee_id: &str,
        period: &PayPeriod,
        excluding: Option<PayrollId>,
    ) -> Option<PayrollId> {
        self.payrolls
            .values()
            .find(|p| {
                p.employee_id == employee_id
                    && Some(p.id) != excluding
                    && p.period.overlaps(period)
            })
            .map(|p| p.id)
    }
}

fn payroll_not_found(payroll_id: PayrollId) -> StoreError {
    StoreError::NotFound {
        entity: "payroll record",
        key: payroll_id.to_string(),
    }
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, MemoryData> {
        self.data.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, MemoryData> {
        self.data.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Adds or replaces an employee.
    pub fn add_employee(&self, employee: Employee) {
        self.write().employees.insert(employee.id.clone(), employee);
    }

    /// Adds or replaces the holiday on `holiday.date`.
    pub fn add_holiday(&self, holiday: Holiday) {
        self.write().holidays.insert(holiday.date, holiday);
    }

    /// Adds a leave request.
    pub fn add_leave_request(&self, request: LeaveRequest) {
        self.write().leave_requests.push(request);
    }

    /// Adds an overtime request.
    pub fn add_overtime_request(&self, request: OvertimeRequest) {
        self.write().overtime_requests.push(request);
    }
}

impl EmployeeDirectory for InMemoryStore {
    fn active_employees(&self) -> StoreResult<Vec<Employee>> {
        Ok(self
            .read()
            .employees
            .values()
            .filter(|e| e.is_active)
            .cloned()
            .collect())
    }

    fn employee(&self, employee_id: &str) -> StoreResult<Option<Employee>> {
        Ok(self.read().employees.get(employee_id).cloned())
    }
}

impl AttendanceStore for InMemoryStore {
    fn attendance(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>> {
        Ok(self
            .read()
            .attendance
            .get(&(date, employee_id.to_string()))
            .cloned())
    }

    fn attendance_on(&self, date: NaiveDate) -> StoreResult<Vec<AttendanceRecord>> {
        Ok(self
            .read()
            .attendance
            .range((date, String::new())..)
            .take_while(|((d, _), _)| *d == date)
            .map(|(_, r)| r.clone())
            .collect())
    }

    fn attendance_between(
        &self,
        employee_id: &str,
        period: &PayPeriod,
    ) -> StoreResult<Vec<AttendanceRecord>> {
        Ok(self
            .read()
            .attendance
            .range((period.start_date, String::new())..)
            .take_while(|((d, _), _)| *d <= period.end_date)
            .filter(|((_, id), _)| id == employee_id)
            .map(|(_, r)| r.clone())
            .collect())
    }

    fn insert_attendance(&self, mut record: AttendanceRecord) -> StoreResult<AttendanceRecord> {
        let mut data = self.write();
        let key = (record.date, record.employee_id.clone());
        if data.attendance.contains_key(&key) {
            return Err(StoreError::Duplicate {
                employee_id: record.employee_id,
                date: record.date,
            });
        }
        record.revision = 1;
        data.attendance.insert(key, record.clone());
        Ok(record)
    }

    fn update_attendance(&self, mut record: AttendanceRecord) -> StoreResult<AttendanceRecord> {
        let mut data = self.write();
        let key = (record.date, record.employee_id.clone());
        let Some(stored) = data.attendance.get_mut(&key) else {
            return Err(StoreError::NotFound {
                entity: "attendance record",
                key: format!("{}/{}", record.employee_id, record.date),
            });
        };
        if stored.revision != record.revision {
            return Err(StoreError::StaleRevision {
                employee_id: record.employee_id,
                date: record.date,
                expected: record.revision,
            });
        }
        record.revision += 1;
        *stored = record.clone();
        Ok(record)
    }
}

impl RequestStore for InMemoryStore {
    fn leave_requests(
        &self,
        employee_id: &str,
        status: Option<RequestStatus>,
        period: &PayPeriod,
    ) -> StoreResult<Vec<LeaveRequest>> {
        Ok(self
            .read()
            .leave_requests
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .filter(|r| status.is_none_or(|s| r.status == s))
            .filter(|r| r.start_date <= period.end_date && period.start_date <= r.end_date)
            .cloned()
            .collect())
    }

    fn overtime_requests(
        &self,
        employee_id: &str,
        status: Option<RequestStatus>,
        period: &PayPeriod,
    ) -> StoreResult<Vec<OvertimeRequest>> {
        let mut requests: Vec<OvertimeRequest> = self
            .read()
            .overtime_requests
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .filter(|r| status.is_none_or(|s| r.status == s))
            .filter(|r| period.contains_date(r.request_date))
            .cloned()
            .collect();
        requests.sort_by(|a, b| (a.request_date, &a.id).cmp(&(b.request_date, &b.id)));
        Ok(requests)
    }
}

impl HolidayCalendar for InMemoryStore {
    fn holiday_on(&self, date: NaiveDate) -> StoreResult<Option<Holiday>> {
        Ok(self.read().holidays.get(&date).cloned())
    }
}

impl PayrollStore for InMemoryStore {
    fn payroll(&self, payroll_id: PayrollId) -> StoreResult<Option<PayrollRecord>> {
        Ok(self.read().payrolls.get(&payroll_id).cloned())
    }

    fn overlapping_payrolls(
        &self,
        employee_id: &str,
        period: &PayPeriod,
        excluding: Option<PayrollId>,
    ) -> StoreResult<Vec<PayrollRecord>> {
        Ok(self
            .read()
            .payrolls
            .values()
            .filter(|p| {
                p.employee_id == employee_id
                    && Some(p.id) != excluding
                    && p.period.overlaps(period)
            })
            .cloned()
            .collect())
    }

    fn insert_payroll(&self, computation: &PayrollComputation) -> StoreResult<PayrollRecord> {
        let mut data = self.write();
        if let Some(existing) = data.first_overlap(&computation.employee_id, &computation.period, None)
        {
            return Err(StoreError::PeriodConflict { existing });
        }
        data.next_payroll_id += 1;
        let id = PayrollId(data.next_payroll_id);
        let record = PayrollRecord::calculated(id, computation);
        data.payrolls.insert(id, record.clone());
        Ok(record)
    }

    fn update_payroll(&self, record: &PayrollRecord) -> StoreResult<()> {
        let mut data = self.write();
        let actual = data
            .payrolls
            .get(&record.id)
            .map(|p| p.status)
            .ok_or_else(|| payroll_not_found(record.id))?;
        if actual != PayrollStatus::Calculated {
            return Err(StoreError::StatusMismatch {
                payroll_id: record.id,
                actual,
            });
        }
        if let Some(existing) = data.first_overlap(&record.employee_id, &record.period, Some(record.id))
        {
            return Err(StoreError::PeriodConflict { existing });
        }
        data.payrolls.insert(record.id, record.clone());
        Ok(())
    }

    fn mark_payroll_paid(
        &self,
        payroll_id: PayrollId,
        paid_date: NaiveDate,
    ) -> StoreResult<PayrollRecord> {
        let mut data = self.write();
        let record = data
            .payrolls
            .get_mut(&payroll_id)
            .ok_or_else(|| payroll_not_found(payroll_id))?;
        if record.status != PayrollStatus::Calculated {
            return Err(StoreError::StatusMismatch {
                payroll_id,
                actual: record.status,
            });
        }
        record.status = PayrollStatus::Paid;
        record.paid_date = Some(paid_date);
        Ok(record.clone())
    }

    fn delete_payroll(&self, payroll_id: PayrollId) -> StoreResult<()> {
        let mut data = self.write();
        let actual = data
            .payrolls
            .get(&payroll_id)
            .map(|p| p.status)
            .ok_or_else(|| payroll_not_found(payroll_id))?;
        if actual != PayrollStatus::Calculated {
            return Err(StoreError::StatusMismatch { payroll_id, actual });
        }
        data.payrolls.remove(&payroll_id);
        Ok(())
    }
}
