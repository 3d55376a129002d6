//! Payroll lifecycle.
//!
//! [`PayrollEngine`] calculates, saves, recalculates, processes, and deletes
//! payroll records. Like the attendance engine it only borrows its
//! collaborators.
//!
//! Records move `Calculated -> Paid` and never back. `Paid` records are
//! immutable.

mod guard;
mod service;

pub use guard::{ensure_no_overlap, has_overlap, map_write_error};

/// Payroll operations over a storage backend and schedule policy.
pub struct PayrollEngine<'a, S: ?Sized, P: ?Sized> {
    store: &'a S,
    policy: &'a P,
}

impl<'a, S: ?Sized, P: ?Sized> PayrollEngine<'a, S, P> {
    /// Creates an engine borrowing the given collaborators.
    pub fn new(store: &'a S, policy: &'a P) -> Self {
        Self { store, policy }
    }
}
