//! Outcome types for batch operations.
//!
//! Batch operations never abort on a per-item failure. Each item either
//! succeeds or is reported with its error code and message.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A single failed item in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure<K> {
    /// The item that failed.
    pub key: K,
    /// Stable error code, see [`EngineError::code`].
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl<K> BatchFailure<K> {
    /// Builds a failure entry from the error that caused it.
    pub fn from_error(key: K, error: &EngineError) -> Self {
        Self {
            key,
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Per-item results of a batch operation.
///
/// # Example
///
/// ```
/// use payroll_engine::models::BatchOutcome;
/// use payroll_engine::error::EngineError;
///
/// let mut outcome: BatchOutcome<u32> = BatchOutcome::default();
/// outcome.succeed(1);
/// outcome.fail(2, &EngineError::EmptyBatch);
///
/// assert!(outcome.is_success());
/// assert_eq!(outcome.failed[0].code, "EMPTY_BATCH");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome<K> {
    /// Items that were applied.
    pub succeeded: Vec<K>,
    /// Items that were skipped with a reason.
    pub failed: Vec<BatchFailure<K>>,
}

impl<K> Default for BatchOutcome<K> {
    fn default() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<K> BatchOutcome<K> {
    /// Records a successful item.
    pub fn succeed(&mut self, key: K) {
        self.succeeded.push(key);
    }

    /// Records a failed item with the error that caused it.
    pub fn fail(&mut self, key: K, error: &EngineError) {
        self.failed.push(BatchFailure::from_error(key, error));
    }

    /// True if anything succeeded, or nothing failed.
    pub fn is_success(&self) -> bool {
        !self.succeeded.is_empty() || self.failed.is_empty()
    }
}
