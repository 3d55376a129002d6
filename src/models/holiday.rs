//! Organization holiday model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An organization-wide non-working date. At most one holiday per date.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Holiday;
/// use chrono::NaiveDate;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2026, 12, 25).unwrap(),
///     name: "Christmas Day".to_string(),
/// };
/// assert_eq!(holiday.name, "Christmas Day");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The holiday date.
    pub date: NaiveDate,
    /// The holiday name.
    pub name: String,
}
