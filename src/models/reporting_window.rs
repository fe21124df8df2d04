//! Reporting window model.
//!
//! This module contains the [`ReportingWindow`] type: the inclusive date range
//! over which attendance and leave are aggregated.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An inclusive date range over which calendar events are aggregated.
///
/// Every run builds two: the requested period, and the window running from the
/// contract start date to the end of the requested period.
///
/// # Example
///
/// ```
/// use childcare_billing::models::ReportingWindow;
/// use chrono::NaiveDate;
///
/// let window = ReportingWindow::new(
///     NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2016, 1, 31).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(window.to_string(), "2016-01-01 to 2016-01-31");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingWindow {
    /// The first day of the window (inclusive).
    pub from: NaiveDate,
    /// The last day of the window (inclusive).
    pub to: NaiveDate,
}

impl ReportingWindow {
    /// Creates a window, rejecting one that ends before it starts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidWindow`] when `from > to`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> EngineResult<Self> {
        if from > to {
            return Err(EngineError::InvalidWindow { from, to });
        }
        Ok(Self { from, to })
    }

    /// Lower bound sent to the event source: midnight UTC on `from`.
    pub fn time_min(&self) -> DateTime<Utc> {
        self.from.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    /// Exclusive upper bound sent to the event source: midnight UTC after `to`.
    pub fn time_max(&self) -> DateTime<Utc> {
        let day_after = self.to.checked_add_days(Days::new(1)).unwrap_or(self.to);
        day_after.and_time(chrono::NaiveTime::MIN).and_utc()
    }
}

impl std::fmt::Display for ReportingWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.from, self.to)
    }
}
