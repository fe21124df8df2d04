//! Aggregate totals for one reporting window.

use chrono::Duration;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ReportingWindow;

/// Attendance and leave totals accumulated over one [`ReportingWindow`].
///
/// Built by the accumulator, which starts from [`AggregateTotals::empty`] and
/// folds events into it; it is not modified afterwards.
///
/// # Example
///
/// ```
/// use childcare_billing::models::{AggregateTotals, ReportingWindow};
/// use chrono::NaiveDate;
///
/// let window = ReportingWindow::new(
///     NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2016, 1, 31).unwrap(),
/// )
/// .unwrap();
///
/// let totals = AggregateTotals::empty(window);
/// assert!(totals.is_empty());
/// assert_eq!(totals.day_count, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateTotals {
    /// The window these totals cover.
    pub window: ReportingWindow,
    /// Number of events seen by the fold, matching or not.
    pub event_count: u32,
    /// Number of attendance events (one per child event, whatever its length).
    pub day_count: u32,
    /// Summed attendance duration.
    #[serde(rename = "total_duration_seconds", with = "duration_seconds")]
    pub total_duration: Duration,
    /// Number of snacks served.
    pub snack_count: u32,
    /// Number of meals served.
    pub meal_count: u32,
    /// Number of paid-leave markers.
    pub leave_count: u32,
    /// Number of matched events rejected because of unusable timestamps.
    pub skipped_count: u32,
}

impl AggregateTotals {
    /// Creates all-zero totals for a window.
    pub fn empty(window: ReportingWindow) -> Self {
        Self {
            window,
            event_count: 0,
            day_count: 0,
            total_duration: Duration::zero(),
            snack_count: 0,
            meal_count: 0,
            leave_count: 0,
            skipped_count: 0,
        }
    }

    /// Returns true when the fold saw no events at all.
    pub fn is_empty(&self) -> bool {
        self.event_count == 0
    }

    /// Total attendance duration in hours.
    ///
    /// ```
    /// use childcare_billing::models::{AggregateTotals, ReportingWindow};
    /// use chrono::{Duration, NaiveDate};
    /// use rust_decimal::Decimal;
    ///
    /// let day = NaiveDate::from_ymd_opt(2016, 1, 4).unwrap();
    /// let mut totals = AggregateTotals::empty(ReportingWindow::new(day, day).unwrap());
    /// totals.total_duration = Duration::minutes(510);
    /// assert_eq!(totals.total_hours(), Decimal::new(85, 1)); // 8.5
    /// ```
    pub fn total_hours(&self) -> Decimal {
        Decimal::from(self.total_duration.num_seconds()) / Decimal::from(3600)
    }
}

/// Serializes a [`Duration`] as whole seconds.
mod duration_seconds {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(duration.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let seconds = i64::deserialize(deserializer)?;
        Duration::try_seconds(seconds)
            .ok_or_else(|| serde::de::Error::custom("duration out of range"))
    }
}
