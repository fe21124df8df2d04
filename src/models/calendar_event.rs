//! Calendar event model.
//!
//! Events are kept in the shape the calendar provider returns them: a free-text
//! summary plus start and end values that are either a date (all-day events) or
//! an RFC 3339 timestamp. Timestamps stay textual here; they are parsed when the
//! accumulator folds the event so that a malformed entry can be rejected on its own.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The status the provider gives to soft-deleted events.
pub const CANCELLED_STATUS: &str = "cancelled";

/// The start or end of a calendar event.
///
/// All-day events only carry `date`; timed events carry `date_time`.
///
/// # Example
///
/// ```
/// use childcare_billing::models::EventTime;
///
/// let timed = EventTime::at("2016-01-04T08:30:00+01:00");
/// assert!(timed.is_precise());
///
/// let all_day = EventTime::on("2016-01-04");
/// assert!(!all_day.is_precise());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    /// The date, for all-day events (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// The precise timestamp, for timed events (RFC 3339).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
}

impl EventTime {
    /// Creates a precise event time from an RFC 3339 timestamp.
    pub fn at(date_time: impl Into<String>) -> Self {
        Self {
            date: None,
            date_time: Some(date_time.into()),
        }
    }

    /// Creates a date-only event time.
    pub fn on(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            date_time: None,
        }
    }

    /// Returns true when a precise timestamp is present.
    pub fn is_precise(&self) -> bool {
        self.date_time.is_some()
    }

    /// Best-effort instant used for ordering and range selection.
    ///
    /// Dates are taken at midnight UTC. Returns `None` when neither value parses.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        if let Some(date_time) = &self.date_time {
            return DateTime::parse_from_rfc3339(date_time)
                .ok()
                .map(|dt| dt.with_timezone(&Utc));
        }
        let date = NaiveDate::parse_from_str(self.date.as_deref()?, "%Y-%m-%d").ok()?;
        Some(date.and_hms_opt(0, 0, 0)?.and_utc())
    }
}

/// A calendar event recording a child's drop-off and pick-up, or a leave marker.
///
/// # Example
///
/// ```
/// use childcare_billing::models::CalendarEvent;
///
/// let event = CalendarEvent::timed(
///     "Eléonore",
///     "2016-01-04T08:30:00+01:00",
///     "2016-01-04T17:00:00+01:00",
/// );
/// assert!(!event.is_all_day());
/// assert!(!event.is_cancelled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// The free-text label of the event.
    #[serde(rename = "summary", default)]
    pub label: String,
    /// The provider status (`confirmed`, `tentative`, `cancelled`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// When the event starts.
    pub start: EventTime,
    /// When the event ends.
    pub end: EventTime,
}

impl CalendarEvent {
    /// Creates a timed event from two RFC 3339 timestamps.
    pub fn timed(label: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            status: None,
            start: EventTime::at(start),
            end: EventTime::at(end),
        }
    }

    /// Creates an all-day event: date-only start, with the given end value.
    pub fn all_day(label: impl Into<String>, date: impl Into<String>, end: EventTime) -> Self {
        Self {
            label: label.into(),
            status: None,
            start: EventTime::on(date),
            end,
        }
    }

    /// An event is all-day when its start has no precise timestamp.
    pub fn is_all_day(&self) -> bool {
        !self.start.is_precise()
    }

    /// Returns true for soft-deleted events.
    pub fn is_cancelled(&self) -> bool {
        self.status.as_deref() == Some(CANCELLED_STATUS)
    }
}
