//! In-memory event source.

use chrono::{DateTime, Utc};

use super::{EventSource, select_events};
use crate::error::{EngineError, EngineResult};
use crate::models::CalendarEvent;

/// An [`EventSource`] serving a fixed list of events for one calendar.
///
/// # Example
///
/// ```
/// use childcare_billing::models::{CalendarEvent, ReportingWindow};
/// use childcare_billing::source::{EventSource, InMemorySource};
/// use chrono::NaiveDate;
///
/// let source = InMemorySource::new(
///     "nounou",
///     vec![CalendarEvent::timed(
///         "Eugénie",
///         "2016-01-04T08:30:00+01:00",
///         "2016-01-04T17:00:00+01:00",
///     )],
/// );
/// let window = ReportingWindow::new(
///     NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2016, 1, 31).unwrap(),
/// )
/// .unwrap();
///
/// let events = source.list_events("nounou", window.time_min(), window.time_max()).unwrap();
/// assert_eq!(events.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    calendar_id: String,
    events: Vec<CalendarEvent>,
}

impl InMemorySource {
    /// Creates a source holding `events` for `calendar_id`.
    pub fn new(calendar_id: impl Into<String>, events: Vec<CalendarEvent>) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            events,
        }
    }
}

impl EventSource for InMemorySource {
    fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> EngineResult<Vec<CalendarEvent>> {
        if calendar_id != self.calendar_id {
            return Err(EngineError::Retrieval {
                calendar_id: calendar_id.to_string(),
                message: "calendar not found".to_string(),
            });
        }
        Ok(select_events(&self.events, time_min, time_max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_unknown_calendar() {
        let source = InMemorySource::new("nounou", vec![]);
        let now = NaiveDate::from_ymd_opt(2016, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();

        match source.list_events("someone-else", now, now) {
            Err(EngineError::Retrieval { calendar_id, .. }) => {
                assert_eq!(calendar_id, "someone-else")
            }
            other => panic!("Expected Retrieval error, got {:?}", other),
        }
    }
}
