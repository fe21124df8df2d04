//! Calendar event sources.
//!
//! The engine reads events through the [`EventSource`] trait. Two sources are
//! provided: [`CalendarExportSource`] reads a calendar export file, and
//! [`InMemorySource`] serves events held in memory.

mod export;
mod memory;

use chrono::{DateTime, Utc};

use crate::error::EngineResult;
use crate::models::CalendarEvent;

pub use export::{CalendarExport, CalendarExportSource};
pub use memory::InMemorySource;

/// Provides the events of a calendar over a time range.
pub trait EventSource {
    /// Lists the events of `calendar_id` overlapping `[time_min, time_max)`.
    ///
    /// Implementations return events ordered by start, without soft-deleted
    /// events, with recurring events already expanded to single instances.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::Retrieval`] when the events cannot be obtained.
    fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> EngineResult<Vec<CalendarEvent>>;
}

/// Selects the events a source returns for a range.
///
/// Drops cancelled events and events entirely outside `[time_min, time_max)`,
/// then orders by start. Events whose times do not parse are kept so the
/// accumulator can report them.
pub fn select_events<'a, I>(
    events: I,
    time_min: DateTime<Utc>,
    time_max: DateTime<Utc>,
) -> Vec<CalendarEvent>
where
    I: IntoIterator<Item = &'a CalendarEvent>,
{
    let mut selected: Vec<CalendarEvent> = events
        .into_iter()
        .filter(|event| !event.is_cancelled())
        .filter(|event| event.end.instant().is_none_or(|end| end > time_min))
        .filter(|event| event.start.instant().is_none_or(|start| start < time_max))
        .cloned()
        .collect();

    selected.sort_by_key(|event| event.start.instant());
    selected
}
