//! Calendar export file source.
//!
//! Reads events from a JSON file shaped like the calendar provider's event
//! listing: an `items` array of events with `summary`, `status`, `start` and
//! `end`. The file may name the calendar it was exported from.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{EventSource, select_events};
use crate::error::{EngineError, EngineResult};
use crate::models::CalendarEvent;

/// The contents of a calendar export file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarExport {
    /// The calendar the events were exported from, when recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,
    /// The exported events.
    #[serde(default)]
    pub items: Vec<CalendarEvent>,
}

/// An [`EventSource`] backed by a calendar export file.
///
/// The file is read on every call, so each window is a separate fetch.
///
/// # Example
///
/// ```no_run
/// use childcare_billing::source::{CalendarExportSource, EventSource};
/// use childcare_billing::models::ReportingWindow;
/// use chrono::NaiveDate;
///
/// let source = CalendarExportSource::new("./events.json");
/// let window = ReportingWindow::new(
///     NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2016, 1, 31).unwrap(),
/// )?;
/// let events = source.list_events("nounou", window.time_min(), window.time_max())?;
/// # Ok::<(), childcare_billing::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CalendarExportSource {
    path: PathBuf,
}

impl CalendarExportSource {
    /// Creates a source reading the given file.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn read_export(&self, calendar_id: &str) -> EngineResult<CalendarExport> {
        let retrieval = |message: String| EngineError::Retrieval {
            calendar_id: calendar_id.to_string(),
            message,
        };

        let content = fs::read_to_string(&self.path)
            .map_err(|e| retrieval(format!("cannot read {}: {}", self.path.display(), e)))?;

        serde_json::from_str(&content)
            .map_err(|e| retrieval(format!("cannot parse {}: {}", self.path.display(), e)))
    }
}

impl EventSource for CalendarExportSource {
    fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> EngineResult<Vec<CalendarEvent>> {
        let export = self.read_export(calendar_id)?;

        let other_calendar = export
            .calendar_id
            .as_deref()
            .filter(|exported_id| *exported_id != calendar_id);
        if let Some(exported_id) = other_calendar {
            return Err(EngineError::Retrieval {
                calendar_id: calendar_id.to_string(),
                message: format!("{} holds calendar '{}'", self.path.display(), exported_id),
            });
        }

        let events = select_events(&export.items, time_min, time_max);
        debug!(
            path = %self.path.display(),
            exported = export.items.len(),
            selected = events.len(),
            "Read calendar export"
        );
        Ok(events)
    }
}
