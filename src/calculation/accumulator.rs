//! Attendance accumulation.
//!
//! This module folds a window's calendar events into [`AggregateTotals`]:
//! attendance days and duration for child events, meals and snacks for the
//! first child, and paid-leave markers.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Timelike};
use tracing::{debug, info, warn};

use super::classifier::EventClassifier;
use crate::error::{EngineError, EngineResult};
use crate::models::{AggregateTotals, CalendarEvent, ReportingWindow};

/// A pick-up at or after this hour (in the event's own offset) earns a snack.
pub const SNACK_CUTOFF_HOUR: u32 = 16;

/// The resolved start and end of an attendance event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceSpan {
    /// Drop-off. Midnight of the start date for all-day events.
    pub start: DateTime<FixedOffset>,
    /// Pick-up.
    pub end: DateTime<FixedOffset>,
}

impl AttendanceSpan {
    /// Wall-clock time between drop-off and pick-up.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns true when pick-up is late enough for a snack.
    pub fn includes_snack(&self) -> bool {
        self.end.hour() >= SNACK_CUTOFF_HOUR
    }
}

fn invalid_event(event: &CalendarEvent, message: impl Into<String>) -> EngineError {
    EngineError::InvalidEvent {
        label: event.label.clone(),
        message: message.into(),
    }
}

/// Resolves the start and end of an event.
///
/// The end must be a precise timestamp, even for all-day events. An all-day
/// start is taken at midnight in the end timestamp's offset.
///
/// # Errors
///
/// Returns [`EngineError::InvalidEvent`] when:
/// - the end has no precise timestamp, or either value does not parse
/// - the event ends before it starts
///
/// # Example
///
/// ```
/// use childcare_billing::calculation::resolve_span;
/// use childcare_billing::models::CalendarEvent;
/// use chrono::Duration;
///
/// let event = CalendarEvent::timed(
///     "Eléonore",
///     "2016-01-04T08:30:00+01:00",
///     "2016-01-04T17:00:00+01:00",
/// );
/// let span = resolve_span(&event).unwrap();
/// assert_eq!(span.duration(), Duration::minutes(510));
/// assert!(span.includes_snack());
/// ```
pub fn resolve_span(event: &CalendarEvent) -> EngineResult<AttendanceSpan> {
    let end_text = event.end.date_time.as_deref().ok_or_else(|| {
        invalid_event(event, "end has no precise timestamp (date-only end of an all-day event)")
    })?;
    let end = DateTime::parse_from_rfc3339(end_text)
        .map_err(|e| invalid_event(event, format!("unparseable end '{}': {}", end_text, e)))?;

    let start = if event.is_all_day() {
        let date_text = event
            .start
            .date
            .as_deref()
            .ok_or_else(|| invalid_event(event, "event has no start"))?;
        let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d").map_err(|e| {
            invalid_event(event, format!("unparseable start date '{}': {}", date_text, e))
        })?;
        date.and_hms_opt(0, 0, 0)
            .and_then(|midnight| midnight.and_local_timezone(*end.offset()).single())
            .ok_or_else(|| invalid_event(event, "start date out of range"))?
    } else {
        let start_text = event
            .start
            .date_time
            .as_deref()
            .ok_or_else(|| invalid_event(event, "event has no start"))?;
        DateTime::parse_from_rfc3339(start_text).map_err(|e| {
            invalid_event(event, format!("unparseable start '{}': {}", start_text, e))
        })?
    };

    if end < start {
        return Err(invalid_event(
            event,
            format!("ends at {} before it starts at {}", end, start),
        ));
    }

    Ok(AttendanceSpan { start, end })
}

/// Folds a window's events into attendance and leave totals.
///
/// For every event:
/// - a matched event whose start cannot be placed in time is skipped entirely;
/// - a paid-leave match adds one leave day, whether or not a child also matches;
/// - a child match adds one attendance day and the event's duration;
/// - a first-child match also adds a meal, and a snack when pick-up is at or
///   after [`SNACK_CUTOFF_HOUR`].
///
/// Child events whose timestamps cannot otherwise be resolved are logged, counted in
/// `skipped_count` and otherwise ignored; the fold carries on. An empty slice
/// yields all-zero totals. The result does not depend on event order.
///
/// # Example
///
/// ```
/// use childcare_billing::calculation::{fold_events, PatternClassifier};
/// use childcare_billing::models::{CalendarEvent, ReportingWindow};
/// use chrono::NaiveDate;
///
/// let classifier = PatternClassifier::new("Eléonore", "Eugénie", Some("CA")).unwrap();
/// let window = ReportingWindow::new(
///     NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2016, 1, 31).unwrap(),
/// )
/// .unwrap();
///
/// let events = vec![CalendarEvent::timed(
///     "Eléonore",
///     "2016-01-04T08:30:00+01:00",
///     "2016-01-04T16:30:00+01:00",
/// )];
///
/// let totals = fold_events(&events, &classifier, &window);
/// assert_eq!(totals.day_count, 1);
/// assert_eq!(totals.meal_count, 1);
/// assert_eq!(totals.snack_count, 1);
/// ```
pub fn fold_events<C>(
    events: &[CalendarEvent],
    classifier: &C,
    window: &ReportingWindow,
) -> AggregateTotals
where
    C: EventClassifier + ?Sized,
{
    let mut totals = AggregateTotals::empty(*window);

    for event in events {
        totals.event_count += 1;
        let category = classifier.classify(&event.label);
        debug!(label = %event.label, ?category, "Classified event");

        if !category.paid_leave && !category.is_attendance() {
            continue;
        }

        if event.start.instant().is_none() {
            warn!(
                window = %window,
                label = %event.label,
                "Skipping event with an unparseable start"
            );
            totals.skipped_count += 1;
            continue;
        }

        if category.paid_leave {
            totals.leave_count += 1;
        }

        if !category.is_attendance() {
            continue;
        }

        let span = match resolve_span(event) {
            Ok(span) => span,
            Err(err) => {
                warn!(window = %window, error = %err, "Skipping event");
                totals.skipped_count += 1;
                continue;
            }
        };

        totals.day_count += 1;
        totals.total_duration = totals.total_duration + span.duration();

        if category.child_a {
            totals.meal_count += 1;
            if span.includes_snack() {
                totals.snack_count += 1;
            }
        }
    }

    info!(
        window = %window,
        events = totals.event_count,
        days = totals.day_count,
        hours = %totals.total_hours(),
        leave = totals.leave_count,
        skipped = totals.skipped_count,
        "Folded events"
    );

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::PatternClassifier;
    use crate::models::EventTime;
    use proptest::prelude::*;

    fn classifier() -> PatternClassifier {
        PatternClassifier::new("Eléonore", "Eugénie", Some("CA")).unwrap()
    }

    fn window() -> ReportingWindow {
        ReportingWindow::new(
            NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2016, 1, 31).unwrap(),
        )
        .unwrap()
    }

    fn day(label: &str, day: u32, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent::timed(
            label,
            format!("2016-01-{:02}T{}:00+01:00", day, start),
            format!("2016-01-{:02}T{}:00+01:00", day, end),
        )
    }

    #[test]
    fn test_empty_sequence_yields_zero_totals() {
        let totals = fold_events(&[], &classifier(), &window());
        assert_eq!(totals, AggregateTotals::empty(window()));
        assert!(totals.is_empty());
    }

    #[test]
    fn test_single_child_a_day() {
        let events = vec![day("Eléonore", 4, "08:30", "17:00")];
        let totals = fold_events(&events, &classifier(), &window());

        assert_eq!(totals.event_count, 1);
        assert_eq!(totals.day_count, 1);
        assert_eq!(totals.total_duration, Duration::minutes(510));
        assert_eq!(totals.meal_count, 1);
        assert_eq!(totals.snack_count, 1);
        assert_eq!(totals.leave_count, 0);
    }

    #[test]
    fn test_child_b_counts_days_but_no_meals() {
        let events = vec![day("Eugénie", 4, "08:30", "17:00")];
        let totals = fold_events(&events, &classifier(), &window());

        assert_eq!(totals.day_count, 1);
        assert_eq!(totals.total_duration, Duration::minutes(510));
        assert_eq!(totals.meal_count, 0);
        assert_eq!(totals.snack_count, 0);
    }

    #[test]
    fn test_snack_only_from_hour_sixteen() {
        let events = vec![
            day("Eléonore", 4, "08:00", "15:59"),
            day("Eléonore", 5, "08:00", "16:00"),
        ];
        let totals = fold_events(&events, &classifier(), &window());

        assert_eq!(totals.meal_count, 2);
        assert_eq!(totals.snack_count, 1);
    }

    #[test]
    fn test_snack_hour_uses_event_offset() {
        // 15:30 UTC is 16:30 in +01:00.
        let event = CalendarEvent::timed(
            "Eléonore",
            "2016-01-04T08:00:00+01:00",
            "2016-01-04T16:30:00+01:00",
        );
        let utc = CalendarEvent::timed(
            "Eléonore",
            "2016-01-04T07:00:00Z",
            "2016-01-04T15:30:00Z",
        );
        let totals = fold_events(&[event, utc], &classifier(), &window());

        assert_eq!(totals.snack_count, 1);
    }

    #[test]
    fn test_one_event_is_one_day_regardless_of_duration() {
        let events = vec![
            day("Eugénie", 4, "08:00", "09:00"),
            day("Eugénie", 4, "14:00", "18:00"),
        ];
        let totals = fold_events(&events, &classifier(), &window());

        assert_eq!(totals.day_count, 2);
        assert_eq!(totals.total_duration, Duration::hours(5));
    }

    #[test]
    fn test_label_with_both_children_counts_once() {
        let events = vec![day("Eléonore et Eugénie", 4, "08:00", "16:00")];
        let totals = fold_events(&events, &classifier(), &window());

        assert_eq!(totals.day_count, 1);
        assert_eq!(totals.meal_count, 1);
    }

    #[test]
    fn test_leave_is_independent_of_children() {
        let events = vec![
            CalendarEvent::all_day("CA nounou", "2016-01-06", EventTime::on("2016-01-07")),
            day("Eléonore CA", 7, "08:00", "12:00"),
            day("Réunion", 8, "18:00", "19:00"),
        ];
        let totals = fold_events(&events, &classifier(), &window());

        assert_eq!(totals.event_count, 3);
        assert_eq!(totals.leave_count, 2);
        assert_eq!(totals.day_count, 1);
        assert_eq!(totals.skipped_count, 0);
    }

    #[test]
    fn test_unmatched_events_contribute_nothing() {
        let events = vec![day("Eleonore", 4, "08:00", "17:00")];
        let totals = fold_events(&events, &classifier(), &window());

        assert_eq!(totals.event_count, 1);
        assert_eq!(totals.day_count, 0);
        assert_eq!(totals.total_duration, Duration::zero());
    }

    #[test]
    fn test_negative_duration_is_skipped_and_fold_continues() {
        let events = vec![
            day("Eléonore", 4, "17:00", "08:00"),
            day("Eléonore", 5, "08:00", "17:00"),
        ];
        let totals = fold_events(&events, &classifier(), &window());

        assert_eq!(totals.skipped_count, 1);
        assert_eq!(totals.day_count, 1);
        assert_eq!(totals.meal_count, 1);
        assert_eq!(totals.total_duration, Duration::hours(9));
    }

    #[test]
    fn test_unparseable_timestamp_is_skipped() {
        let events = vec![CalendarEvent::timed(
            "Eugénie",
            "2016-01-04 08:00",
            "2016-01-04T17:00:00+01:00",
        )];
        let totals = fold_events(&events, &classifier(), &window());

        assert_eq!(totals.skipped_count, 1);
        assert_eq!(totals.day_count, 0);
    }

    #[test]
    fn test_all_day_start_with_precise_end() {
        let event = CalendarEvent::all_day(
            "Eléonore",
            "2016-01-04",
            EventTime::at("2016-01-04T17:30:00+01:00"),
        );
        let span = resolve_span(&event).unwrap();

        assert_eq!(span.start.to_rfc3339(), "2016-01-04T00:00:00+01:00");
        assert_eq!(span.duration(), Duration::minutes(17 * 60 + 30));
    }

    #[test]
    fn test_all_day_event_with_date_only_end_is_rejected() {
        let event = CalendarEvent::all_day("Eléonore", "2016-01-04", EventTime::on("2016-01-05"));

        match resolve_span(&event) {
            Err(EngineError::InvalidEvent { label, message }) => {
                assert_eq!(label, "Eléonore");
                assert!(message.contains("no precise timestamp"));
            }
            other => panic!("Expected InvalidEvent error, got {:?}", other),
        }

        let totals = fold_events(&[event], &classifier(), &window());
        assert_eq!(totals.skipped_count, 1);
        assert_eq!(totals.day_count, 0);
    }

    #[test]
    fn test_leave_counted_even_when_child_event_is_skipped() {
        let event = CalendarEvent::all_day("Eugénie CA", "2016-01-04", EventTime::on("2016-01-05"));
        let totals = fold_events(&[event], &classifier(), &window());

        assert_eq!(totals.leave_count, 1);
        assert_eq!(totals.skipped_count, 1);
    }

    #[test]
    fn test_leave_marker_with_impossible_date_is_skipped_in_every_window() {
        let marker = CalendarEvent::all_day("CA nounou", "2016-03-40", EventTime::on("2016-03-41"));
        let march = ReportingWindow::new(
            NaiveDate::from_ymd_opt(2016, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2016, 3, 31).unwrap(),
        )
        .unwrap();

        for window in [window(), march] {
            let totals = fold_events(std::slice::from_ref(&marker), &classifier(), &window);
            assert_eq!(totals.event_count, 1);
            assert_eq!(totals.leave_count, 0);
            assert_eq!(totals.skipped_count, 1);
        }
    }

    #[test]
    fn test_child_and_leave_label_with_bad_start_is_skipped_once() {
        let event = CalendarEvent::timed(
            "Eléonore CA",
            "2016-01-04 08:00",
            "2016-01-04T17:00:00+01:00",
        );
        let totals = fold_events(&[event], &classifier(), &window());

        assert_eq!(totals.skipped_count, 1);
        assert_eq!(totals.leave_count, 0);
        assert_eq!(totals.day_count, 0);
    }

    #[test]
    fn test_zero_length_event_counts_a_day() {
        let events = vec![day("Eugénie", 4, "08:00", "08:00")];
        let totals = fold_events(&events, &classifier(), &window());

        assert_eq!(totals.day_count, 1);
        assert_eq!(totals.total_duration, Duration::zero());
    }

    #[test]
    fn test_custom_classifier_is_used() {
        let everything = |_: &str| crate::calculation::EventCategory {
            child_a: false,
            child_b: true,
            paid_leave: false,
        };
        let events = vec![day("anything", 4, "08:00", "10:00")];
        let totals = fold_events(&events, &everything, &window());

        assert_eq!(totals.day_count, 1);
    }

    fn labels() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("Eléonore"),
            Just("Eugénie"),
            Just("Eléonore CA"),
            Just("CA"),
            Just("Courses"),
        ]
    }

    fn arb_event() -> impl Strategy<Value = CalendarEvent> {
        (labels(), 1u32..=28, 6u32..=12, 1u32..=10, -1i32..=1).prop_map(
            |(label, d, start_hour, length, skew)| {
                // A skew of -1 produces an event that ends before it starts.
                let end_hour = if skew < 0 { start_hour - 1 } else { start_hour + length };
                CalendarEvent::timed(
                    label,
                    format!("2016-01-{:02}T{:02}:00:00+01:00", d, start_hour),
                    format!("2016-01-{:02}T{:02}:00:00+01:00", d, end_hour),
                )
            },
        )
    }

    proptest! {
        #[test]
        fn prop_fold_is_order_independent(
            events in proptest::collection::vec(arb_event(), 0..40),
            seed in any::<u64>(),
        ) {
            let forward = fold_events(&events, &classifier(), &window());

            let mut reversed = events.clone();
            reversed.reverse();
            prop_assert_eq!(&fold_events(&reversed, &classifier(), &window()), &forward);

            let mut rotated = events.clone();
            if !rotated.is_empty() {
                let shift = (seed as usize) % rotated.len();
                rotated.rotate_left(shift);
            }
            prop_assert_eq!(&fold_events(&rotated, &classifier(), &window()), &forward);
        }

        #[test]
        fn prop_totals_never_negative(events in proptest::collection::vec(arb_event(), 0..40)) {
            let totals = fold_events(&events, &classifier(), &window());
            prop_assert!(totals.total_duration >= Duration::zero());
            prop_assert!(totals.day_count + totals.skipped_count <= totals.event_count);
            prop_assert!(totals.snack_count <= totals.meal_count);
        }
    }
}
