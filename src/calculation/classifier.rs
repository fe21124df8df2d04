//! Event classification.
//!
//! Events are classified from their free-text label. The accumulator only
//! depends on the [`EventClassifier`] trait, so label matching can be swapped
//! for structured event tags without touching the fold.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::PatternConfig;
use crate::error::{EngineError, EngineResult};

/// The categories an event belongs to. Flags are independent of each other.
///
/// # Example
///
/// ```
/// use childcare_billing::calculation::EventCategory;
///
/// let category = EventCategory { child_a: true, child_b: false, paid_leave: true };
/// assert!(category.is_attendance());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventCategory {
    /// The event records attendance of the first child (meals and snacks apply).
    pub child_a: bool,
    /// The event records attendance of the second child.
    pub child_b: bool,
    /// The event marks a paid-leave day.
    pub paid_leave: bool,
}

impl EventCategory {
    /// Returns true when the event counts as an attendance day.
    pub fn is_attendance(&self) -> bool {
        self.child_a || self.child_b
    }
}

/// Maps an event label to its categories.
///
/// Implementations must be pure: the same label always yields the same category.
pub trait EventClassifier {
    /// Classifies one label. Matching nothing is a valid outcome.
    fn classify(&self, label: &str) -> EventCategory;
}

impl<F> EventClassifier for F
where
    F: Fn(&str) -> EventCategory,
{
    fn classify(&self, label: &str) -> EventCategory {
        self(label)
    }
}

/// Classifies labels with regular expressions.
///
/// Matching is case-sensitive, searches the whole label, and compares accented
/// characters exactly: "Eleonore" does not match a pattern for "Eléonore".
///
/// # Example
///
/// ```
/// use childcare_billing::calculation::{EventClassifier, PatternClassifier};
///
/// let classifier = PatternClassifier::new("Eléonore", "Eugénie", Some("CA")).unwrap();
///
/// let category = classifier.classify("Eléonore + CA");
/// assert!(category.child_a);
/// assert!(category.paid_leave);
///
/// assert!(!classifier.classify("Eleonore").is_attendance());
/// ```
#[derive(Debug, Clone)]
pub struct PatternClassifier {
    child_a: Regex,
    child_b: Regex,
    paid_leave: Option<Regex>,
}

impl PatternClassifier {
    /// Compiles the three patterns. Pass `None` to disable leave tracking.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidPattern`] naming the pattern that failed to compile.
    pub fn new(child_a: &str, child_b: &str, paid_leave: Option<&str>) -> EngineResult<Self> {
        Ok(Self {
            child_a: compile("child_a", child_a)?,
            child_b: compile("child_b", child_b)?,
            paid_leave: paid_leave
                .map(|pattern| compile("paid_leave", pattern))
                .transpose()?,
        })
    }

    /// Builds a classifier from the `patterns` section of `calendar.yaml`.
    pub fn from_config(patterns: &PatternConfig) -> EngineResult<Self> {
        Self::new(
            &patterns.child_a,
            &patterns.child_b,
            patterns.paid_leave.as_deref(),
        )
    }
}

fn compile(field: &str, pattern: &str) -> EngineResult<Regex> {
    Regex::new(pattern).map_err(|e| EngineError::InvalidPattern {
        field: field.to_string(),
        message: e.to_string(),
    })
}

impl EventClassifier for PatternClassifier {
    fn classify(&self, label: &str) -> EventCategory {
        EventCategory {
            child_a: self.child_a.is_match(label),
            child_b: self.child_b.is_match(label),
            paid_leave: self
                .paid_leave
                .as_ref()
                .is_some_and(|leave| leave.is_match(label)),
        }
    }
}
