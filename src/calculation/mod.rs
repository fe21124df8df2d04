//! Calculation logic for the childcare billing engine.
//!
//! This module contains period resolution (month shorthand and cumulative
//! window), label classification, the attendance fold, and the invoice
//! arithmetic.

mod accumulator;
mod classifier;
mod invoice;
mod period;

pub use accumulator::{AttendanceSpan, SNACK_CUTOFF_HOUR, fold_events, resolve_span};
pub use classifier::{EventCategory, EventClassifier, PatternClassifier};
pub use invoice::{ENGINE_VERSION, compute_invoice};
pub use period::{
    DATE_FORMAT, last_day_of_month, parse_date, parse_month, resolve_period, since_contract_start,
};
