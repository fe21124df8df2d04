//! Core data models for the childcare billing engine.
//!
//! This module contains all the domain models used throughout the engine.

mod aggregate_totals;
mod calendar_event;
mod invoice_result;
mod reporting_window;

pub use aggregate_totals::AggregateTotals;
pub use calendar_event::{CANCELLED_STATUS, CalendarEvent, EventTime};
pub use invoice_result::{ChargeCategory, ChargeLine, InvoiceResult};
pub use reporting_window::ReportingWindow;
