//! Childcare billing engine.
//!
//! This crate computes a childminder's invoice for a period from calendar
//! events recording drop-off and pick-up times. Events are classified by label,
//! folded into attendance and leave totals for the requested period and for the
//! time since the contract started, then billed against the fee schedule.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod source;
