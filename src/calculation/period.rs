//! Billing period resolution.
//!
//! This module turns command-line input (an explicit start/end pair, or a
//! `YYYY-MM` month) into a [`ReportingWindow`], and derives the cumulative
//! window that starts on the contract start date.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{EngineError, EngineResult};
use crate::models::ReportingWindow;

/// Date format accepted for `start` and `end`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_error(field: &str, value: &str, message: impl Into<String>) -> EngineError {
    EngineError::Parse {
        field: field.to_string(),
        value: value.to_string(),
        message: message.into(),
    }
}

/// Parses a `YYYY-MM-DD` date, naming `field` in the error.
pub fn parse_date(field: &str, value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| parse_error(field, value, format!("expected YYYY-MM-DD ({})", e)))
}

/// Parses a `YYYY-MM` month into its year and month number.
///
/// # Example
///
/// ```
/// use childcare_billing::calculation::parse_month;
///
/// assert_eq!(parse_month("2015-12").unwrap(), (2015, 12));
/// assert!(parse_month("2015-13").is_err());
/// assert!(parse_month("201512").is_err());
/// ```
pub fn parse_month(value: &str) -> EngineResult<(i32, u32)> {
    let (year, month) = value
        .split_once('-')
        .ok_or_else(|| parse_error("month", value, "expected YYYY-MM"))?;

    if year.len() != 4 || month.len() != 2 {
        return Err(parse_error("month", value, "expected YYYY-MM"));
    }

    let year: i32 = year
        .parse()
        .map_err(|_| parse_error("month", value, "year is not a number"))?;
    let month: u32 = month
        .parse()
        .map_err(|_| parse_error("month", value, "month is not a number"))?;

    if !(1..=12).contains(&month) {
        return Err(parse_error("month", value, "month must be between 1 and 12"));
    }

    Ok((year, month))
}

/// Returns the last day-of-month for a month.
///
/// Steps back one second from the first instant of the following month, so
/// month lengths and leap years come from the calendar rather than a table.
/// Returns `None` for an out-of-range year or month.
///
/// # Example
///
/// ```
/// use childcare_billing::calculation::last_day_of_month;
///
/// assert_eq!(last_day_of_month(2016, 2), Some(29));
/// assert_eq!(last_day_of_month(2015, 2), Some(28));
/// assert_eq!(last_day_of_month(2015, 12), Some(31));
/// ```
pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };

    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.and_hms_opt(0, 0, 0)?;
    let last_moment = first_of_next - Duration::seconds(1);

    Some(last_moment.day())
}

/// Resolves the requested billing period.
///
/// When `month` is given it wins: the window runs from its first to its last
/// day. Otherwise `start` and `end` are parsed as `YYYY-MM-DD`.
///
/// # Errors
///
/// - [`EngineError::Parse`] naming `start`, `end` or `month` for malformed input
/// - [`EngineError::InvalidWindow`] when `start` is after `end`
///
/// # Example
///
/// ```
/// use childcare_billing::calculation::resolve_period;
/// use chrono::NaiveDate;
///
/// let window = resolve_period("2015-09-01", "2016-08-31", Some("2016-02")).unwrap();
/// assert_eq!(window.from, NaiveDate::from_ymd_opt(2016, 2, 1).unwrap());
/// assert_eq!(window.to, NaiveDate::from_ymd_opt(2016, 2, 29).unwrap());
/// ```
pub fn resolve_period(start: &str, end: &str, month: Option<&str>) -> EngineResult<ReportingWindow> {
    if let Some(month) = month {
        let (year, month_number) = parse_month(month)?;
        let last_day = last_day_of_month(year, month_number)
            .ok_or_else(|| parse_error("month", month, "month is out of range"))?;
        let from = NaiveDate::from_ymd_opt(year, month_number, 1)
            .ok_or_else(|| parse_error("month", month, "month is out of range"))?;
        let to = NaiveDate::from_ymd_opt(year, month_number, last_day)
            .ok_or_else(|| parse_error("month", month, "month is out of range"))?;
        return ReportingWindow::new(from, to);
    }

    let from = parse_date("start", start)?;
    let to = parse_date("end", end)?;
    ReportingWindow::new(from, to)
}

/// Builds the cumulative window from the contract start to the period end.
///
/// # Errors
///
/// Returns [`EngineError::InvalidWindow`] when the contract starts after the
/// requested period ends.
pub fn since_contract_start(
    contract_start: NaiveDate,
    period: &ReportingWindow,
) -> EngineResult<ReportingWindow> {
    ReportingWindow::new(contract_start, period.to)
}
