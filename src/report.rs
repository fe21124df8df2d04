//! Plain-text invoice report.
//!
//! Renders an [`InvoiceResult`] as one labelled line per metric.

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{AggregateTotals, ChargeCategory, InvoiceResult};

/// Displays an invoice as a plain-text summary.
///
/// # Example
///
/// ```no_run
/// use childcare_billing::report::InvoiceReport;
/// # fn invoice() -> childcare_billing::models::InvoiceResult { unimplemented!() }
///
/// let invoice = invoice();
/// println!("{}", InvoiceReport(&invoice));
/// ```
pub struct InvoiceReport<'a>(pub &'a InvoiceResult);

fn hours(value: Decimal) -> Decimal {
    value.round_dp(2).normalize()
}

fn money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn notices(f: &mut fmt::Formatter<'_>, name: &str, totals: &AggregateTotals) -> fmt::Result {
    if totals.is_empty() {
        writeln!(f, "\tNo events found {} ({})", name, totals.window)?;
    }
    if totals.skipped_count > 0 {
        writeln!(
            f,
            "\t{} event(s) skipped {} because of invalid times",
            totals.skipped_count, name
        )?;
    }
    Ok(())
}

impl fmt::Display for InvoiceReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let invoice = self.0;
        let current = &invoice.current;
        let since_start = &invoice.since_start;

        writeln!(
            f,
            "Invoice for the period {} to {}",
            current.window.from, current.window.to
        )?;
        notices(f, "in the period", current)?;
        notices(f, "since the contract start", since_start)?;

        writeln!(
            f,
            "\tAttendance days: {} ({} since {})",
            current.day_count, since_start.day_count, invoice.contract_start
        )?;
        writeln!(
            f,
            "\tAttendance hours: {} ({} since {} / {})",
            hours(current.total_hours()),
            hours(since_start.total_hours()),
            invoice.contract_start,
            hours(invoice.contracted_hours)
        )?;
        writeln!(f, "\tBase salary: {:.2}€", money(invoice.base_salary))?;
        writeln!(f, "\tHourly equivalent: {:.2}€", money(invoice.hourly_equivalent))?;
        match invoice.leave_allotment {
            Some(allotment) => writeln!(
                f,
                "\tPaid leave days: {} ({}/{})",
                current.leave_count,
                since_start.leave_count,
                allotment.normalize()
            )?,
            None => writeln!(
                f,
                "\tPaid leave days: {} ({})",
                current.leave_count, since_start.leave_count
            )?,
        }

        for category in [
            ChargeCategory::Snack,
            ChargeCategory::Meal,
            ChargeCategory::Maintenance,
        ] {
            if let Some(line) = invoice.charge(category) {
                writeln!(f, "{}:", category)?;
                writeln!(f, "\tCount: {}", line.units)?;
                writeln!(f, "\tAmount: {:.2}€", money(line.amount))?;
            }
        }

        writeln!(f)?;
        write!(f, "Net amount due: {:.2}€", money(invoice.net_amount))
    }
}
