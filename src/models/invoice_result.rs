//! Invoice result models.
//!
//! This module contains the [`InvoiceResult`] type and the charge lines that
//! make up a childcare invoice for one period.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AggregateTotals;
use crate::config::NetFormula;

/// The kind of fee a charge line bills for.
///
/// # Example
///
/// ```
/// use childcare_billing::models::ChargeCategory;
///
/// let category = ChargeCategory::Maintenance;
/// assert_eq!(format!("{:?}", category), "Maintenance");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeCategory {
    /// Afternoon snacks.
    Snack,
    /// Meals.
    Meal,
    /// Per-day maintenance fee.
    Maintenance,
}

impl std::fmt::Display for ChargeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChargeCategory::Snack => write!(f, "Snacks"),
            ChargeCategory::Meal => write!(f, "Meals"),
            ChargeCategory::Maintenance => write!(f, "Maintenance"),
        }
    }
}

/// One billed line: units multiplied by a unit fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargeLine {
    /// What is being billed.
    pub category: ChargeCategory,
    /// Number of units in the current period.
    pub units: Decimal,
    /// Fee per unit.
    pub rate: Decimal,
    /// `units * rate`.
    pub amount: Decimal,
}

impl ChargeLine {
    /// Builds a line from a unit count and a fee.
    ///
    /// ```
    /// use childcare_billing::models::{ChargeCategory, ChargeLine};
    /// use rust_decimal::Decimal;
    ///
    /// let line = ChargeLine::new(ChargeCategory::Snack, 3, Decimal::new(15, 1));
    /// assert_eq!(line.amount, Decimal::new(45, 1)); // 4.5
    /// ```
    pub fn new(category: ChargeCategory, units: u32, rate: Decimal) -> Self {
        let units = Decimal::from(units);
        Self {
            category,
            units,
            rate,
            amount: units * rate,
        }
    }
}

/// The computed invoice for one period.
///
/// Carries both aggregates (current period and since contract start) unmodified
/// for display, plus the charges and the net amount due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceResult {
    /// Unique identifier for this invoice computation.
    pub invoice_id: Uuid,
    /// When the invoice was computed.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced the invoice.
    pub engine_version: String,
    /// The contract start date the cumulative window begins on.
    pub contract_start: NaiveDate,
    /// Totals for the requested period.
    pub current: AggregateTotals,
    /// Totals since the contract start.
    pub since_start: AggregateTotals,
    /// Total hours agreed in the contract.
    pub contracted_hours: Decimal,
    /// Paid-leave days agreed in the contract, when tracked.
    pub leave_allotment: Option<Decimal>,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Current-period hours at the hourly rate. Informational, not part of the net.
    pub hourly_equivalent: Decimal,
    /// Snack, meal and maintenance charges, in that order.
    pub charges: Vec<ChargeLine>,
    /// The formula used for `net_amount`.
    pub net_formula: NetFormula,
    /// Amount due for the period.
    pub net_amount: Decimal,
}

impl InvoiceResult {
    /// Returns the charge line for a category.
    pub fn charge(&self, category: ChargeCategory) -> Option<&ChargeLine> {
        self.charges.iter().find(|line| line.category == category)
    }

    /// Sum of all charge line amounts.
    pub fn charges_total(&self) -> Decimal {
        self.charges.iter().map(|line| line.amount).sum()
    }
}
