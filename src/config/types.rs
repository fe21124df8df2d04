//! Configuration types for childcare billing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Contract terms, from `contract.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContractConfig {
    /// First day of the contract; the cumulative window starts here.
    pub start_date: NaiveDate,
    /// Last day of the contract.
    pub end_date: NaiveDate,
    /// Total attendance hours agreed for the whole contract.
    pub total_hours: Decimal,
    /// Base salary paid every period.
    pub base_salary: Decimal,
    /// Paid-leave days agreed for the whole contract. Leave tracking against an
    /// allotment is skipped when absent.
    #[serde(default)]
    pub leave_days: Option<Decimal>,
}

/// How the net amount due is assembled.
///
/// `LegacyMealAddend` reproduces older invoices, which added the raw meal count
/// on top of the meal charge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetFormula {
    /// `base + snacks + meals + maintenance`.
    #[default]
    Standard,
    /// `base + snacks + meal_count + meals + maintenance`.
    LegacyMealAddend,
}

/// Fees, from `tariffs.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TariffConfig {
    /// Hourly rate, used for the informational hourly equivalent.
    pub hourly_rate: Decimal,
    /// Maintenance fee per attendance day.
    pub maintenance_fee: Decimal,
    /// Fee per snack.
    pub snack_fee: Decimal,
    /// Fee per meal.
    pub meal_fee: Decimal,
    /// Net amount formula.
    #[serde(default)]
    pub net_formula: NetFormula,
}

/// Label patterns used to classify events.
///
/// Patterns are regular expressions matched case-sensitively anywhere in the label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatternConfig {
    /// The child whose attendance also counts meals and snacks.
    pub child_a: String,
    /// The second child; attendance only.
    pub child_b: String,
    /// Paid-leave marker. Leave is not counted when absent.
    #[serde(default)]
    pub paid_leave: Option<String>,
}

/// Calendar settings, from `calendar.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CalendarConfig {
    /// Identifier of the calendar holding attendance events.
    pub calendar_id: String,
    /// Classification patterns.
    pub patterns: PatternConfig,
}

/// The complete billing configuration loaded from YAML files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingConfig {
    contract: ContractConfig,
    tariffs: TariffConfig,
    calendar: CalendarConfig,
}

impl BillingConfig {
    /// Creates a new BillingConfig from its component parts.
    pub fn new(contract: ContractConfig, tariffs: TariffConfig, calendar: CalendarConfig) -> Self {
        Self {
            contract,
            tariffs,
            calendar,
        }
    }

    /// Returns the contract terms.
    pub fn contract(&self) -> &ContractConfig {
        &self.contract
    }

    /// Returns the fees.
    pub fn tariffs(&self) -> &TariffConfig {
        &self.tariffs
    }

    /// Returns the calendar settings.
    pub fn calendar(&self) -> &CalendarConfig {
        &self.calendar
    }
}
