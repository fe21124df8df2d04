//! Invoice calculation.
//!
//! Combines the current-period and since-contract-start totals with the fee
//! schedule to produce an [`InvoiceResult`].

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use crate::config::{BillingConfig, NetFormula};
use crate::models::{AggregateTotals, ChargeCategory, ChargeLine, InvoiceResult};

/// Version string recorded on every invoice.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Computes the invoice for a period.
///
/// Charges are billed on the current period only:
/// - snacks: `snack_count * snack_fee`
/// - meals: `meal_count * meal_fee`
/// - maintenance: `day_count * maintenance_fee`
///
/// The net amount is `base_salary` plus the three charges. With
/// [`NetFormula::LegacyMealAddend`] the raw meal count is added as well.
///
/// # Example
///
/// ```
/// use childcare_billing::calculation::compute_invoice;
/// use childcare_billing::config::{
///     BillingConfig, CalendarConfig, ContractConfig, NetFormula, PatternConfig, TariffConfig,
/// };
/// use childcare_billing::models::{AggregateTotals, ReportingWindow};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let config = BillingConfig::new(
///     ContractConfig {
///         start_date: NaiveDate::from_ymd_opt(2015, 9, 1).unwrap(),
///         end_date: NaiveDate::from_ymd_opt(2016, 8, 31).unwrap(),
///         total_hours: Decimal::new(1200, 0),
///         base_salary: Decimal::new(500, 0),
///         leave_days: None,
///     },
///     TariffConfig {
///         hourly_rate: Decimal::new(35, 1),
///         maintenance_fee: Decimal::new(5, 0),
///         snack_fee: Decimal::new(15, 1),
///         meal_fee: Decimal::new(2, 0),
///         net_formula: NetFormula::Standard,
///     },
///     CalendarConfig {
///         calendar_id: "nounou".to_string(),
///         patterns: PatternConfig {
///             child_a: "Eléonore".to_string(),
///             child_b: "Eugénie".to_string(),
///             paid_leave: None,
///         },
///     },
/// );
///
/// let window = ReportingWindow::new(
///     NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2016, 1, 31).unwrap(),
/// )
/// .unwrap();
/// let mut current = AggregateTotals::empty(window);
/// current.day_count = 10;
///
/// let invoice = compute_invoice(&current, &current, &config);
/// assert_eq!(invoice.net_amount, Decimal::new(550, 0));
/// ```
pub fn compute_invoice(
    current: &AggregateTotals,
    since_start: &AggregateTotals,
    config: &BillingConfig,
) -> InvoiceResult {
    let contract = config.contract();
    let tariffs = config.tariffs();

    let charges = vec![
        ChargeLine::new(ChargeCategory::Snack, current.snack_count, tariffs.snack_fee),
        ChargeLine::new(ChargeCategory::Meal, current.meal_count, tariffs.meal_fee),
        ChargeLine::new(
            ChargeCategory::Maintenance,
            current.day_count,
            tariffs.maintenance_fee,
        ),
    ];

    let charges_total: Decimal = charges.iter().map(|line| line.amount).sum();
    let mut net_amount = contract.base_salary + charges_total;
    if tariffs.net_formula == NetFormula::LegacyMealAddend {
        net_amount += Decimal::from(current.meal_count);
    }

    let hourly_equivalent = current.total_hours() * tariffs.hourly_rate;

    info!(
        period = %current.window,
        days = current.day_count,
        charges = %charges_total,
        net = %net_amount,
        formula = ?tariffs.net_formula,
        "Computed invoice"
    );

    InvoiceResult {
        invoice_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: ENGINE_VERSION.to_string(),
        contract_start: contract.start_date,
        current: current.clone(),
        since_start: since_start.clone(),
        contracted_hours: contract.total_hours,
        leave_allotment: contract.leave_days,
        base_salary: contract.base_salary,
        hourly_equivalent,
        charges,
        net_formula: tariffs.net_formula,
        net_amount,
    }
}
