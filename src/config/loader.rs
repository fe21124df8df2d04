//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading billing
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{BillingConfig, CalendarConfig, ContractConfig, TariffConfig};

/// Loads and provides access to billing configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// checks them before any event is fetched.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── contract.yaml   # Contract dates, contracted hours, base salary, leave days
/// ├── tariffs.yaml    # Hourly rate, maintenance, snack and meal fees
/// └── calendar.yaml   # Calendar id and label patterns
/// ```
///
/// # Example
///
/// ```no_run
/// use childcare_billing::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Contract starts on {}", loader.contract().start_date);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: BillingConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML or misses a required field
    /// - The contract ends before it starts
    /// - A fee, hour count or leave allotment is negative
    /// - The calendar id is blank
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let contract_path = path.join("contract.yaml");
        let contract = Self::load_yaml::<ContractConfig>(&contract_path)?;
        Self::validate_contract(&contract_path, &contract)?;

        let tariffs_path = path.join("tariffs.yaml");
        let tariffs = Self::load_yaml::<TariffConfig>(&tariffs_path)?;
        Self::validate_tariffs(&tariffs_path, &tariffs)?;

        let calendar_path = path.join("calendar.yaml");
        let calendar = Self::load_yaml::<CalendarConfig>(&calendar_path)?;
        if calendar.calendar_id.trim().is_empty() {
            return Err(EngineError::ConfigParse {
                path: calendar_path.display().to_string(),
                message: "calendar_id must not be empty".to_string(),
            });
        }

        debug!(path = %path.display(), "Loaded billing configuration");

        Ok(Self {
            config: BillingConfig::new(contract, tariffs, calendar),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParse {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_contract(path: &Path, contract: &ContractConfig) -> EngineResult<()> {
        if contract.start_date > contract.end_date {
            return Err(EngineError::ConfigParse {
                path: path.display().to_string(),
                message: format!(
                    "contract ends on {} before it starts on {}",
                    contract.end_date, contract.start_date
                ),
            });
        }
        Self::non_negative(path, "total_hours", contract.total_hours)?;
        Self::non_negative(path, "base_salary", contract.base_salary)?;
        if let Some(leave_days) = contract.leave_days {
            Self::non_negative(path, "leave_days", leave_days)?;
        }
        Ok(())
    }

    fn validate_tariffs(path: &Path, tariffs: &TariffConfig) -> EngineResult<()> {
        Self::non_negative(path, "hourly_rate", tariffs.hourly_rate)?;
        Self::non_negative(path, "maintenance_fee", tariffs.maintenance_fee)?;
        Self::non_negative(path, "snack_fee", tariffs.snack_fee)?;
        Self::non_negative(path, "meal_fee", tariffs.meal_fee)
    }

    fn non_negative(path: &Path, field: &str, value: Decimal) -> EngineResult<()> {
        if value < Decimal::ZERO {
            return Err(EngineError::ConfigParse {
                path: path.display().to_string(),
                message: format!("{} must not be negative (got {})", field, value),
            });
        }
        Ok(())
    }

    /// Returns the underlying billing configuration.
    pub fn config(&self) -> &BillingConfig {
        &self.config
    }

    /// Returns the contract terms.
    pub fn contract(&self) -> &ContractConfig {
        self.config.contract()
    }

    /// Returns the fees.
    pub fn tariffs(&self) -> &TariffConfig {
        self.config.tariffs()
    }

    /// Returns the calendar settings.
    pub fn calendar(&self) -> &CalendarConfig {
        self.config.calendar()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetFormula;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(
            loader.contract().start_date,
            NaiveDate::from_ymd_opt(2015, 9, 1).unwrap()
        );
        assert_eq!(
            loader.contract().end_date,
            NaiveDate::from_ymd_opt(2016, 8, 31).unwrap()
        );
    }

    #[test]
    fn test_contract_values_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.contract().total_hours, dec("1200"));
        assert_eq!(loader.contract().base_salary, dec("500.00"));
        assert_eq!(loader.contract().leave_days, Some(dec("25")));
    }

    #[test]
    fn test_tariffs_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.tariffs().hourly_rate, dec("3.50"));
        assert_eq!(loader.tariffs().maintenance_fee, dec("3.20"));
        assert_eq!(loader.tariffs().snack_fee, dec("1.00"));
        assert_eq!(loader.tariffs().meal_fee, dec("3.50"));
        assert_eq!(loader.tariffs().net_formula, NetFormula::Standard);
    }

    #[test]
    fn test_calendar_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(
            loader.calendar().calendar_id,
            "nounou@group.calendar.example.com"
        );
        assert_eq!(loader.calendar().patterns.child_a, "Eléonore");
        assert_eq!(loader.calendar().patterns.child_b, "Eugénie");
        assert_eq!(loader.calendar().patterns.paid_leave.as_deref(), Some("CA"));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("contract.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let result = ConfigLoader::load("./tests/fixtures/config_malformed");

        match result {
            Err(EngineError::ConfigParse { path, .. }) => {
                assert!(path.contains("tariffs.yaml"));
            }
            _ => panic!("Expected ConfigParse error"),
        }
    }

    #[test]
    fn test_negative_fee_is_rejected() {
        let result = ConfigLoader::load("./tests/fixtures/config_negative_fee");

        match result {
            Err(EngineError::ConfigParse { message, .. }) => {
                assert!(message.contains("snack_fee"), "got: {}", message);
            }
            _ => panic!("Expected ConfigParse error"),
        }
    }

    #[test]
    fn test_inverted_contract_is_rejected() {
        let result = ConfigLoader::load("./tests/fixtures/config_inverted_contract");

        match result {
            Err(EngineError::ConfigParse { path, message }) => {
                assert!(path.contains("contract.yaml"));
                assert!(message.contains("before it starts"));
            }
            _ => panic!("Expected ConfigParse error"),
        }
    }
}
