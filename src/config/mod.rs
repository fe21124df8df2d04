//! Configuration loading and management for the childcare billing engine.
//!
//! This module loads the contract terms, the fee schedule and the calendar
//! settings from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use childcare_billing::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Base salary: {}", config.contract().base_salary);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BillingConfig, CalendarConfig, ContractConfig, NetFormula, PatternConfig, TariffConfig,
};
