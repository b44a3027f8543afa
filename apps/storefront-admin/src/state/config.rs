//! # Store Configuration
//!
//! Display settings loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOREFRONT_*`)
//! 2. Config file (`storefront.toml`, path from argument or `STOREFRONT_CONFIG`)
//! 3. Defaults (this file)
//!
//! ## Example Config File
//! ```toml
//! store_name = "Hanghae Mart"
//! currency_prefix = ""
//! currency_suffix = "원"
//! thousands_separator = ","
//! ```
//!
//! Read-only after initialization, so no lock.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use storefront_core::Money;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "STOREFRONT_CONFIG";

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store name shown in the admin header
    pub store_name: String,

    /// Printed before the amount (e.g. "$")
    pub currency_prefix: String,

    /// Printed after the amount (e.g. "원")
    pub currency_suffix: String,

    /// Digit group separator; empty disables grouping
    pub thousands_separator: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            store_name: "Storefront".to_string(),
            currency_prefix: String::new(),
            currency_suffix: "원".to_string(),
            thousands_separator: ",".to_string(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file, if the path exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        let path = config_path.or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));
        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(AppError::config("store_name must not be empty"));
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("STOREFRONT_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Ok(prefix) = std::env::var("STOREFRONT_CURRENCY_PREFIX") {
            self.currency_prefix = prefix;
        }

        if let Ok(suffix) = std::env::var("STOREFRONT_CURRENCY_SUFFIX") {
            self.currency_suffix = suffix;
        }
    }

    /// Formats an amount for display.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_admin::state::StoreConfig;
    /// use storefront_core::Money;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_price(Money::from_units(9720)), "9,720원");
    /// ```
    pub fn format_price(&self, amount: Money) -> String {
        let units = amount.units();
        let digits = units.unsigned_abs().to_string();

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, digit) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push_str(&self.thousands_separator);
            }
            grouped.push(digit);
        }

        format!(
            "{}{}{}{}",
            if units < 0 { "-" } else { "" },
            self.currency_prefix,
            grouped,
            self.currency_suffix
        )
    }
}

/// Serializes tests that read or write process environment variables.
#[cfg(test)]
pub(crate) fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
