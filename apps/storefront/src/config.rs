//! # Storefront Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`MALHA_*`)
//! 2. Defaults (this file)
//!
//! Read-only after startup, so services hold a plain clone.

use serde::{Deserialize, Serialize};

use malha_core::{CheckoutPolicy, Money, LIST_PRICE_FACTOR_BPS, MIN_ITEMS_FOR_CHECKOUT};

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontConfig {
    /// Shown in the receipt header.
    pub store_name: String,

    /// Selling price as a share of list price, in basis points.
    /// e.g., 3000 = jerseys sell at 30% of list
    pub list_price_factor_bps: u32,

    /// Units required before checkout opens.
    pub min_items_for_checkout: i64,

    /// Currency symbol (for display)
    pub currency_symbol: String,
}

impl Default for StorefrontConfig {
    /// ## Default Values
    /// - Store: "Malha Pro"
    /// - Price factor: 30% of list
    /// - Checkout minimum: 5 units
    /// - Currency: R$
    fn default() -> Self {
        StorefrontConfig {
            store_name: "Malha Pro".to_string(),
            list_price_factor_bps: LIST_PRICE_FACTOR_BPS,
            min_items_for_checkout: MIN_ITEMS_FOR_CHECKOUT,
            currency_symbol: "R$".to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from the process environment.
    ///
    /// ## Environment Variables
    /// - `MALHA_STORE_NAME`: Override store name
    /// - `MALHA_LIST_PRICE_FACTOR`: Selling price as percent of list (e.g., "30")
    /// - `MALHA_MIN_ITEMS_FOR_CHECKOUT`: Checkout minimum (e.g., "5")
    /// - `MALHA_CURRENCY_SYMBOL`: Override currency symbol
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = StorefrontConfig::default();

        if let Some(name) = var("MALHA_STORE_NAME") {
            config.store_name = name;
        }

        if let Some(raw) = var("MALHA_LIST_PRICE_FACTOR") {
            let percent: f64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid("MALHA_LIST_PRICE_FACTOR", &raw))?;
            if !(0.0..=100.0).contains(&percent) {
                return Err(ConfigError::invalid("MALHA_LIST_PRICE_FACTOR", &raw));
            }
            config.list_price_factor_bps = (percent * 100.0).round() as u32;
        }

        if let Some(raw) = var("MALHA_MIN_ITEMS_FOR_CHECKOUT") {
            config.min_items_for_checkout = raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|n| *n >= 1)
                .ok_or_else(|| ConfigError::invalid("MALHA_MIN_ITEMS_FOR_CHECKOUT", &raw))?;
        }

        if let Some(symbol) = var("MALHA_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        Ok(config)
    }

    /// The checkout gate these settings describe.
    pub fn checkout_policy(&self) -> CheckoutPolicy {
        CheckoutPolicy::new(self.min_items_for_checkout)
    }

    /// Formats an amount the Brazilian way: symbol, space, comma decimal.
    ///
    /// ## Example
    /// ```rust
    /// use malha_core::Money;
    /// use malha_storefront::StorefrontConfig;
    ///
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(123456)), "R$ 1234,56");
    /// assert_eq!(config.format_currency(Money::from_cents(-5)), "-R$ 0,05");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        format!(
            "{}{} {},{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            (cents / 100).abs(),
            (cents % 100).abs()
        )
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

impl ConfigError {
    fn invalid(key: &str, value: &str) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StorefrontConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.list_price_factor_bps, 3000);
        assert_eq!(config.checkout_policy().min_items, 5);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("MALHA_STORE_NAME", "Camisas do Zé"),
            ("MALHA_LIST_PRICE_FACTOR", "45.5"),
            ("MALHA_MIN_ITEMS_FOR_CHECKOUT", "3"),
        ])
        .unwrap();

        assert_eq!(config.store_name, "Camisas do Zé");
        assert_eq!(config.list_price_factor_bps, 4550);
        assert_eq!(config.min_items_for_checkout, 3);
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("MALHA_LIST_PRICE_FACTOR", "trinta")]).is_err());
        assert!(load(&[("MALHA_LIST_PRICE_FACTOR", "130")]).is_err());
        assert!(load(&[("MALHA_MIN_ITEMS_FOR_CHECKOUT", "0")]).is_err());

        let err = load(&[("MALHA_MIN_ITEMS_FOR_CHECKOUT", "x")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for MALHA_MIN_ITEMS_FOR_CHECKOUT: \"x\""
        );
    }

    #[test]
    fn test_format_currency() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_currency(Money::from_cents(123456)), "R$ 1234,56");
        assert_eq!(config.format_currency(Money::from_cents(5997)), "R$ 59,97");
        assert_eq!(config.format_currency(Money::from_cents(5)), "R$ 0,05");
        assert_eq!(config.format_currency(Money::zero()), "R$ 0,00");
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-R$ 12,34");
    }
}
