//! # Configuration State
//!
//! Application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOREFRONT_*`)
//! 2. Defaults (this file)
//!
//! Read-only after startup, so no mutex.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use storefront_core::money::group_thousands;
use storefront_core::{
    Money, PricingPolicy, TaxRate, DEFAULT_SHIPPING_FEE, DEFAULT_TAX_RATE_BPS,
    FREE_SHIPPING_THRESHOLD,
};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    pub store_name: String,

    /// ISO 4217 code.
    pub currency_code: String,

    pub currency_symbol: String,

    /// Minor-unit digits. IDR has none.
    pub currency_decimals: u8,

    /// e.g. 1100 = 11%
    pub tax_rate_bps: u32,

    /// Flat fee charged below the free-shipping threshold.
    pub shipping_fee: i64,

    /// `None` disables free shipping.
    pub free_shipping_threshold: Option<i64>,

    /// Artificial delay before an order is written.
    pub order_latency_ms: u64,

    /// Overrides the platform data directory.
    pub database_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// Rupiah pricing, 11% VAT, free shipping from Rp500.000.
    fn default() -> Self {
        ConfigState {
            store_name: "Storefront".to_string(),
            currency_code: "IDR".to_string(),
            currency_symbol: "Rp".to_string(),
            currency_decimals: 0,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            shipping_fee: DEFAULT_SHIPPING_FEE,
            free_shipping_threshold: Some(FREE_SHIPPING_THRESHOLD),
            order_latency_ms: 800,
            database_path: None,
        }
    }
}

impl ConfigState {
    /// Defaults overridden by the process environment.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_STORE_NAME`
    /// - `STOREFRONT_TAX_RATE`: percent, e.g. "11" or "8.25"
    /// - `STOREFRONT_SHIPPING_FEE`
    /// - `STOREFRONT_FREE_SHIPPING_THRESHOLD`: "off" disables
    /// - `STOREFRONT_ORDER_LATENCY_MS`
    /// - `STOREFRONT_DB_PATH`
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an injectable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(store_name) = var("STOREFRONT_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(rate) = parse_var::<f64>(&var, "STOREFRONT_TAX_RATE") {
            config.tax_rate_bps = TaxRate::from_percentage(rate).bps();
        }

        if let Some(fee) = parse_var::<i64>(&var, "STOREFRONT_SHIPPING_FEE") {
            config.shipping_fee = fee.max(0);
        }

        if let Some(raw) = var("STOREFRONT_FREE_SHIPPING_THRESHOLD") {
            if raw.trim().eq_ignore_ascii_case("off") {
                config.free_shipping_threshold = None;
            } else if let Some(threshold) = parse_var::<i64>(&var, "STOREFRONT_FREE_SHIPPING_THRESHOLD") {
                config.free_shipping_threshold = Some(threshold);
            }
        }

        if let Some(ms) = parse_var::<u64>(&var, "STOREFRONT_ORDER_LATENCY_MS") {
            config.order_latency_ms = ms;
        }

        if let Some(path) = var("STOREFRONT_DB_PATH") {
            config.database_path = Some(PathBuf::from(path));
        }

        config
    }

    pub fn pricing_policy(&self) -> PricingPolicy {
        PricingPolicy {
            tax_rate: TaxRate::from_bps(self.tax_rate_bps),
            shipping_fee: Money::from_minor(self.shipping_fee),
            free_shipping_threshold: self.free_shipping_threshold.map(Money::from_minor),
        }
    }

    pub fn order_latency(&self) -> Duration {
        Duration::from_millis(self.order_latency_ms)
    }

    /// Formats a minor-unit amount, grouping thousands with `.` and using
    /// `,` before the minor digits.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(1_110_000), "Rp1.110.000");
    /// ```
    pub fn format_currency(&self, amount: i64) -> String {
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = (amount / divisor).unsigned_abs();
        let frac = (amount % divisor).abs();

        let grouped = group_thousands(whole);

        format!(
            "{}{}{}",
            if amount < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{},{:0width$}",
                    grouped,
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                grouped
            }
        )
    }
}

fn parse_var<T: std::str::FromStr>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = var(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "Ignoring unparseable setting");
            None
        }
    }
}
