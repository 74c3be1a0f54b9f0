//! Store configuration: currency, coupon catalog, shipping options.

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cart::{Coupon, DiscountType};
use crate::checkout::{cheapest_option, ShippingOption};
use crate::error::CommerceError;
use crate::money::Currency;

/// Configuration shared by the cart store and the pricing engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Currency every price is expressed in.
    #[serde(default)]
    pub currency: Currency,

    /// Coupons customers can apply.
    #[serde(default = "default_coupons")]
    pub coupons: Vec<Coupon>,

    /// Shipping tiers, in display order.
    #[serde(default = "default_shipping_options")]
    pub shipping_options: Vec<ShippingOption>,

    /// Checkout settings.
    #[serde(default)]
    pub checkout: CheckoutConfig,
}

/// Checkout settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// How long the simulated gateway takes to accept an order.
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,
}

impl CheckoutConfig {
    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: default_simulated_delay_ms(),
        }
    }
}

fn default_simulated_delay_ms() -> u64 {
    2000
}

fn default_coupons() -> Vec<Coupon> {
    vec![
        Coupon::percentage("WELCOME10", 10, 1000),
        Coupon::fixed("FLAT500", 500, 2000),
        Coupon::percentage("SUPER20", 20, 5000),
    ]
}

fn default_shipping_options() -> Vec<ShippingOption> {
    vec![
        ShippingOption::new("free", "Free Shipping", 0, "7-10 business days"),
        ShippingOption::new("standard", "Standard", 99, "3-5 business days"),
        ShippingOption::new("express", "Express", 199, "1-2 business days"),
    ]
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            coupons: default_coupons(),
            shipping_options: default_shipping_options(),
            checkout: CheckoutConfig::default(),
        }
    }
}

impl StoreConfig {
    /// Load and validate a config file. `.json` files are read as JSON,
    /// everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            let config: StoreConfig = serde_json::from_str(&content).map_err(|e| {
                CommerceError::Config(format!("Failed to parse JSON config {}: {}", path.display(), e))
            })?;
            config.validate()?;
            Ok(config)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Parse and validate TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, CommerceError> {
        let config: StoreConfig = toml::from_str(content)
            .map_err(|e| CommerceError::Config(format!("Failed to parse TOML config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml_string(&self) -> Result<String, CommerceError> {
        toml::to_string_pretty(self).map_err(|e| CommerceError::Config(e.to_string()))
    }

    /// Check the catalogs are usable.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.shipping_options.is_empty() {
            return Err(CommerceError::Config(
                "At least one shipping option is required".to_string(),
            ));
        }

        let mut ids = HashSet::new();
        for option in &self.shipping_options {
            if option.id.trim().is_empty() {
                return Err(CommerceError::Config(
                    "Shipping option id must not be empty".to_string(),
                ));
            }
            if !ids.insert(option.id.as_str()) {
                return Err(CommerceError::Config(format!(
                    "Duplicate shipping option: {}",
                    option.id
                )));
            }
            if option.price < 0 {
                return Err(CommerceError::Config(format!(
                    "Shipping option {} has a negative price",
                    option.id
                )));
            }
        }

        let mut codes = HashSet::new();
        for coupon in &self.coupons {
            if coupon.code.trim().is_empty() {
                return Err(CommerceError::Config(
                    "Coupon code must not be empty".to_string(),
                ));
            }
            if !codes.insert(coupon.code.to_ascii_uppercase()) {
                return Err(CommerceError::Config(format!(
                    "Duplicate coupon code: {}",
                    coupon.code
                )));
            }
            if coupon.discount_value < 0 || coupon.minimum_order_amount < 0 {
                return Err(CommerceError::Config(format!(
                    "Coupon {} has a negative amount",
                    coupon.code
                )));
            }
            if coupon.discount_type == DiscountType::Percentage && coupon.discount_value > 100 {
                return Err(CommerceError::Config(format!(
                    "Coupon {} discounts more than 100%",
                    coupon.code
                )));
            }
        }

        Ok(())
    }

    /// Coupon by code, case-insensitively.
    pub fn find_coupon(&self, code: &str) -> Option<&Coupon> {
        self.coupons.iter().find(|c| c.matches_code(code))
    }

    /// Shipping option by id.
    pub fn find_shipping(&self, id: &str) -> Option<&ShippingOption> {
        self.shipping_options.iter().find(|o| o.id == id)
    }

    /// The cheapest shipping option.
    pub fn default_shipping(&self) -> Result<&ShippingOption, CommerceError> {
        cheapest_option(&self.shipping_options).ok_or_else(|| {
            CommerceError::Config("At least one shipping option is required".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.currency, Currency::INR);
        assert_eq!(config.coupons.len(), 3);
        assert_eq!(config.default_shipping().unwrap().id, "free");
        assert_eq!(config.checkout.simulated_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn test_find_coupon_case_insensitive() {
        let config = StoreConfig::default();
        assert_eq!(config.find_coupon("welcome10").unwrap().code, "WELCOME10");
        assert!(config.find_coupon("NOPE").is_none());
    }

    #[test]
    fn test_from_toml() {
        let config = StoreConfig::from_toml_str(
            r#"
            currency = "INR"

            [[coupons]]
            code = "DIWALI15"
            discount_type = "percentage"
            discount_value = 15
            minimum_order_amount = 3000

            [[shipping_options]]
            id = "standard"
            label = "Standard"
            price = 49
            estimated_window = "3-5 business days"

            [[shipping_options]]
            id = "pickup"
            label = "Store Pickup"
            price = 0
            estimated_window = "same day"

            [checkout]
            simulated_delay_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.coupons.len(), 1);
        assert_eq!(config.default_shipping().unwrap().id, "pickup");
        assert_eq!(config.checkout.simulated_delay_ms, 0);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = StoreConfig::from_toml_str("currency = \"INR\"").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_rejects_duplicate_codes() {
        let mut config = StoreConfig::default();
        config.coupons.push(Coupon::fixed("flat500", 100, 0));
        assert!(matches!(config.validate(), Err(CommerceError::Config(_))));
    }

    #[test]
    fn test_rejects_bad_catalogs() {
        let mut config = StoreConfig::default();
        config.shipping_options.clear();
        assert!(config.validate().is_err());

        let mut config = StoreConfig::default();
        config.coupons.push(Coupon::percentage("HALFPLUS", 101, 0));
        assert!(config.validate().is_err());

        let mut config = StoreConfig::default();
        config.shipping_options[1].price = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{"checkout": {"simulated_delay_ms": 10}}"#).unwrap();

        let config = StoreConfig::load(&path).unwrap();
        assert_eq!(config.checkout.simulated_delay_ms, 10);
        assert_eq!(config.shipping_options.len(), 3);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = StoreConfig::default();
        let toml = config.to_toml_string().unwrap();
        assert_eq!(StoreConfig::from_toml_str(&toml).unwrap(), config);
    }
}
