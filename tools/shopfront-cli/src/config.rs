//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shopfront_commerce::config::StoreConfig;
use shopfront_commerce::session::{Role, Session};

/// CLI configuration file (`shop.toml`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where the cart is persisted (default: `.shopfront` next to the config).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Product catalog JSON file (default: the bundled catalog).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Signed-in customer. Omit to shop as a guest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerConfig>,

    /// Currency, coupons, shipping options and checkout settings.
    #[serde(default)]
    pub store: StoreConfig,
}

/// Customer identity used for checkout prefill and order attribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerConfig {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: CliConfig = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };

        config
            .store
            .validate()
            .with_context(|| format!("Invalid store configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// The shopper this config describes.
    pub fn session(&self) -> Session {
        match &self.customer {
            Some(customer) => {
                Session::customer(customer.id.as_str(), &customer.name, &customer.email)
                    .with_role(customer.role)
            }
            None => Session::guest(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_toml_with_store_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.toml");
        std::fs::write(
            &path,
            r#"
            data_dir = "cart-data"

            [customer]
            id = "u-1"
            name = "Asha Rao"
            email = "asha@example.com"

            [store.checkout]
            simulated_delay_ms = 0
            "#,
        )
        .unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("cart-data")));
        assert_eq!(config.store.checkout.simulated_delay_ms, 0);
        assert_eq!(config.store.coupons.len(), 3);
        assert_eq!(config.session().name(), Some("Asha Rao"));
    }

    #[test]
    fn test_invalid_store_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.json");
        std::fs::write(&path, r#"{"store": {"shipping_options": []}}"#).unwrap();

        assert!(CliConfig::load(&path).is_err());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.toml");
        CliConfig::default().save(&path).unwrap();

        let loaded = CliConfig::load(&path).unwrap();
        assert_eq!(loaded.store, StoreConfig::default());
        assert!(!loaded.session().is_signed_in());
    }
}
