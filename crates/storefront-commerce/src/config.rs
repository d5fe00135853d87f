//! Storefront configuration.
//!
//! Loaded from TOML or JSON (chosen by file extension). Every section has
//! defaults matching the stock storefront, so an empty file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cart::QuantityLimits;
use crate::catalog::Menu;
use crate::checkout::CheckoutPolicy;
use crate::error::CommerceError;
use crate::money::Currency;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Currency every price is expressed in.
    pub currency: Currency,

    /// Delivery and service fees.
    pub checkout: CheckoutPolicy,

    /// Per-add quantity bounds.
    pub ordering: QuantityLimits,

    /// Cart mirroring.
    pub mirror: MirrorConfig,

    /// Menu override. The built-in sample menu is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub menu: Option<Menu>,
}

/// Where and whether to mirror cart contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    pub enabled: bool,
    /// Key the item list is stored under.
    pub key: String,
    /// Directory for the file-backed store; in-memory when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            key: "cart".to_string(),
            dir: None,
        }
    }
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = if is_json(path) {
            serde_json::from_str(&content).map_err(|e| {
                CommerceError::ConfigError(format!("failed to parse {}: {}", path.display(), e))
            })?
        } else {
            Self::from_toml_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, CommerceError> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CommerceError> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };
        std::fs::write(path, content).map_err(|e| {
            CommerceError::ConfigError(format!("failed to write {}: {}", path.display(), e))
        })
    }

    /// The configured menu, or the built-in sample.
    pub fn menu(&self) -> Menu {
        self.menu.clone().unwrap_or_else(Menu::sample)
    }

    /// Check values that serde cannot.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.ordering.min < 1 || self.ordering.max < self.ordering.min {
            return Err(CommerceError::ConfigError(format!(
                "ordering bounds must satisfy 1 <= min <= max, got {}..={}",
                self.ordering.min, self.ordering.max
            )));
        }
        if self.checkout.delivery_fee_cents < 0 || self.checkout.free_delivery_above_cents < 0 {
            return Err(CommerceError::ConfigError(
                "checkout amounts must not be negative".to_string(),
            ));
        }
        if self.mirror.enabled && self.mirror.key.is_empty() {
            return Err(CommerceError::ConfigError(
                "mirror key must not be empty".to_string(),
            ));
        }
        // The built-in sample is priced in SAR, so it is checked too.
        self.menu().validate(self.currency)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}
