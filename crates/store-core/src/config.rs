//! Store configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::money::Currency;

/// Default sales tax rate in basis points (10%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 1000;

/// Store configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Tax rate in basis points applied to the cart subtotal.
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Currency all seed prices are expressed in. Only two-decimal
    /// currencies are accepted.
    #[serde(default)]
    pub currency: Currency,

    /// Seed file to load instead of the bundled catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_path: Option<PathBuf>,
}

fn default_tax_rate_bps() -> u32 {
    DEFAULT_TAX_RATE_BPS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            tax_rate_bps: default_tax_rate_bps(),
            currency: Currency::default(),
            seed_path: None,
        }
    }
}

impl StoreConfig {
    /// Load config from a file.
    ///
    /// Paths ending in `.json` are parsed as JSON, everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .map_err(|e| StoreError::Config(format!("{}: {}", path.display(), e)))
        } else {
            Self::from_toml(&content)
        }
    }

    /// Parse a TOML config document.
    pub fn from_toml(content: &str) -> Result<Self, StoreError> {
        Ok(toml::from_str(content)?)
    }

    /// Render this config as TOML.
    pub fn to_toml(&self) -> Result<String, StoreError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Set the seed file.
    pub fn with_seed_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.seed_path = Some(path.into());
        self
    }
}
