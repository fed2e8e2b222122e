use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// Current deployments store a percentage multiplied by 10^12.
const DEFAULT_CURRENT_PERCENT_DECIMALS: u32 = 12;
// `amount * raw / 10000` on legacy deployments: the percentage times 100.
const DEFAULT_LEGACY_PERCENT_DECIMALS: u32 = 2;
const DEFAULT_TRADING_DECIMALS: u32 = 18;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Versions from the explicit version query that select the current layout.
    pub supported_api_versions: Vec<u32>,
    /// Implied decimal places of a raw tranche percentage, per layout.
    pub current_percent_decimals: u32,
    pub legacy_percent_decimals: u32,
    /// Scale used when no ERC20 trading currency is configured.
    pub default_trading_decimals: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            supported_api_versions: vec![1, 2, 3],
            current_percent_decimals: DEFAULT_CURRENT_PERCENT_DECIMALS,
            legacy_percent_decimals: DEFAULT_LEGACY_PERCENT_DECIMALS,
            default_trading_decimals: DEFAULT_TRADING_DECIMALS,
        }
    }
}

impl EngineConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(text).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.supported_api_versions.is_empty() {
            return Err(Error::InvalidConfig(
                "supported_api_versions must not be empty".into(),
            ));
        }
        if self.default_trading_decimals == 0 {
            return Err(Error::InvalidConfig(
                "default_trading_decimals must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn supports(&self, api_version: u32) -> bool {
        self.supported_api_versions.contains(&api_version)
    }
}
