use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunables for the negotiation core. Everything has a sensible
/// default; a TOML file only needs the keys it wants to override.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// Fraction of list price below which no counter price may fall
    /// when the caller does not supply a per-session floor.
    pub default_floor_ratio: Decimal,
    /// Conversation history entries retained per customer.
    pub history_cap: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self { default_floor_ratio: Decimal::new(75, 2), history_cap: 10 }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl CoreConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.default_floor_ratio <= Decimal::ZERO || self.default_floor_ratio > Decimal::ONE {
            return Err(ConfigError::Validation(format!(
                "default_floor_ratio must be in (0, 1], got {}",
                self.default_floor_ratio
            )));
        }
        if self.history_cap < 2 {
            return Err(ConfigError::Validation(format!(
                "history_cap must hold at least one exchange, got {}",
                self.history_cap
            )));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{ConfigError, CoreConfig};

    #[test]
    fn defaults_are_valid() {
        let config = CoreConfig::from_toml_str("").expect("empty override set");
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.default_floor_ratio, Decimal::new(75, 2));
        assert_eq!(config.history_cap, 10);
    }

    #[test]
    fn overrides_parse_from_toml() {
        let config = CoreConfig::from_toml_str(
            "default_floor_ratio = \"0.80\"\nhistory_cap = 20\n",
        )
        .expect("valid overrides");
        assert_eq!(config.default_floor_ratio, Decimal::new(80, 2));
        assert_eq!(config.history_cap, 20);
    }

    #[test]
    fn floor_ratio_outside_unit_interval_is_rejected() {
        let error = CoreConfig::from_toml_str("default_floor_ratio = \"1.5\"")
            .expect_err("ratio above 1");
        assert!(matches!(error, ConfigError::Validation(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(CoreConfig::from_toml_str("floor = \"0.75\"").is_err());
    }
}
