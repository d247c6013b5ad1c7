//! Configuration for directory service module

use serde::{Deserialize, Serialize};

use crate::contract::DEFAULT_NEARBY_RADIUS_M;

/// Directory service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Shared secret expected in the `X-API-Key` header
    #[serde(default)]
    pub api_key: String,

    /// Radius in meters used by the nearby query when none is given
    #[serde(default = "default_radius_m")]
    pub default_radius_m: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            default_radius_m: default_radius_m(),
        }
    }
}

impl Config {
    /// Reject configurations the module cannot serve with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("directory.api_key must be set");
        }
        if !self.default_radius_m.is_finite() || self.default_radius_m < 0.0 {
            anyhow::bail!(
                "directory.default_radius_m must be a non-negative number, got {}",
                self.default_radius_m
            );
        }
        Ok(())
    }
}

fn default_radius_m() -> f64 {
    DEFAULT_NEARBY_RADIUS_M
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_radius_matches_contract() {
        assert_eq!(Config::default().default_radius_m, 1000.0);
    }

    #[test]
    fn test_empty_api_key_is_rejected() {
        assert!(Config::default().validate().is_err());

        let cfg = Config {
            api_key: "   ".to_string(),
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_negative_radius_is_rejected() {
        let cfg = Config {
            api_key: "secret".to_string(),
            default_radius_m: -1.0,
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let cfg: Config = serde_json::from_value(serde_json::json!({ "api_key": "k" })).unwrap();
        assert_eq!(cfg.api_key, "k");
        assert_eq!(cfg.default_radius_m, 1000.0);
        assert!(cfg.validate().is_ok());
    }
}
