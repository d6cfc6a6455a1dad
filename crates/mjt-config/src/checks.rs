//! Asset check configuration.

use mjt_core::Platform;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Smallest enclosed volume a watertight mesh may have.
const fn default_min_volume() -> f64 {
    1e-6
}

fn default_output() -> String {
    "checks_results.json".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CheckConfig {
    /// Path syntax rules to validate against. Defaults to the host platform.
    #[serde(default)]
    pub platform: Platform,

    /// Watertight meshes below this volume fail the volume check.
    #[serde(default = "default_min_volume")]
    pub min_volume: f64,

    /// Where `mjt check` writes its JSON report.
    #[serde(default = "default_output")]
    pub output: String,
}

impl CheckConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_volume.is_finite() || self.min_volume < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "checks.min_volume".to_string(),
                reason: format!("must be a finite, non-negative number, got {}", self.min_volume),
            });
        }
        if self.output.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "checks.output".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            platform: Platform::current(),
            min_volume: default_min_volume(),
            output: default_output(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = CheckConfig::default();
        assert_eq!(config.platform, Platform::current());
        assert!((config.min_volume - 1e-6).abs() < f64::EPSILON);
        assert_eq!(config.output, "checks_results.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn negative_volume_is_rejected() {
        let config = CheckConfig {
            min_volume: -1.0,
            ..CheckConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("checks.min_volume"));
    }
}
