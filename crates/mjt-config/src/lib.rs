//! # mjt-config
//!
//! Layered configuration loading for mjt using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`MJT_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.mjt/config.toml`
//! 4. User-level `~/.config/mjt/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `MJT_CHECKS__MIN_VOLUME` -> `checks.min_volume`,
//! `MJT_CHECKS__PLATFORM` -> `checks.platform`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use mjt_config::MjtConfig;
//!
//! let config = MjtConfig::load().expect("config");
//! println!("reports go to {}", config.checks.output);
//! ```

mod checks;
mod error;
mod sanitize;

pub use checks::CheckConfig;
pub use error::ConfigError;
pub use sanitize::SanitizeConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MjtConfig {
    #[serde(default)]
    pub checks: CheckConfig,
    #[serde(default)]
    pub sanitize: SanitizeConfig,
}

impl MjtConfig {
    /// Load configuration from defaults, TOML files and environment variables.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Figment`] when a source cannot be read or extracted,
    /// [`ConfigError::InvalidValue`] when a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Like [`load`](Self::load), with `explicit` layered above the
    /// discovered TOML files (but still below the environment).
    ///
    /// # Errors
    ///
    /// As [`load`](Self::load); a missing `explicit` file is an error.
    pub fn load_from(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_with(explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the working directory first, then [`load_from`](Self::load_from).
    ///
    /// # Errors
    ///
    /// As [`load_from`](Self::load_from). A missing `.env` is not an error.
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load_from(explicit)
    }

    /// Build the default provider chain.
    pub fn figment() -> Figment {
        Self::figment_with(None)
    }

    /// Build the provider chain, optionally with an explicit config file.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    pub fn figment_with(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".mjt/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // An explicit file that does not exist is an error, not a silent skip.
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment.merge(Env::prefixed("MJT_").split("__"))
    }

    /// # Errors
    ///
    /// [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.checks.validate()?;
        self.sanitize.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mjt").join("config.toml"))
    }
}
