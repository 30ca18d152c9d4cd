//! Configuration system for Staffgate
//!
//! Configuration values are resolved in the following order (highest priority wins):
//!
//! 1. **Code** (struct update / builder) - Highest priority
//! 2. **Environment Variables** - Override file config
//! 3. **Config File** (staffgate.toml) - Override defaults
//! 4. **Defaults** - Lowest priority
//!
//! # Example
//!
//! ```no_run
//! use staffgate_core::config::StaffgateConfig;
//!
//! // Load with full supersedence
//! let config = StaffgateConfig::load()?;
//!
//! // Or load from specific file
//! let config = StaffgateConfig::from_file("staffgate.toml")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod access;
pub mod logging;

pub use access::AccessConfig;
pub use logging::LoggingConfig;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "staffgate.toml";

/// Complete Staffgate configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffgateConfig {
    pub access: AccessConfig,
    pub logging: LoggingConfig,
}

impl StaffgateConfig {
    /// Load configuration with full supersedence chain
    ///
    /// Priority order (highest to lowest):
    /// 1. Environment variables
    /// 2. Config file (staffgate.toml)
    /// 3. Defaults
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from a specific file; a missing file means defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut config = Self::default();

        if path.exists() {
            let mut file_config = Self::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            if let Some(dir) = path.parent() {
                file_config.access.resolve_relative_to(dir);
            }
            config.merge(file_config);
        }

        config.apply_env_vars();
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config: {}", path.as_ref().display()))
    }

    /// Merge another config into this one (other takes priority)
    pub fn merge(&mut self, other: Self) {
        self.access.merge(other.access);
        self.logging.merge(other.logging);
    }

    /// Apply environment variables to configuration
    pub fn apply_env_vars(&mut self) {
        self.access.apply_env_vars();
        self.logging.apply_env_vars();
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.access.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
