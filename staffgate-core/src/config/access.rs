//! Access policy configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// TOML policy document replacing the built-in hospital policy
    /// Env: STAFFGATE_POLICY_FILE
    /// Default: none
    pub policy_file: Option<PathBuf>,

    /// Refuse a permission matrix with missing entries
    /// Env: STAFFGATE_STRICT
    /// Default: false
    pub strict: bool,
}

impl AccessConfig {
    pub fn merge(&mut self, other: Self) {
        if other.policy_file.is_some() {
            self.policy_file = other.policy_file;
        }
        self.strict = other.strict;
    }

    /// Anchor a relative policy path at the directory of the config file
    pub fn resolve_relative_to(&mut self, base: &Path) {
        if let Some(path) = &self.policy_file {
            if path.is_relative() {
                self.policy_file = Some(base.join(path));
            }
        }
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(path) = env::var("STAFFGATE_POLICY_FILE") {
            if !path.trim().is_empty() {
                self.policy_file = Some(PathBuf::from(path));
            }
        }
        if let Ok(strict) = env::var("STAFFGATE_STRICT") {
            match parse_flag(&strict) {
                Some(flag) => self.strict = flag,
                None => log::warn!(
                    target: "staffgate::config",
                    "Ignoring STAFFGATE_STRICT={:?}: expected true/false, 1/0, yes/no or on/off",
                    strict
                ),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.policy_file {
            if path.as_os_str().is_empty() {
                bail!("Invalid policy_file: must not be empty");
            }
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
