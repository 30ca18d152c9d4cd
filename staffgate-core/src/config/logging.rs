//! Logging configuration

use crate::logging::{LogFormat, LogLevel, LogOutput};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Env: STAFFGATE_LOG_LEVEL
    /// Default: "info"
    pub level: String,

    /// "human", "json" or "logfmt"
    /// Env: STAFFGATE_LOG_FORMAT
    /// Default: "human"
    pub format: String,

    /// "stdout" or "stderr"
    /// Default: "stderr"
    pub output: String,

    /// Extra fields attached to every log line
    pub context_fields: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "human".to_string(),
            output: "stderr".to_string(),
            context_fields: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn merge(&mut self, other: Self) {
        *self = other;
    }

    pub fn apply_env_vars(&mut self) {
        if let Ok(level) = env::var("STAFFGATE_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(format) = env::var("STAFFGATE_LOG_FORMAT") {
            self.format = format;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.level.parse::<LogLevel>().is_err() {
            bail!("Invalid log level: {}", self.level);
        }
        if self.format.parse::<LogFormat>().is_err() {
            bail!("Invalid log format: {} (expected human, json or logfmt)", self.format);
        }
        if !["stdout", "stderr"].contains(&self.output.as_str()) {
            bail!("Invalid log output: {} (expected stdout or stderr)", self.output);
        }
        Ok(())
    }

    /// Build the runtime logger configuration; invalid values fall back to defaults
    pub fn to_runtime(&self) -> crate::logging::LoggingConfig {
        let format: LogFormat = self.format.parse().unwrap_or(LogFormat::Human);
        let output = if self.output == "stdout" {
            LogOutput::Stdout { format: None }
        } else {
            LogOutput::Stderr { format: None }
        };

        let mut runtime = crate::logging::LoggingConfig {
            outputs: vec![output],
            format,
            ..Default::default()
        }
        .with_level(self.level.parse().unwrap_or(LogLevel::Info));
        for (key, value) in &self.context_fields {
            runtime = runtime.with_context_field(key, value);
        }
        runtime
    }
}
