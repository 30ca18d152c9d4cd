//! Log output destinations and the entry written to them

use crate::logging::{LogFormat, LogLevel, LoggingConfig};
use std::collections::HashMap;

/// Where logs should be sent
#[derive(Clone, Debug, PartialEq)]
pub enum LogOutput {
    /// Write to stdout
    Stdout {
        /// Override the default format for this output
        format: Option<LogFormat>,
    },
    /// Write to stderr
    Stderr {
        /// Override the default format for this output
        format: Option<LogFormat>,
    },
}

/// A structured log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Target (usually module path)
    pub target: String,
    /// Additional structured fields
    pub fields: HashMap<String, serde_json::Value>,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: String, target: String) -> Self {
        Self { timestamp: chrono::Utc::now(), level, message, target, fields: HashMap::new() }
    }

    /// Create a LogEntry from a standard log::Record
    pub fn from_log_record(record: &log::Record, config: &LoggingConfig) -> Self {
        let mut entry = Self::new(
            record.level().into(),
            record.args().to_string(),
            record.target().to_string(),
        );

        for (key, value) in &config.context_fields {
            entry.fields.insert(key.clone(), serde_json::Value::String(value.clone()));
        }

        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_creation() {
        let entry =
            LogEntry::new(LogLevel::Info, "Test message".to_string(), "test::module".to_string());

        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.message, "Test message");
        assert_eq!(entry.target, "test::module");
        assert!(entry.fields.is_empty());
    }

    #[test]
    fn test_from_log_record_adds_context_fields() {
        let config = LoggingConfig::default().with_context_field("service", "staffgate");
        let entry = LogEntry::from_log_record(
            &log::Record::builder()
                .args(format_args!("route denied"))
                .level(log::Level::Debug)
                .target("staffgate::guard")
                .build(),
            &config,
        );
        assert_eq!(entry.level, LogLevel::Debug);
        assert_eq!(entry.message, "route denied");
        assert_eq!(entry.fields.get("service"), Some(&serde_json::json!("staffgate")));
    }
}
