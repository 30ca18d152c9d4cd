//! Log formatting options for different output styles

use crate::logging::destinations::LogEntry;
use std::str::FromStr;

/// How logs should be formatted
#[derive(Clone, Debug, PartialEq)]
pub enum LogFormat {
    /// Structured JSON format (production default)
    /// Example: {"timestamp":"2024-01-15T10:30:00Z","level":"INFO","message":"Access policy loaded"}
    Json,

    /// Human-readable format (development default)
    /// Example: 2024-01-15 10:30:00.000 INFO  [staffgate::policy] Access policy loaded
    Human,

    /// Logfmt format (key=value pairs)
    /// Example: timestamp=2024-01-15T10:30:00Z level=INFO target=staffgate::policy message="..."
    Logfmt,
}

impl LogFormat {
    /// Format a log entry according to this format
    pub fn format_entry(&self, entry: &LogEntry) -> String {
        match self {
            LogFormat::Json => format_json(entry),
            LogFormat::Human => format_human(entry),
            LogFormat::Logfmt => format_logfmt(entry),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "human" | "text" => Ok(LogFormat::Human),
            "logfmt" => Ok(LogFormat::Logfmt),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

fn level_name(entry: &LogEntry) -> String {
    format!("{:?}", entry.level).to_uppercase()
}

fn format_json(entry: &LogEntry) -> String {
    let mut json = serde_json::Map::new();

    json.insert("timestamp".to_string(), serde_json::Value::String(entry.timestamp.to_rfc3339()));
    json.insert("level".to_string(), serde_json::Value::String(level_name(entry)));
    json.insert("message".to_string(), serde_json::Value::String(entry.message.clone()));
    json.insert("target".to_string(), serde_json::Value::String(entry.target.clone()));

    // Custom fields
    for (key, value) in &entry.fields {
        json.insert(key.clone(), value.clone());
    }

    serde_json::to_string(&json).unwrap_or_else(|_| "Failed to serialize log entry".to_string())
}

fn format_human(entry: &LogEntry) -> String {
    let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f");
    let mut message =
        format!("{} {:5} [{}] {}", timestamp, level_name(entry), entry.target, entry.message);

    for (key, value) in sorted_fields(entry) {
        let value_str = match value {
            serde_json::Value::String(s) => s.clone(),
            _ => value.to_string(),
        };
        message.push_str(&format!(" {}={}", key, value_str));
    }

    message
}

fn format_logfmt(entry: &LogEntry) -> String {
    let mut parts = vec![
        format!("timestamp={}", entry.timestamp.to_rfc3339()),
        format!("level={}", level_name(entry)),
        format!("target={}", entry.target),
        format!("message=\"{}\"", entry.message.replace('"', "\\\"")),
    ];

    for (key, value) in sorted_fields(entry) {
        let value_str = match value {
            serde_json::Value::String(s) => format!("\"{}\"", s.replace('"', "\\\"")),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            _ => format!("\"{}\"", value.to_string().replace('"', "\\\"")),
        };
        parts.push(format!("{}={}", key, value_str));
    }

    parts.join(" ")
}

fn sorted_fields(entry: &LogEntry) -> Vec<(&String, &serde_json::Value)> {
    let mut fields: Vec<_> = entry.fields.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::LogLevel;

    fn entry() -> LogEntry {
        let mut entry = LogEntry::new(
            LogLevel::Warn,
            "Permission matrix gap".to_string(),
            "staffgate::policy".to_string(),
        );
        entry.fields.insert("role".to_string(), serde_json::Value::String("hr".to_string()));
        entry
    }

    #[test]
    fn test_json_format() {
        let line = LogFormat::Json.format_entry(&entry());
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["level"], "WARN");
        assert_eq!(value["target"], "staffgate::policy");
        assert_eq!(value["role"], "hr");
    }

    #[test]
    fn test_human_format() {
        let line = LogFormat::Human.format_entry(&entry());
        assert!(line.contains("WARN  [staffgate::policy] Permission matrix gap role=hr"));
    }

    #[test]
    fn test_logfmt_escapes_quotes() {
        let entry = LogEntry::new(LogLevel::Info, "said \"hi\"".to_string(), "t".to_string());
        let line = LogFormat::Logfmt.format_entry(&entry);
        assert!(line.contains("level=INFO"));
        assert!(line.contains(r#"message="said \"hi\"""#));
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Human));
        assert!("xml".parse::<LogFormat>().is_err());
    }
}
