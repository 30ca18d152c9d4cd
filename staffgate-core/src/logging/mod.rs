//! Staffgate Logging System
//!
//! A small `log::Log` implementation configured declaratively. Library code
//! only uses the standard `log` macros; binaries call [`init_logging`] once.
//!
//! Targets used by the crate:
//! - `staffgate::access` - matrix and route lookups
//! - `staffgate::guard` - route guard decisions
//! - `staffgate::policy` - policy loading and validation
//!
//! # Example
//!
//! ```rust,no_run
//! use staffgate_core::logging::LoggingConfig;
//!
//! let config = LoggingConfig::default().with_context_field("service", "staffgate");
//! staffgate_core::logging::init_logging(&config).unwrap();
//!
//! log::info!("Access policy ready");
//! ```

pub mod config;
pub mod destinations;
pub mod formatter;

pub use config::{LogLevel, LoggingConfig};
pub use destinations::{LogEntry, LogOutput};
pub use formatter::LogFormat;

use std::io::Write;
use std::sync::OnceLock;

static INIT: OnceLock<Result<(), String>> = OnceLock::new();

/// Initialize the Staffgate logger
///
/// Only the first call installs the logger; later calls return the outcome of
/// that first attempt. Fails if another logger was installed first.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    init_once(&INIT, || init_logging_internal(config))
}

fn init_once(
    cell: &OnceLock<Result<(), String>>,
    install: impl FnOnce() -> anyhow::Result<()>,
) -> anyhow::Result<()> {
    cell.get_or_init(|| install().map_err(|e| e.to_string()))
        .clone()
        .map_err(anyhow::Error::msg)
}

fn init_logging_internal(config: &LoggingConfig) -> anyhow::Result<()> {
    let logger = StaffgateLogger::new(config.clone());
    log::set_boxed_logger(Box::new(logger))
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;
    log::set_max_level(config.level.into());
    Ok(())
}

/// Staffgate's implementation of the log::Log trait
struct StaffgateLogger {
    config: LoggingConfig,
    writers: Vec<StreamWriter>,
}

impl StaffgateLogger {
    fn new(config: LoggingConfig) -> Self {
        let mut writers: Vec<StreamWriter> = config
            .outputs
            .iter()
            .map(|output| match output {
                LogOutput::Stdout { format } => StreamWriter {
                    stream: Stream::Stdout,
                    format: format.clone().unwrap_or_else(|| config.format.clone()),
                },
                LogOutput::Stderr { format } => StreamWriter {
                    stream: Stream::Stderr,
                    format: format.clone().unwrap_or_else(|| config.format.clone()),
                },
            })
            .collect();

        // Default to stderr if no outputs specified
        if writers.is_empty() {
            writers.push(StreamWriter { stream: Stream::Stderr, format: config.format.clone() });
        }

        Self { config, writers }
    }
}

impl log::Log for StaffgateLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        LogLevel::from(metadata.level()) <= self.config.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = LogEntry::from_log_record(record, &self.config);
        for writer in &self.writers {
            let _ = writer.write_log(&entry);
        }
    }

    fn flush(&self) {
        for writer in &self.writers {
            let _ = writer.flush();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Stream {
    Stdout,
    Stderr,
}

struct StreamWriter {
    stream: Stream,
    format: LogFormat,
}

impl StreamWriter {
    fn write_log(&self, entry: &LogEntry) -> std::io::Result<()> {
        let line = self.format.format_entry(entry);
        match self.stream {
            Stream::Stdout => writeln!(std::io::stdout().lock(), "{}", line),
            Stream::Stderr => writeln!(std::io::stderr().lock(), "{}", line),
        }
    }

    fn flush(&self) -> std::io::Result<()> {
        match self.stream {
            Stream::Stdout => std::io::stdout().flush(),
            Stream::Stderr => std::io::stderr().flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn test_failed_install_is_reported_on_every_call() {
        let cell = OnceLock::new();
        let first = init_once(&cell, || Err(anyhow::anyhow!("logger already set")));
        assert!(first.is_err());

        let mut retried = false;
        let second = init_once(&cell, || {
            retried = true;
            Ok(())
        });
        assert!(!retried);
        assert_eq!(second.unwrap_err().to_string(), "logger already set");
    }

    #[test]
    fn test_successful_install_is_remembered() {
        let cell = OnceLock::new();
        assert!(init_once(&cell, || Ok(())).is_ok());
        assert!(init_once(&cell, || Err(anyhow::anyhow!("unused"))).is_ok());
    }

    #[test]
    fn test_logger_respects_level() {
        let logger = StaffgateLogger::new(LoggingConfig::default().with_level(LogLevel::Warn));
        let warn = log::Metadata::builder().level(log::Level::Warn).target("t").build();
        let debug = log::Metadata::builder().level(log::Level::Debug).target("t").build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&debug));
    }

    #[test]
    fn test_writers_inherit_default_format() {
        let config = LoggingConfig {
            outputs: vec![
                LogOutput::Stdout { format: None },
                LogOutput::Stderr { format: Some(LogFormat::Logfmt) },
            ],
            format: LogFormat::Json,
            ..LoggingConfig::default()
        };
        let logger = StaffgateLogger::new(config);
        assert_eq!(logger.writers.len(), 2);
        assert_eq!(logger.writers[0].format, LogFormat::Json);
        assert_eq!(logger.writers[1].format, LogFormat::Logfmt);
    }

    #[test]
    fn test_empty_outputs_default_to_stderr() {
        let config = LoggingConfig { outputs: vec![], ..LoggingConfig::default() };
        let logger = StaffgateLogger::new(config);
        assert_eq!(logger.writers.len(), 1);
        assert_eq!(logger.writers[0].stream, Stream::Stderr);
    }
}
