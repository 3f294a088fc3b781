//! Host Logging Abstractions
//!
//! Forwards structured log events from the core into the host's log pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Single-letter priority as printed by logcat.
    pub fn priority_letter(&self) -> char {
        match self {
            LogLevel::Trace => 'V',
            LogLevel::Debug => 'D',
            LogLevel::Info => 'I',
            LogLevel::Warn => 'W',
            LogLevel::Error => 'E',
        }
    }
}

/// Structured log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub timestamp: DateTime<Utc>,
    /// Target module/component
    pub target: String,
    pub message: String,
    pub fields: HashMap<String, String>,
    /// Name of the span the event was emitted in
    pub span_id: Option<String>,
}

impl LogEntry {
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            timestamp: Utc::now(),
            target: target.into(),
            message: message.into(),
            fields: HashMap::new(),
            span_id: None,
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn with_span_id(mut self, span_id: impl Into<String>) -> Self {
        self.span_id = Some(span_id.into());
        self
    }
}

/// Logger sink trait
///
/// Forwards structured logs from the core to host logging pipelines:
/// - **Android**: Logcat
/// - **iOS**: OSLog
/// - **Desktop**: Console or file logs
///
/// Implementations must not log payload contents; the core only ever emits
/// sizes and redacted locators.
#[async_trait::async_trait]
pub trait LoggerSink: Send + Sync {
    /// Forward a log entry to the host logging system
    async fn log(&self, entry: LogEntry) -> Result<()>;

    /// Flush any buffered logs
    async fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Minimum level this sink wants to receive
    fn min_level(&self) -> LogLevel {
        LogLevel::Info
    }
}

/// Logcat-style console sink for development builds.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    pub tag: String,
    pub min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            min_level: LogLevel::Info,
        }
    }

    /// Render an entry as a single logcat-style line.
    pub fn format_entry(&self, entry: &LogEntry) -> String {
        let mut line = format!(
            "{} {}/{}: [{}] {}",
            entry.timestamp.format("%m-%d %H:%M:%S%.3f"),
            entry.level.priority_letter(),
            self.tag,
            entry.target,
            entry.message
        );

        let mut fields: Vec<_> = entry.fields.iter().collect();
        fields.sort();
        for (key, value) in fields {
            line.push_str(&format!(" {}={}", key, value));
        }
        line
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new("SaveFile")
    }
}

#[async_trait::async_trait]
impl LoggerSink for ConsoleLogger {
    async fn log(&self, entry: LogEntry) -> Result<()> {
        if entry.level >= self.min_level {
            eprintln!("{}", self.format_entry(&entry));
        }
        Ok(())
    }

    fn min_level(&self) -> LogLevel {
        self.min_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_entry_builder() {
        let entry = LogEntry::new(LogLevel::Info, "core_export", "Target created")
            .with_field("mime_type", "text/csv")
            .with_span_id("create_target");

        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.target, "core_export");
        assert_eq!(entry.fields.get("mime_type"), Some(&"text/csv".to_string()));
        assert_eq!(entry.span_id, Some("create_target".to_string()));
    }

    #[test]
    fn test_console_format_is_logcat_like() {
        let logger = ConsoleLogger::new("Export");
        let entry = LogEntry::new(LogLevel::Warn, "core_export::session", "Write failed")
            .with_field("code", "WRITE_FAILED")
            .with_field("bytes", "5");

        let line = logger.format_entry(&entry);
        assert!(line.contains("W/Export: [core_export::session] Write failed"));
        assert!(line.ends_with(" bytes=5 code=WRITE_FAILED"));
    }

    #[tokio::test]
    async fn test_console_logger_accepts_entries() {
        let logger = ConsoleLogger::default();
        let entry = LogEntry::new(LogLevel::Debug, "test", "below threshold");

        logger.log(entry).await.unwrap();
        assert_eq!(logger.min_level(), LogLevel::Info);
    }
}
