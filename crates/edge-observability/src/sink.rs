//! Log output destinations.

use std::sync::Mutex;

use crate::logging::{LogEntry, LogFormat, LogLevel};

/// Destination for structured log entries.
pub trait LogSink: Send + Sync {
    /// Write one entry.
    fn write(&self, entry: &LogEntry, format: LogFormat);
}

/// Writes formatted entries to stderr (Spin captures this).
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write(&self, entry: &LogEntry, format: LogFormat) {
        let output = match format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        };
        eprintln!("{}", output);
    }
}

/// Forwards entries to `tracing` events.
///
/// The format is left to the installed subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, entry: &LogEntry, _format: LogFormat) {
        let fields = serde_json::to_string(&entry.fields).unwrap_or_default();
        let route = entry.route.as_deref().unwrap_or("");

        match entry.level {
            LogLevel::Trace => {
                tracing::trace!(request_id = %entry.request_id, route, fields = %fields, "{}", entry.message)
            }
            LogLevel::Debug => {
                tracing::debug!(request_id = %entry.request_id, route, fields = %fields, "{}", entry.message)
            }
            LogLevel::Info => {
                tracing::info!(request_id = %entry.request_id, route, fields = %fields, "{}", entry.message)
            }
            LogLevel::Warn => {
                tracing::warn!(request_id = %entry.request_id, route, fields = %fields, "{}", entry.message)
            }
            LogLevel::Error => {
                tracing::error!(request_id = %entry.request_id, route, fields = %fields, "{}", entry.message)
            }
        }
    }
}

/// Keeps entries in memory, for tests and local replay.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all captured entries.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|e| e.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }

    /// Entries at a given level.
    pub fn at_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }

    /// Drop all captured entries.
    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.clear();
    }
}

impl LogSink for MemorySink {
    fn write(&self, entry: &LogEntry, _format: LogFormat) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.push(entry.clone());
    }
}
