//! Diagnostics sink
//!
//! Human-readable reports about schema problems, bad field names/indexes and
//! dump output. Nothing written here changes a return value.

use parking_lot::Mutex;

/// Severity of a captured diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
}

/// A single captured message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

/// Receiver of diagnostic messages
pub trait Diagnostics: Send + Sync {
    /// Schema issues and usage errors
    fn warn(&self, message: &str);

    /// Informational output (dump lines)
    fn info(&self, message: &str);
}

/// Forwards diagnostics to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        tracing::warn!(target: "nvfields::diagnostics", "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "nvfields::diagnostics", "{}", message);
    }
}

/// Keeps every message in memory (used by tests)
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    messages: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured messages, oldest first
    pub fn messages(&self) -> Vec<Diagnostic> {
        self.messages.lock().clone()
    }

    /// Only the warnings
    pub fn warnings(&self) -> Vec<String> {
        self.messages
            .lock()
            .iter()
            .filter(|d| d.level == Level::Warn)
            .map(|d| d.message.clone())
            .collect()
    }

    /// Only the informational lines
    pub fn infos(&self) -> Vec<String> {
        self.messages
            .lock()
            .iter()
            .filter(|d| d.level == Level::Info)
            .map(|d| d.message.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.messages.lock().clear();
    }

    fn push(&self, level: Level, message: &str) {
        self.messages.lock().push(Diagnostic {
            level,
            message: message.to_string(),
        });
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn warn(&self, message: &str) {
        self.push(Level::Warn, message);
    }

    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }
}
