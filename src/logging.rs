//! Structured, JSON-lines style logging.
//!
//! Events carry a level, a target, a message and a free-form field map. Where they go is up to the [`LogSink`]
//! handed to a [`Logger`]; the library defaults to [`NullSink`] and never prints on its own.

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::{Map, Value};

/// Extra structured data attached to an event.
pub type LogFields = Map<String, Value>;

#[derive(Debug, Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
/// Severity, in ascending order.
pub enum LogLevel {
    /// Per-step detail.
    Trace,
    /// Every applied command.
    Debug,
    /// Loads, wins and other milestones.
    Info,
    /// Recoverable problems.
    Warn,
    /// Failures.
    Error,
}

#[derive(Debug, Clone, Serialize)]
/// One log record.
pub struct LogEvent {
    /// Milliseconds since the Unix epoch.
    pub ts_ms: u128,
    /// Severity.
    pub level: LogLevel,
    /// The component that emitted it, e.g. `session`.
    pub target: String,
    /// Human-readable text.
    pub message: String,
    /// Structured extras, omitted from output when empty.
    #[serde(skip_serializing_if = "LogFields::is_empty", default)]
    pub fields: LogFields,
}

impl LogEvent {
    /// An event stamped with the current time and no fields.
    pub fn new(level: LogLevel, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ts_ms: current_ms(),
            level,
            target: target.into(),
            message: message.into(),
            fields: LogFields::new(),
        }
    }

    /// Attach `value` under `key`, replacing any earlier value.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }
}

fn current_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Destination for [`LogEvent`]s. Sinks swallow their own failures; logging never interrupts play.
pub trait LogSink: Send + Sync {
    /// Record one event.
    fn log(&self, event: &LogEvent);
}

/// Discards everything.
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _event: &LogEvent) {}
}

/// Writes one JSON object per line to standard error, dropping events below `min_level`.
pub struct StderrSink {
    /// Quietest level still written.
    pub min_level: LogLevel,
}

impl LogSink for StderrSink {
    fn log(&self, event: &LogEvent) {
        if event.level < self.min_level {
            return;
        }
        if let Ok(line) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr().lock(), "{line}");
        }
    }
}

/// Keeps every event in memory, for inspection by tests and debug overlays.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    /// A copy of everything logged so far, oldest first.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl LogSink for MemorySink {
    fn log(&self, event: &LogEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Cheaply cloneable handle to a shared [`LogSink`].
#[derive(Clone)]
pub struct Logger {
    sink: Arc<dyn LogSink>,
}

impl Logger {
    /// Log to `sink`.
    pub fn new<S>(sink: S) -> Self
    where
        S: LogSink + 'static,
    {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Log to a sink the caller keeps a handle on too.
    pub fn from_shared(sink: Arc<dyn LogSink>) -> Self {
        Self { sink }
    }

    /// Drop everything.
    pub fn disabled() -> Self {
        Self::new(NullSink)
    }

    /// Hand a prepared event to the sink.
    pub fn log_event(&self, event: LogEvent) {
        self.sink.log(&event)
    }

    /// Log a fieldless [`Debug`](LogLevel::Debug) event.
    pub fn debug(&self, target: &str, message: &str) {
        self.log_event(LogEvent::new(LogLevel::Debug, target, message))
    }

    /// Log a fieldless [`Info`](LogLevel::Info) event.
    pub fn info(&self, target: &str, message: &str) {
        self.log_event(LogEvent::new(LogLevel::Info, target, message))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::disabled()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Logger")
    }
}
