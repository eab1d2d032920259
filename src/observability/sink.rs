//! Log sink for signal events.
//!
//! Every event carries the trace id of the request that produced it. The
//! trace id travels inside the event itself so concurrent requests never
//! observe each other's context.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Mutex;

use serde::Serialize;
use serde_json::Value;

/// Severity of a signal log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single structured log event emitted while handling a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEvent {
    pub severity: Severity,
    pub message: String,
    pub trace_id: String,
    pub fields: BTreeMap<&'static str, Value>,
}

impl LogEvent {
    pub fn new(severity: Severity, trace_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            trace_id: trace_id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Attach a structured field.
    pub fn field(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.fields.insert(name, value.into());
        self
    }

    pub fn info(trace_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, trace_id, message)
    }

    pub fn warn(trace_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warn, trace_id, message)
    }

    pub fn error(trace_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, trace_id, message)
    }
}

/// Destination for signal log events.
pub trait LogSink: Send + Sync {
    fn emit(&self, event: LogEvent);
}

/// Structured fields `TracingSink` records under their own names.
const KNOWN_FIELDS: [&str; 6] = ["time", "error", "line", "total", "status_code", "elapsed_ms"];

/// Forwards events to the global `tracing` subscriber.
///
/// Known fields become individual `tracing` fields so JSON output stays
/// queryable; anything else is serialized into a single `extra` field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogEvent {
    fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    fn number(&self, name: &str) -> Option<i64> {
        self.fields.get(name).and_then(Value::as_i64)
    }

    fn extra(&self) -> Option<String> {
        let extra: serde_json::Map<String, Value> = self
            .fields
            .iter()
            .filter(|(name, _)| !KNOWN_FIELDS.contains(*name))
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        (!extra.is_empty()).then(|| Value::Object(extra).to_string())
    }
}

macro_rules! forward {
    ($level:ident, $event:expr) => {{
        let event = $event;
        let extra = event.extra();
        ::tracing::$level!(
            trace_id = %event.trace_id,
            time = event.text("time"),
            error = event.text("error"),
            line = event.number("line"),
            total = event.number("total"),
            status_code = event.number("status_code"),
            elapsed_ms = event.number("elapsed_ms"),
            extra = extra.as_deref(),
            "{}",
            event.message
        )
    }};
}

impl LogSink for TracingSink {
    fn emit(&self, event: LogEvent) {
        match event.severity {
            Severity::Info => forward!(info, &event),
            Severity::Warn => forward!(warn, &event),
            Severity::Error => forward!(error, &event),
        }
    }
}

/// Records events in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event recorded so far.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().expect("memory sink mutex poisoned").clone()
    }

    /// Events recorded for one trace id.
    pub fn events_for(&self, trace_id: &str) -> Vec<LogEvent> {
        self.events
            .lock()
            .expect("memory sink mutex poisoned")
            .iter()
            .filter(|e| e.trace_id == trace_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().expect("memory sink mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for MemorySink {
    fn emit(&self, event: LogEvent) {
        self.events
            .lock()
            .expect("memory sink mutex poisoned")
            .push(event);
    }
}
