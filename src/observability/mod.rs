//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Signal endpoints produce:
//!     → sink.rs (LogEvent → tracing, or in-memory capture)
//!     → metrics.rs (counters, histograms)
//! HTTP pipeline produces:
//!     → tracing.rs (one span per request carrying the trace id)
//!
//! Consumers:
//!     → logging.rs subscriber (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - The trace id is passed explicitly with every LogEvent, never read from
//!   thread-local state
//! - Metrics are cheap (no-op until a recorder is installed)

pub mod logging;
pub mod metrics;
pub mod sink;
pub mod tracing;

pub use sink::{LogEvent, LogSink, MemorySink, Severity, TracingSink};
