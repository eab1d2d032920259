//! Telemetry sandbox library.
//!
//! An HTTP service that produces known observability signals on demand:
//! log lines at each severity, handled and unhandled failures, latency, an
//! outbound dependency call and log bursts. Every response and every log
//! event of a request share one trace id.

pub mod config;
pub mod dependency;
pub mod environment;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod signals;

pub use config::SandboxConfig;
pub use error::SandboxError;
pub use http::SandboxServer;
pub use lifecycle::Shutdown;
