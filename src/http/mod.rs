//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layer order)
//!     → request.rs (assign trace id, always)
//!     → pipeline.rs (ordered stages; access gate when a secret is set)
//!     → signals::* (matched endpoint)
//!     → response.rs (JSON envelopes)
//!     → request.rs stamps x-trace-id on the way out
//! ```

pub mod middleware;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod server;

pub use pipeline::{Guard, Pipeline, Stage};
pub use request::{RequestContext, TraceId, TraceIdExt, X_TRACE_ID};
pub use server::{AppState, SandboxServer};
