//! Signal endpoints.
//!
//! # Data Flow
//! ```text
//! correlated (and, if enabled, gated) request
//!     → logs.rs      /api/log/{info,warn,error}
//!     → faults.rs    /api/exception/{handled,unhandled}, /api/http/404
//!     → latency.rs   /api/slow/{seconds}
//!     → probe.rs     /api/dependency
//!     → burst.rs     /api/burst?lines=N
//!     → status.rs    /api/health, /api/env
//! ```
//!
//! # Design Decisions
//! - Each endpoint produces exactly one category of signal
//! - Input validation happens before any side effect
//! - Every log event carries the request's trace id explicitly

pub mod burst;
pub mod faults;
pub mod latency;
pub mod logs;
pub mod probe;
pub mod status;

use axum::{routing::get, Router};

use crate::http::server::AppState;

/// Routes for every signal endpoint.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/log/info", get(logs::info))
        .route("/api/log/warn", get(logs::warn))
        .route("/api/log/error", get(logs::error))
        .route("/api/exception/handled", get(faults::handled))
        .route("/api/exception/unhandled", get(faults::unhandled))
        .route("/api/http/404", get(faults::not_found))
        .route("/api/slow/{seconds}", get(latency::slow))
        .route("/api/dependency", get(probe::dependency))
        .route("/api/burst", get(burst::burst))
        .route("/api/health", get(status::health))
        .route("/api/env", get(status::env))
}
