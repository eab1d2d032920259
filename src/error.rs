//! Error taxonomy for the request pipeline.
//!
//! Only failures that change the HTTP outcome live here. Handled faults and
//! dependency failures are recovered inside their endpoints and never become
//! a `SandboxError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::http::request::TraceId;
use crate::http::response::failure;

/// A deliberately raised failure used by the exception signals.
#[derive(Debug, Error)]
#[error("Telemetry sandbox {0} exception")]
pub struct SimulatedFault(pub &'static str);

#[derive(Debug, Error)]
pub enum SandboxError {
    /// Access gate mismatch.
    #[error("Missing or invalid x-demo-key")]
    AuthRejected { trace_id: TraceId },

    /// Out-of-range input, rejected before any side effect.
    #[error("{message}")]
    ValidationFailed {
        message: &'static str,
        trace_id: TraceId,
    },

    /// The deliberate 404 signal.
    #[error("Not Found")]
    NotFoundSimulated { trace_id: TraceId },

    /// A fault that escaped its endpoint on purpose.
    #[error("unhandled fault: {source}")]
    Unhandled {
        trace_id: TraceId,
        source: SimulatedFault,
    },
}

impl SandboxError {
    pub fn trace_id(&self) -> &TraceId {
        match self {
            SandboxError::AuthRejected { trace_id }
            | SandboxError::ValidationFailed { trace_id, .. }
            | SandboxError::NotFoundSimulated { trace_id }
            | SandboxError::Unhandled { trace_id, .. } => trace_id,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            SandboxError::AuthRejected { .. } => StatusCode::UNAUTHORIZED,
            SandboxError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            SandboxError::NotFoundSimulated { .. } => StatusCode::NOT_FOUND,
            SandboxError::Unhandled { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SandboxError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            SandboxError::Unhandled { trace_id, source } => {
                // Generic failure path: no body, the handler produced nothing.
                tracing::error!(trace_id = %trace_id, error = %source, "Unhandled exception");
                status.into_response()
            }
            _ => failure(status, &self.to_string(), self.trace_id()),
        }
    }
}
