//! Handled and unhandled failures, and the simulated 404.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::{SandboxError, SimulatedFault};
use crate::http::request::{RequestContext, TraceId};
use crate::http::server::AppState;
use crate::observability::{metrics, LogEvent};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandledResponse {
    pub ok: bool,
    pub handled: bool,
    pub trace_id: TraceId,
}

fn raise(kind: &'static str) -> Result<(), SimulatedFault> {
    Err(SimulatedFault(kind))
}

pub async fn handled(State(state): State<AppState>, ctx: RequestContext) -> Json<HandledResponse> {
    if let Err(fault) = raise("handled") {
        state.sink.emit(
            LogEvent::error(ctx.trace_id.as_str(), "Handled exception")
                .field("error", fault.to_string()),
        );
        metrics::record_signal("exception_handled");
    }

    Json(HandledResponse {
        ok: true,
        handled: true,
        trace_id: ctx.trace_id,
    })
}

/// Logs a warning, then lets the fault escape to the pipeline boundary.
pub async fn unhandled(State(state): State<AppState>, ctx: RequestContext) -> SandboxError {
    state.sink.emit(LogEvent::warn(
        ctx.trace_id.as_str(),
        "About to throw unhandled exception",
    ));
    metrics::record_signal("exception_unhandled");

    SandboxError::Unhandled {
        trace_id: ctx.trace_id,
        source: SimulatedFault("unhandled"),
    }
}

pub async fn not_found(ctx: RequestContext) -> SandboxError {
    metrics::record_signal("not_found");
    SandboxError::NotFoundSimulated {
        trace_id: ctx.trace_id,
    }
}
