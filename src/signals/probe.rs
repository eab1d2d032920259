//! Outbound dependency call.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::http::request::{RequestContext, TraceId};
use crate::http::server::AppState;
use crate::observability::{metrics, LogEvent};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase", untagged)]
pub enum DependencyResponse {
    #[serde(rename_all = "camelCase")]
    Success {
        ok: bool,
        status_code: u16,
        elapsed_ms: u64,
        trace_id: TraceId,
    },
    #[serde(rename_all = "camelCase")]
    Failure {
        ok: bool,
        error: String,
        elapsed_ms: u64,
        trace_id: TraceId,
    },
}

/// Always answers 200; a failed probe is reported in the body.
pub async fn dependency(State(state): State<AppState>, ctx: RequestContext) -> Json<DependencyResponse> {
    let outcome = state.prober.probe().await;
    let elapsed_ms = outcome.elapsed_ms();
    metrics::record_signal("dependency");

    let body = match outcome.result {
        Ok(status_code) => {
            state.sink.emit(
                LogEvent::info(ctx.trace_id.as_str(), "Dependency call completed")
                    .field("status_code", status_code)
                    .field("elapsed_ms", elapsed_ms),
            );
            DependencyResponse::Success {
                ok: true,
                status_code,
                elapsed_ms,
                trace_id: ctx.trace_id,
            }
        }
        Err(failure) => {
            let error = failure.to_string();
            state.sink.emit(
                LogEvent::error(ctx.trace_id.as_str(), "Dependency call failed")
                    .field("error", error.clone())
                    .field("elapsed_ms", elapsed_ms),
            );
            DependencyResponse::Failure {
                ok: false,
                error,
                elapsed_ms,
                trace_id: ctx.trace_id,
            }
        }
    };

    Json(body)
}
