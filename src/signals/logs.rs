//! Single log line at a chosen severity.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::http::request::{RequestContext, TraceId};
use crate::http::server::AppState;
use crate::observability::{metrics, LogEvent, Severity};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogResponse {
    pub ok: bool,
    #[serde(rename = "type")]
    pub kind: Severity,
    pub trace_id: TraceId,
}

fn emit(state: &AppState, ctx: RequestContext, severity: Severity) -> Json<LogResponse> {
    let message = match severity {
        Severity::Info => "Test info log",
        Severity::Warn => "Test warn log",
        Severity::Error => "Test error log",
    };
    state.sink.emit(
        LogEvent::new(severity, ctx.trace_id.as_str(), message)
            .field("time", Utc::now().to_rfc3339()),
    );
    metrics::record_signal(severity.as_str());

    Json(LogResponse {
        ok: true,
        kind: severity,
        trace_id: ctx.trace_id,
    })
}

pub async fn info(State(state): State<AppState>, ctx: RequestContext) -> Json<LogResponse> {
    emit(&state, ctx, Severity::Info)
}

pub async fn warn(State(state): State<AppState>, ctx: RequestContext) -> Json<LogResponse> {
    emit(&state, ctx, Severity::Warn)
}

pub async fn error(State(state): State<AppState>, ctx: RequestContext) -> Json<LogResponse> {
    emit(&state, ctx, Severity::Error)
}
