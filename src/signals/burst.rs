//! Burst log emission.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::error::SandboxError;
use crate::http::request::{RequestContext, TraceId};
use crate::http::server::AppState;
use crate::observability::{metrics, LogEvent};

pub const DEFAULT_LINES: i64 = 100;
pub const MAX_LINES: i64 = 500;

/// Burst query parameters, built from the raw query pairs.
#[derive(Debug, Default)]
pub struct BurstParams {
    pub lines: Option<String>,
}

impl BurstParams {
    /// Repeated `lines` values are joined with commas and so never parse.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let values: Vec<String> = pairs
            .into_iter()
            .filter(|(key, _)| key == "lines")
            .map(|(_, value)| value)
            .collect();

        Self {
            lines: (!values.is_empty()).then(|| values.join(",")),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BurstResponse {
    pub ok: bool,
    pub lines: i64,
    pub trace_id: TraceId,
}

/// Resolve the requested line count. Missing or non-integer input means the default.
pub fn resolve_lines(raw: Option<&str>, trace_id: &TraceId) -> Result<i64, SandboxError> {
    let lines = raw
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_LINES);

    if (1..=MAX_LINES).contains(&lines) {
        Ok(lines)
    } else {
        Err(SandboxError::ValidationFailed {
            message: "lines must be between 1 and 500",
            trace_id: trace_id.clone(),
        })
    }
}

pub async fn burst(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
    ctx: RequestContext,
) -> Response {
    let params = BurstParams::from_pairs(pairs);
    let lines = match resolve_lines(params.lines.as_deref(), &ctx.trace_id) {
        Ok(lines) => lines,
        Err(err) => return err.into_response(),
    };

    for line in 1..=lines {
        state.sink.emit(
            LogEvent::info(ctx.trace_id.as_str(), format!("Burst log {line}/{lines}"))
                .field("line", line)
                .field("total", lines),
        );
    }
    metrics::record_signal("burst");

    Json(BurstResponse {
        ok: true,
        lines,
        trace_id: ctx.trace_id,
    })
    .into_response()
}
