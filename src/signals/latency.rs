//! Induced latency.

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tokio::time::{self, Duration, Instant};

use crate::error::SandboxError;
use crate::http::request::{RequestContext, TraceId};
use crate::observability::metrics;

pub const MIN_DELAY_SECS: u64 = 1;
pub const MAX_DELAY_SECS: u64 = 30;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlowResponse {
    pub ok: bool,
    pub delay_seconds: u64,
    pub elapsed_ms: u64,
    pub trace_id: TraceId,
}

/// Validate the requested delay. Runs before any waiting.
pub fn validate_delay(seconds: i64, trace_id: &TraceId) -> Result<u64, SandboxError> {
    u64::try_from(seconds)
        .ok()
        .filter(|s| (MIN_DELAY_SECS..=MAX_DELAY_SECS).contains(s))
        .ok_or_else(|| SandboxError::ValidationFailed {
            message: "seconds must be between 1 and 30",
            trace_id: trace_id.clone(),
        })
}

/// Sleeps cooperatively; a disconnecting client drops the future and the timer with it.
pub async fn slow(Path(seconds): Path<String>, ctx: RequestContext) -> Response {
    // Non-integer segments behave like an unmatched route.
    let Ok(seconds) = seconds.parse::<i64>() else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let delay = match validate_delay(seconds, &ctx.trace_id) {
        Ok(delay) => delay,
        Err(err) => return err.into_response(),
    };

    let start = Instant::now();
    time::sleep(Duration::from_secs(delay)).await;
    let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    metrics::record_signal("slow");

    Json(SlowResponse {
        ok: true,
        delay_seconds: delay,
        elapsed_ms,
        trace_id: ctx.trace_id,
    })
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_bounds_inclusive() {
        let id = TraceId::generate();
        assert_eq!(validate_delay(1, &id).unwrap(), 1);
        assert_eq!(validate_delay(30, &id).unwrap(), 30);
        for bad in [0, 31, -1, i64::MAX] {
            assert!(matches!(
                validate_delay(bad, &id),
                Err(SandboxError::ValidationFailed { .. })
            ));
        }
    }
}
