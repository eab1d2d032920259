//! Health and environment snapshot.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::environment::EnvironmentSnapshot;
use crate::http::request::{RequestContext, TraceId};
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub ok: bool,
    pub trace_id: TraceId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvResponse {
    #[serde(flatten)]
    pub snapshot: EnvironmentSnapshot,
    pub utc_now: DateTime<Utc>,
    pub trace_id: TraceId,
}

pub async fn health(ctx: RequestContext) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        trace_id: ctx.trace_id,
    })
}

pub async fn env(State(state): State<AppState>, ctx: RequestContext) -> Json<EnvResponse> {
    Json(EnvResponse {
        snapshot: state.environment.capture(),
        utc_now: Utc::now(),
        trace_id: ctx.trace_id,
    })
}
