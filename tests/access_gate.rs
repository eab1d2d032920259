//! Access gate behavior with and without a configured secret.

use axum::http::StatusCode;

mod common;

use common::{get, router_with_sink, test_config};

const ENDPOINTS: [&str; 9] = [
    "/api/log/info",
    "/api/log/warn",
    "/api/log/error",
    "/api/exception/handled",
    "/api/http/404",
    "/api/slow/0",
    "/api/burst?lines=1",
    "/api/health",
    "/api/env",
];

fn gated_config(secret: &str) -> telemetry_sandbox::SandboxConfig {
    let mut config = test_config();
    config.access_gate.api_key = Some(secret.to_string());
    config
}

#[tokio::test]
async fn test_disabled_gate_needs_no_key() {
    let (router, _sink) = router_with_sink(test_config());

    for path in ENDPOINTS {
        let reply = get(&router, path, None).await;
        assert_ne!(reply.status, StatusCode::UNAUTHORIZED, "{path} was gated");
    }
}

#[tokio::test]
async fn test_blank_secret_keeps_gate_disabled() {
    let (router, _sink) = router_with_sink(gated_config("  "));
    let reply = get(&router, "/api/health", None).await;
    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_key_rejected() {
    let (router, sink) = router_with_sink(gated_config("s3cret"));

    let reply = get(&router, "/api/health", None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["ok"], false);
    assert_eq!(reply.body["message"], "Missing or invalid x-demo-key");
    assert_eq!(reply.body["traceId"], reply.trace_id());
    assert!(!reply.trace_id().is_empty());
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_wrong_key_rejected() {
    let (router, _sink) = router_with_sink(gated_config("s3cret"));

    for key in ["wrong", "S3CRET", "s3cret2", ""] {
        let reply = get(&router, "/api/health", Some(key)).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED, "key {key:?} accepted");
    }
}

#[tokio::test]
async fn test_exact_key_accepted() {
    let (router, _sink) = router_with_sink(gated_config("s3cret"));

    let reply = get(&router, "/api/health", Some("s3cret")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["ok"], true);
}

#[tokio::test]
async fn test_rejection_skips_handler() {
    let (router, sink) = router_with_sink(gated_config("s3cret"));

    let reply = get(&router, "/api/burst?lines=50", None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    let reply = get(&router, "/api/exception/unhandled", Some("nope")).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_prefix_is_case_insensitive() {
    let (router, _sink) = router_with_sink(gated_config("s3cret"));

    let reply = get(&router, "/API/health", None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_paths_outside_prefix_bypass_gate() {
    let (router, _sink) = router_with_sink(gated_config("s3cret"));

    for path in ["/", "/status", "/apix/health"] {
        let reply = get(&router, path, None).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND, "{path}");
        assert!(!reply.trace_id().is_empty());
    }
}
