//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all signal handlers
//! - Wire up middleware (correlation, panic boundary, tracing, timeout, stages)
//! - Bind server to listener
//! - Serve until the shutdown signal fires, draining in-flight requests

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::SandboxConfig;
use crate::dependency::DependencyProber;
use crate::environment::{EnvironmentSource, SystemEnvironment};
use crate::http::pipeline::{run_pipeline, Pipeline};
use crate::http::request::correlate;
use crate::observability::{tracing::make_request_span, LogSink, TracingSink};
use crate::signals;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub sink: Arc<dyn LogSink>,
    pub prober: Arc<DependencyProber>,
    pub environment: Arc<dyn EnvironmentSource>,
}

impl AppState {
    pub fn from_config(config: &SandboxConfig, sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            prober: Arc::new(DependencyProber::new(&config.dependency)),
            environment: Arc::new(SystemEnvironment::new(config.environment.name.clone())),
        }
    }
}

/// HTTP server for the telemetry sandbox.
pub struct SandboxServer {
    router: Router,
    config: SandboxConfig,
}

impl SandboxServer {
    /// Create a server that writes signal events to `tracing`.
    pub fn new(config: SandboxConfig) -> Self {
        Self::with_sink(config, Arc::new(TracingSink))
    }

    /// Create a server with a custom log sink.
    pub fn with_sink(config: SandboxConfig, sink: Arc<dyn LogSink>) -> Self {
        let state = AppState::from_config(&config, sink);
        Self::with_state(config, state)
    }

    /// Create a server from fully assembled state.
    pub fn with_state(config: SandboxConfig, state: AppState) -> Self {
        let pipeline = Arc::new(Pipeline::from_config(&config));
        let router = Self::build_router(&config, state, pipeline);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run top to bottom on the way in. `correlate` is outermost so the
    /// trace id is stamped on every response, including panics, timeouts and
    /// gate rejections.
    #[allow(deprecated)]
    fn build_router(config: &SandboxConfig, state: AppState, pipeline: Arc<Pipeline>) -> Router {
        signals::routes()
            .fallback(route_not_found)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(middleware::from_fn(correlate))
                    .layer(CatchPanicLayer::custom(panic_response))
                    .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
                    .layer(middleware::from_fn_with_state(pipeline, run_pipeline)),
            )
    }

    /// The assembled router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            access_gate = self.config.access_gate.is_enabled(),
            dependency = %self.config.dependency.target_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }
}

/// Real routing miss, distinct from the simulated `/api/http/404`.
async fn route_not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = %detail, "Handler panicked");
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}
