//! Outbound dependency probe.

use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::time;

use crate::config::DependencyConfig;

/// Classified probe failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    #[error("dependency call timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("dependency call failed: {0}")]
    Transport(String),
}

/// Result of one probe. `elapsed` is measured on every path.
#[derive(Debug)]
pub struct ProbeOutcome {
    pub result: Result<u16, ProbeFailure>,
    pub elapsed: Duration,
}

impl ProbeOutcome {
    pub fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX)
    }
}

pub struct DependencyProber {
    client: reqwest::Client,
    target_url: String,
    timeout: Duration,
}

impl DependencyProber {
    pub fn new(config: &DependencyConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        // The client-level timeout backs up the outer deadline below.
        let mut builder = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("telemetry-sandbox/", env!("CARGO_PKG_VERSION")));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });

        Self {
            client,
            target_url: config.target_url.clone(),
            timeout,
        }
    }

    /// Issue one GET against the target.
    pub async fn probe(&self) -> ProbeOutcome {
        let start = Instant::now();
        let request = self.client.get(&self.target_url).send();

        let result = match time::timeout(self.timeout, request).await {
            Ok(Ok(response)) => Ok(response.status().as_u16()),
            Ok(Err(e)) if e.is_timeout() => Err(ProbeFailure::Timeout(self.timeout)),
            Ok(Err(e)) => Err(ProbeFailure::Transport(e.to_string())),
            Err(_) => Err(ProbeFailure::Timeout(self.timeout)),
        };

        ProbeOutcome {
            result,
            elapsed: start.elapsed(),
        }
    }
}
