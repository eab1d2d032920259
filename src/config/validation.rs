//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and the dependency URL
//! - Validate value ranges (timeouts > 0, outer timeout above the slow ceiling)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SandboxConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::SandboxConfig;
use crate::signals::latency::MAX_DELAY_SECS;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("invalid dependency URL '{0}'")]
    DependencyUrl(String),

    #[error("dependency.timeout_secs must be greater than 0")]
    DependencyTimeout,

    #[error("timeouts.request_secs ({0}) must exceed the maximum slow delay of {max}s", max = MAX_DELAY_SECS)]
    RequestTimeout(u64),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
}

pub fn validate_config(config: &SandboxConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    let url_ok = Url::parse(&config.dependency.target_url)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false);
    if !url_ok {
        errors.push(ValidationError::DependencyUrl(config.dependency.target_url.clone()));
    }

    if config.dependency.timeout_secs == 0 {
        errors.push(ValidationError::DependencyTimeout);
    }

    if config.timeouts.request_secs <= MAX_DELAY_SECS {
        errors.push(ValidationError::RequestTimeout(config.timeouts.request_secs));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
