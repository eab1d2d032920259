//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the sandbox.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the telemetry sandbox.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SandboxConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Shared-secret gate for `/api` routes.
    pub access_gate: AccessGateConfig,

    /// Outbound dependency probe settings.
    pub dependency: DependencyConfig,

    /// Environment naming reported by `/api/env`.
    pub environment: EnvironmentConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Access gate configuration.
///
/// The gate is enabled only when `api_key` holds a non-blank value. The
/// protected prefix and credential header are fixed.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AccessGateConfig {
    /// Shared secret expected in the `x-demo-key` header.
    pub api_key: Option<String>,
}

impl AccessGateConfig {
    /// Path prefix the gate protects (matched case-insensitively).
    pub const PROTECTED_PREFIX: &'static str = "/api";

    /// Header carrying the shared secret.
    pub const KEY_HEADER: &'static str = "x-demo-key";

    /// The configured secret, if any. Blank values disable the gate.
    pub fn secret(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    pub fn is_enabled(&self) -> bool {
        self.secret().is_some()
    }
}

/// Dependency probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DependencyConfig {
    /// URL fetched by `/api/dependency`.
    pub target_url: String,

    /// Hard timeout for the outbound call in seconds.
    pub timeout_secs: u64,

    /// Route the probe through `HTTP(S)_PROXY` when set.
    pub use_system_proxy: bool,
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            target_url: "https://example.com/".to_string(),
            timeout_secs: 5,
            use_system_proxy: true,
        }
    }
}

/// Environment naming.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Environment name (e.g., "Development", "Production").
    pub name: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            name: "Production".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: SandboxConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.dependency.timeout_secs, 5);
        assert_eq!(config.environment.name, "Production");
        assert!(!config.access_gate.is_enabled());
    }

    #[test]
    fn test_partial_sections() {
        let config: SandboxConfig = toml::from_str(
            r#"
            [access_gate]
            api_key = "s3cret"

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.access_gate.secret(), Some("s3cret"));
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.observability.log_level, "info");
    }

    #[test]
    fn test_blank_key_disables_gate() {
        let gate = AccessGateConfig {
            api_key: Some("   ".into()),
        };
        assert!(!gate.is_enabled());
        assert_eq!(gate.secret(), None);
    }
}
