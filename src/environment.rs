//! Environment snapshot.
//!
//! Captures the identity of the running process for `/api/env`. Capture is
//! cheap and repeatable: two captures in one process differ only in what the
//! caller adds (the clock).

use serde::Serialize;

/// Environment variable naming the hosting instance.
pub const ENV_INSTANCE_ID: &str = "WEBSITE_INSTANCE_ID";

const NOT_AVAILABLE: &str = "n/a";
const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentSnapshot {
    pub environment_name: String,
    pub machine_name: String,
    pub instance_id: String,
    pub process_id: u32,
    pub app_version: String,
}

/// Source of environment information.
pub trait EnvironmentSource: Send + Sync {
    fn capture(&self) -> EnvironmentSnapshot;
}

/// Reads the real host, process and environment variables.
#[derive(Debug, Clone)]
pub struct SystemEnvironment {
    environment_name: String,
}

impl SystemEnvironment {
    pub fn new(environment_name: impl Into<String>) -> Self {
        Self {
            environment_name: environment_name.into(),
        }
    }
}

impl EnvironmentSource for SystemEnvironment {
    fn capture(&self) -> EnvironmentSnapshot {
        let machine_name = hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok());

        snapshot(
            &self.environment_name,
            machine_name,
            std::env::var(ENV_INSTANCE_ID).ok(),
            std::process::id(),
            option_env!("CARGO_PKG_VERSION").map(str::to_owned),
        )
    }
}

/// Assemble a snapshot, applying the fallbacks for missing values.
pub fn snapshot(
    environment_name: &str,
    machine_name: Option<String>,
    instance_id: Option<String>,
    process_id: u32,
    app_version: Option<String>,
) -> EnvironmentSnapshot {
    EnvironmentSnapshot {
        environment_name: environment_name.to_string(),
        machine_name: machine_name.unwrap_or_else(|| UNKNOWN.to_string()),
        instance_id: instance_id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        process_id,
        app_version: app_version.unwrap_or_else(|| UNKNOWN.to_string()),
    }
}
