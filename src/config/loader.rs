//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::SandboxConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the access gate secret.
pub const ENV_API_KEY: &str = "DEMO_API_KEY";
pub const ENV_BIND_ADDRESS: &str = "SANDBOX_BIND_ADDRESS";
pub const ENV_ENVIRONMENT: &str = "SANDBOX_ENVIRONMENT";
pub const ENV_DEPENDENCY_URL: &str = "SANDBOX_DEPENDENCY_URL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, override and validate configuration.
///
/// With no path the defaults are used as the base. Environment overrides are
/// applied once here and never re-read.
pub fn load_config(path: Option<&Path>) -> Result<SandboxConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => SandboxConfig::default(),
    };

    apply_overrides(&mut config, |name| std::env::var(name).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides using `lookup` to resolve variable names.
pub fn apply_overrides<F>(config: &mut SandboxConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup(ENV_API_KEY) {
        config.access_gate.api_key = Some(key);
    }
    if let Some(addr) = lookup(ENV_BIND_ADDRESS) {
        config.listener.bind_address = addr;
    }
    if let Some(name) = lookup(ENV_ENVIRONMENT) {
        config.environment.name = name;
    }
    if let Some(url) = lookup(ENV_DEPENDENCY_URL) {
        config.dependency.target_url = url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = SandboxConfig::default();
        let vars: HashMap<&str, &str> = [
            (ENV_API_KEY, "from-env"),
            (ENV_ENVIRONMENT, "Development"),
        ]
        .into_iter()
        .collect();

        apply_overrides(&mut config, |name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.access_gate.secret(), Some("from-env"));
        assert_eq!(config.environment.name, "Development");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("sandbox-config-{}.toml", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[listener]\nbind_address = \"127.0.0.1:9999\"").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:9999");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
