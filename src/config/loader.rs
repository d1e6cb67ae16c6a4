//! Configuration loading from disk.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

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

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<GatewayConfig, ConfigError> {
    let config: GatewayConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.timeouts.upstream_secs, 30);
        assert_eq!(config.timeouts.request_secs, 35);
        assert_eq!(config.security.max_body_size, 64 * 1024);
        assert!(!config.observability.metrics_enabled);
        assert_eq!(config.prompts.idea, None);
    }

    #[test]
    fn test_partial_sections() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:3000"

            [timeouts]
            upstream_secs = 10
            request_secs = 15

            [prompts]
            daily = "Summarise my day."
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:3000");
        assert_eq!(config.timeouts.upstream_secs, 10);
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.prompts.daily.as_deref(), Some("Summarise my day."));
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_config("[listener\nbind_address = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_semantic_errors_are_collected() {
        let err = parse_config(
            r#"
            [listener]
            bind_address = "not-an-address"

            [security]
            max_body_size = 0
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/ai-gateway.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
