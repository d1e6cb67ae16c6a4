//! Configuration validation.
//!
//! Serde handles syntax; this checks value ranges and addresses.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a parsed configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("timeouts.request_secs ({request}) must exceed timeouts.upstream_secs ({upstream})")]
    RequestTimeoutTooShort { request: u64, upstream: u64 },

    #[error("prompts.{0} must not be empty")]
    EmptyPrompt(&'static str),
}

/// Check every rule and return all violations at once.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let timeouts = &config.timeouts;
    if timeouts.upstream_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.upstream_secs"));
    }
    if timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    } else if timeouts.request_secs <= timeouts.upstream_secs {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request: timeouts.request_secs,
            upstream: timeouts.upstream_secs,
        });
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    let prompts = [
        ("idea", &config.prompts.idea),
        ("todo", &config.prompts.todo),
        ("daily", &config.prompts.daily),
    ];
    for (name, prompt) in prompts {
        if matches!(prompt, Some(p) if p.trim().is_empty()) {
            errors.push(ValidationError::EmptyPrompt(name));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
