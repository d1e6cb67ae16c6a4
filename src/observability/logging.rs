//! Structured logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_directives(log_level: &str) -> String {
    format!("ai_gateway={log_level},tower_http={log_level}")
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directives(log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
