//! AI note gateway server.
//!
//! ```text
//! client ──POST /api/ai──▶ http (axum + tower-http: request id, trace, limits)
//!                              │
//!                              ▼
//!                          gateway::Gateway: auth → validate → upstream ──▶ {base}/chat/completions
//!                              │
//! client ◀──{reply}────────────┘
//! ```
//!
//! Secrets come from the environment (`GATEWAY_API_KEY`, `UPSTREAM_KEY`,
//! `UPSTREAM_BASE`, `MODEL`); server settings from an optional TOML file.

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use ai_gateway::config::{load_config, GatewayConfig, SettingsSource};
use ai_gateway::lifecycle::{signals, Shutdown};
use ai_gateway::observability::{logging, metrics};
use ai_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "ai-gateway")]
#[command(about = "HTTP gateway that turns short notes into AI replies", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_tracing(&config.observability.log_level);

    tracing::info!("ai-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        max_body_size = config.security.max_body_size,
        "Configuration loaded"
    );

    if std::env::var_os("GATEWAY_API_KEY").is_none() {
        tracing::warn!("GATEWAY_API_KEY is not set; every AI call will fail until it is");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config, SettingsSource::Environment)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
