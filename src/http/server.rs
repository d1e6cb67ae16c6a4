//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router (`/api/ai`, `/api/test`, JSON 404 fallback)
//! - Wire up middleware (request ID, tracing, timeout, CORS)
//!
//! The body size limit is applied by the AI handler when it reads the body,
//! after method and key checks, so oversized calls still get a JSON envelope.
//! - Adapt Axum requests onto the transport-neutral gateway handler
//! - Serve on a listener until shutdown is signalled

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{GatewayConfig, SettingsSource};
use crate::gateway::{CompletionClient, Gateway, PromptTable, UpstreamClient};
use crate::health::health_handler;
use crate::http::request::{request_id_of, AxumInbound, MakeRequestUuid};
use crate::http::response::{cors_headers, not_found};
use crate::lifecycle::shutdown;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
    pub max_body_size: usize,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server that forwards notes to the configured upstream.
    pub fn new(config: GatewayConfig, settings: SettingsSource) -> Result<Self, reqwest::Error> {
        let prompts = Arc::new(PromptTable::from_config(&config.prompts));
        let upstream = UpstreamClient::new(prompts)?
            .with_timeout(Duration::from_secs(config.timeouts.upstream_secs));

        Ok(Self::with_completions(config, settings, Arc::new(upstream)))
    }

    /// Create a server around any completion client.
    pub fn with_completions(
        config: GatewayConfig,
        settings: SettingsSource,
        completions: Arc<dyn CompletionClient>,
    ) -> Self {
        let state = AppState {
            gateway: Gateway::new(settings, completions),
            max_body_size: config.security.max_body_size,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let [allow_origin, allow_methods, allow_headers] = cors_headers();
        let cors = ServiceBuilder::new()
            .layer(allow_origin)
            .layer(allow_methods)
            .layer(allow_headers);

        Router::new()
            .route("/api/ai", any(ai_handler).layer(cors))
            .route("/api/test", any(health_handler))
            .fallback(not_found)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id_of(request.headers()),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for embedding in another server.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown receiver fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            upstream_timeout_secs = self.config.timeouts.upstream_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// AI endpoint: adapt the Axum request and hand it to the gateway.
async fn ai_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id_of(request.headers());

    let inbound = AxumInbound::new(request, state.max_body_size);
    let outcome = state.gateway.handle(inbound, &request_id).await;

    metrics::record_request("ai", outcome.status.as_u16(), start_time);
    outcome.into_response()
}
