//! Request orchestration for the AI endpoint.
//!
//! ```text
//! method check → auth → body read + validation → upstream completion → envelope
//! ```
//!
//! Each step either proceeds or ends the call with an error envelope.

use axum::http::Method;
use std::sync::Arc;

use crate::config::env::SettingsSource;
use crate::gateway::error::{GatewayError, GatewayResponse};
use crate::gateway::inbound::InboundRequest;
use crate::gateway::upstream::CompletionClient;
use crate::gateway::validate::{check_auth, parse_note, API_KEY_HEADER};
use crate::observability::metrics;

/// Transport-independent handler shared by every adapter.
#[derive(Clone)]
pub struct Gateway {
    settings: SettingsSource,
    completions: Arc<dyn CompletionClient>,
}

impl Gateway {
    pub fn new(settings: SettingsSource, completions: Arc<dyn CompletionClient>) -> Self {
        Self {
            settings,
            completions,
        }
    }

    /// Run one call through the pipeline.
    pub async fn handle<R: InboundRequest>(&self, request: R, request_id: &str) -> GatewayResponse {
        if *request.method() == Method::OPTIONS {
            return GatewayResponse::preflight();
        }

        match self.process(request, request_id).await {
            Ok(reply) => GatewayResponse::reply(reply),
            Err(e) => GatewayResponse::from(e),
        }
    }

    async fn process<R: InboundRequest>(&self, request: R, request_id: &str) -> Result<String, GatewayError> {
        if *request.method() != Method::POST {
            tracing::debug!(request_id = %request_id, method = %request.method(), "Rejected non-POST call");
            return Err(GatewayError::MethodNotAllowed);
        }

        let settings = self.settings.load();

        if let Err(e) = check_auth(request.header(API_KEY_HEADER), settings.gateway_key.as_deref()) {
            match &e {
                GatewayError::ServerMisconfigured => {
                    tracing::error!(request_id = %request_id, "GATEWAY_API_KEY is not configured")
                }
                _ => tracing::warn!(request_id = %request_id, "Rejected call with invalid API key"),
            }
            return Err(e);
        }

        let raw = request.read_body().await.map_err(|reason| {
            tracing::warn!(request_id = %request_id, error = %reason, "Failed to read request body");
            GatewayError::BodyRead(reason)
        })?;

        let note = parse_note(&raw).inspect_err(|e| {
            tracing::info!(request_id = %request_id, error = %e, "Rejected invalid note");
        })?;

        tracing::debug!(
            request_id = %request_id,
            mode = %note.mode,
            chars = note.text.chars().count(),
            "Forwarding note upstream"
        );

        let reply = self
            .completions
            .complete(&note.text, note.mode, &settings.upstream)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    request_id = %request_id,
                    mode = %note.mode,
                    kind = e.kind(),
                    error = %e,
                    "Upstream completion failed"
                );
                metrics::record_upstream_failure(e.kind());
            })?;

        tracing::info!(
            request_id = %request_id,
            mode = %note.mode,
            reply_chars = reply.chars().count(),
            "Completed note"
        );

        Ok(reply)
    }
}
