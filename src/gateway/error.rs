//! Failure taxonomy and the JSON envelopes returned to callers.

use axum::http::StatusCode;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Longest `detail` attached to a body-read failure.
pub const BODY_DETAIL_LIMIT: usize = 200;

/// Longest `detail` attached to an upstream failure.
pub const UPSTREAM_DETAIL_LIMIT: usize = 300;

/// Longest slice of an upstream error body quoted in diagnostics.
pub const UPSTREAM_BODY_LIMIT: usize = 200;

/// Errors raised while calling the completion service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Server configuration error: UPSTREAM_KEY not set")]
    Misconfigured,

    #[error("Request timeout: Upstream API did not respond within {} seconds", .0.as_secs())]
    Timeout(Duration),

    #[error("Upstream API error ({status}): {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid response format from upstream API")]
    BadResponse,

    #[error("Upstream request failed: {0}")]
    Transport(String),
}

impl UpstreamError {
    /// Stable label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Misconfigured => "misconfigured",
            UpstreamError::Timeout(_) => "timeout",
            UpstreamError::HttpStatus { .. } => "http_status",
            UpstreamError::BadResponse => "bad_response",
            UpstreamError::Transport(_) => "transport",
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        UpstreamError::Transport(e.to_string())
    }
}

/// Every way a call to the AI endpoint can end short of a reply.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Method not allowed. Only POST is supported.")]
    MethodNotAllowed,

    #[error("Server configuration error: GATEWAY_API_KEY not set")]
    ServerMisconfigured,

    #[error("Unauthorized: Invalid API key")]
    Unauthorized,

    #[error("Invalid request body")]
    BodyRead(String),

    #[error("Invalid JSON format in request body")]
    MalformedJson,

    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Missing or invalid \"text\" field")]
    MissingText,

    #[error("Missing or invalid \"mode\" field. Must be one of: idea, todo, daily")]
    InvalidMode,

    #[error("Failed to process AI request")]
    Upstream(#[from] UpstreamError),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            GatewayError::Unauthorized => StatusCode::UNAUTHORIZED,
            GatewayError::BodyRead(_)
            | GatewayError::MalformedJson
            | GatewayError::NotAnObject
            | GatewayError::MissingText
            | GatewayError::InvalidMode => StatusCode::BAD_REQUEST,
            GatewayError::ServerMisconfigured | GatewayError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Diagnostic text shown to the caller, already truncated.
    pub fn detail(&self) -> Option<String> {
        match self {
            GatewayError::BodyRead(reason) => Some(truncate_chars(reason, BODY_DETAIL_LIMIT)),
            GatewayError::Upstream(e) => Some(truncate_chars(&e.to_string(), UPSTREAM_DETAIL_LIMIT)),
            _ => None,
        }
    }

    pub fn envelope(&self) -> Envelope {
        Envelope::Error {
            error: self.to_string(),
            detail: self.detail(),
        }
    }
}

/// JSON body returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Reply {
        reply: String,
    },
    Error {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
}

/// Transport-neutral outcome of one call; adapters render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status: StatusCode,
    /// `None` for responses without a body (CORS preflight).
    pub envelope: Option<Envelope>,
}

impl GatewayResponse {
    pub fn reply(reply: String) -> Self {
        Self {
            status: StatusCode::OK,
            envelope: Some(Envelope::Reply { reply }),
        }
    }

    pub fn preflight() -> Self {
        Self {
            status: StatusCode::OK,
            envelope: None,
        }
    }
}

impl From<GatewayError> for GatewayResponse {
    fn from(e: GatewayError) -> Self {
        Self {
            status: e.status(),
            envelope: Some(e.envelope()),
        }
    }
}

/// Keep at most `limit` characters of `s`, never splitting a code point.
pub fn truncate_chars(s: &str, limit: usize) -> String {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
