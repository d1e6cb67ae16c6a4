//! Rendering gateway outcomes as HTTP responses.

use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::gateway::GatewayResponse;

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        match self.envelope {
            Some(envelope) => (self.status, Json(envelope)).into_response(),
            None => self.status.into_response(),
        }
    }
}

/// CORS headers attached to every AI endpoint response, preflight included.
pub fn cors_headers() -> [SetResponseHeaderLayer<HeaderValue>; 3] {
    let set = |name: HeaderName, value: &'static str| {
        SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
    };

    [
        set(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        set(header::ACCESS_CONTROL_ALLOW_METHODS, "POST"),
        set(header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, x-api-key"),
    ]
}

/// Fallback for unrouted paths.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}
