//! Request ID generation and the Axum adapter for the AI endpoint.

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, HeaderValue, Method, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::gateway::InboundRequest;

/// Header carrying the per-call correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates a UUID v4 for calls that arrive without an `x-request-id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// The request ID assigned by the middleware, or `"unknown"`.
pub fn request_id_of(headers: &HeaderMap) -> String {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

/// Axum request adapted to [`InboundRequest`]; the body is streamed only on demand.
pub struct AxumInbound {
    request: Request<Body>,
    body_limit: usize,
}

impl AxumInbound {
    pub fn new(request: Request<Body>, body_limit: usize) -> Self {
        Self {
            request,
            body_limit,
        }
    }
}

impl InboundRequest for AxumInbound {
    fn method(&self) -> &Method {
        self.request.method()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.request.headers().get(name).and_then(|v| v.to_str().ok())
    }

    async fn read_body(self) -> Result<Bytes, String> {
        axum::body::to_bytes(self.request.into_body(), self.body_limit)
            .await
            .map_err(|e| e.to_string())
    }
}
