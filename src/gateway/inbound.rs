//! Transport abstraction for the AI endpoint.
//!
//! The handler only needs the method, a header lookup and, once the earlier
//! checks pass, the body bytes. Each hosting interface implements
//! [`InboundRequest`]; the body is read lazily so rejected calls never touch it.

use axum::body::Bytes;
use axum::http::{HeaderMap, Method};
use std::future::Future;

/// A request as seen by the gateway handler.
pub trait InboundRequest: Send {
    fn method(&self) -> &Method;

    /// Header value by (case-insensitive) name; non-UTF-8 values read as absent.
    fn header(&self, name: &str) -> Option<&str>;

    /// Consume the request and collect its body.
    ///
    /// The error string is reported to the caller as diagnostic detail.
    fn read_body(self) -> impl Future<Output = Result<Bytes, String>> + Send;
}

/// A request whose body is already in memory.
#[derive(Debug, Clone)]
pub struct BufferedRequest {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl BufferedRequest {
    pub fn new(method: Method, body: impl Into<Bytes>) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Add a header, ignoring names or values that are not valid HTTP.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            axum::http::HeaderName::try_from(name),
            axum::http::HeaderValue::try_from(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }
}

impl InboundRequest for BufferedRequest {
    fn method(&self) -> &Method {
        &self.method
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    async fn read_body(self) -> Result<Bytes, String> {
        Ok(self.body)
    }
}
