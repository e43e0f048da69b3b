//! Per-request correlation.
//!
//! Every request runs inside a `request` span carrying its correlation id,
//! so handler and store logs need no id field of their own.

use axum::extract::Request;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use rand::Rng;
use tracing::Instrument;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id of one request: the caller's `x-request-id`, or a fresh
/// `ds-` id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Self(s.to_string()))
            .unwrap_or_else(Self::generate)
    }

    pub fn generate() -> Self {
        Self(format!("ds-{:016x}", rand::thread_rng().gen::<u64>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Echo the id on a response. Ids that are not valid header values are skipped.
    pub fn stamp(&self, headers: &mut HeaderMap) {
        if let Ok(value) = HeaderValue::from_str(&self.0) {
            headers.insert(REQUEST_ID_HEADER, value);
        }
    }
}

/// Run the request inside a span tagged with its [`RequestId`] and echo the id.
pub async fn request_context(request: Request, next: Next) -> Response {
    let id = RequestId::from_headers(request.headers());
    let span = tracing::info_span!(
        "request",
        req_id = %id.as_str(),
        method = %request.method(),
        path = %request.uri().path(),
    );

    let mut response = next.run(request).instrument(span).await;
    id.stamp(response.headers_mut());
    response
}
