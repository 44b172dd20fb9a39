//! Request logging middleware for the stand-in license server.
//!
//! Each request runs inside a span keyed by a fresh UUID. The completion
//! event carries the status, the duration and, for license checks, the
//! [`CheckDecision`] the handler reached. Failed checks log at `warn`. The id
//! is echoed back in the `x-request-id` response header.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderValue, Response},
    middleware::Next,
};
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::server::handlers::CheckDecision;

/// Header name for the request ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generate a new unique request ID.
pub fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

pub async fn request_logging_middleware(request: Request, next: Next) -> Response<Body> {
    let request_id = generate_request_id();
    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    let start = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    let duration_ms = start.elapsed().as_millis() as u64;

    let status = response.status().as_u16();
    let _enter = span.enter();
    match response.extensions().get::<CheckDecision>() {
        Some(CheckDecision::Valid) => {
            info!(status, duration_ms, decision = "valid", "License check served");
        }
        Some(decision) => {
            warn!(status, duration_ms, decision = %decision, "License check rejected");
        }
        None => info!(status, duration_ms, "Request completed"),
    }

    let (mut parts, body) = response.into_parts();
    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        parts.headers.insert(REQUEST_ID_HEADER, header_value);
    }

    Response::from_parts(parts, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_is_valid_uuid() {
        let id = generate_request_id();
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(generate_request_id(), generate_request_id());
    }
}
