//! Request-id propagation middleware.
//!
//! Extracts a client-supplied `x-request-id` header when it is well formed,
//! generates a UUID otherwise, stores the id in request extensions for
//! handlers, and echoes it on the response.

use axum::extract::Request;
use axum::http::header::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;

const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Maximum length accepted for client-provided request ids.
const MAX_REQUEST_ID_LENGTH: usize = 128;

/// Extension carrying the request id for the current request.
#[derive(Debug, Clone)]
pub struct RequestIdExtension(pub String);

/// Client-provided ids must be short and free of anything that could be
/// used for log injection; otherwise a fresh UUID is used instead.
fn validate_request_id(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= MAX_REQUEST_ID_LENGTH
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| validate_request_id(s))
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestIdExtension(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    response
}
