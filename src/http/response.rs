//! Response construction and transformation.
//!
//! # Responsibilities
//! - Build synthetic responses (configured routes, not-found)
//! - Build JSON error responses (405, 502)
//! - Strip hop-by-hop headers from relayed upstream responses
//!
//! # Design Decisions
//! - Synthetic responses carry no headers of their own; the header policy
//!   is the only thing that adds headers afterwards
//! - Relayed bodies are never touched here, only headers

use axum::{
    body::Body,
    http::{
        header::{self, HeaderName},
        HeaderMap, HeaderValue, Method, Response, StatusCode,
    },
};
use serde::Serialize;

/// Body of the fallback response for unmatched URLs.
pub const NOT_FOUND_BODY: &str = "Not found";

/// Message of the host's JSON response when the upstream cannot be reached.
pub const BAD_GATEWAY_MESSAGE: &str = "Upstream request failed";

/// Headers that describe a single connection and never cross a proxy.
const HOP_BY_HOP: [HeaderName; 7] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    HeaderName::from_static("proxy-connection"),
    header::TRANSFER_ENCODING,
    header::TE,
    header::TRAILER,
    header::UPGRADE,
];

/// Response with the given status and body and an empty header map.
pub fn synthetic(status: StatusCode, body: impl Into<Body>) -> Response<Body> {
    let mut response = Response::new(body.into());
    *response.status_mut() = status;
    response
}

/// The 404 served when no route matches.
pub fn not_found() -> Response<Body> {
    synthetic(StatusCode::NOT_FOUND, NOT_FOUND_BODY)
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

/// `{"message": ...}` JSON error response.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response<Body> {
    let body = ErrorBody { message: message.into() };
    // Serializing a single string field cannot fail.
    let json = serde_json::to_string(&body).unwrap_or_default();

    let mut response = synthetic(status, json);
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// The 502 the host serves when the upstream fetch fails.
pub fn bad_gateway() -> Response<Body> {
    json_error(StatusCode::BAD_GATEWAY, BAD_GATEWAY_MESSAGE)
}

/// JSON 405 for a route restricted to `allowed`.
pub fn method_not_allowed(allowed: &Method) -> Response<Body> {
    let mut response = json_error(
        StatusCode::METHOD_NOT_ALLOWED,
        format!("This endpoint only supports {} requests", allowed),
    );
    if let Ok(value) = HeaderValue::from_str(allowed.as_str()) {
        response.headers_mut().insert(header::ALLOW, value);
    }
    response
}

/// Remove hop-by-hop headers, including any named in `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in HOP_BY_HOP.iter().chain(listed.iter()) {
        headers.remove(name);
    }
}
