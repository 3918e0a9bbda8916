//! Request handling.
//!
//! # Responsibilities
//! - Reconstruct the absolute URL a request was addressed to
//! - Generate unique request IDs for tracing
//!
//! # Design Decisions
//! - The URL is rebuilt, never normalized: path and query pass through as
//!   received so routing stays byte-exact
//! - Request IDs are attached to the request only, never echoed on the
//!   response

use axum::http::{header, HeaderName, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Request ID header name.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Scheme reported by a TLS-terminating front end.
pub const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

/// Absolute URL of `req` as `scheme://authority/path?query`.
///
/// Absolute-form request targets are used as-is. For origin-form targets
/// the scheme comes from `X-Forwarded-Proto` (first hop) or
/// `default_scheme`, and the authority from the `Host` header.
pub fn request_url<B>(req: &Request<B>, default_scheme: &str) -> String {
    let uri = req.uri();
    if let (Some(scheme), Some(authority)) = (uri.scheme_str(), uri.authority()) {
        let path = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");
        return format!("{}://{}{}", scheme, authority, path);
    }

    let scheme = req
        .headers()
        .get(X_FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default_scheme);

    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    let path = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");

    format!("{}://{}{}", scheme, host, path)
}

/// Request ID of `req`, or `"unknown"` when none was assigned.
pub fn request_id<B>(req: &Request<B>) -> &str {
    req.headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        Uuid::new_v4()
            .to_string()
            .parse()
            .ok()
            .map(RequestId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(uri: &str) -> axum::http::request::Builder {
        Request::builder().uri(uri)
    }

    #[test]
    fn test_origin_form_uses_host_and_default_scheme() {
        let r = req("/ping").header("Host", "updates.example.com").body(()).unwrap();
        assert_eq!(request_url(&r, "https"), "https://updates.example.com/ping");
    }

    #[test]
    fn test_forwarded_proto_overrides_default() {
        let r = req("/ping")
            .header("Host", "updates.example.com")
            .header("X-Forwarded-Proto", "https, http")
            .body(())
            .unwrap();
        assert_eq!(request_url(&r, "http"), "https://updates.example.com/ping");
    }

    #[test]
    fn test_absolute_form_used_verbatim() {
        let r = req("http://127.0.0.1:8080/v1/latest?x=1")
            .header("Host", "ignored.example.com")
            .body(())
            .unwrap();
        assert_eq!(request_url(&r, "https"), "http://127.0.0.1:8080/v1/latest?x=1");
    }

    #[test]
    fn test_query_and_trailing_slash_preserved() {
        let r = req("/ping/?a=b").header("Host", "Updates.Example.com").body(()).unwrap();
        assert_eq!(request_url(&r, "http"), "http://Updates.Example.com/ping/?a=b");
    }

    #[test]
    fn test_request_id_generation() {
        let r = req("/").body(()).unwrap();
        let id = MakeRequestUuid.make_request_id(&r).unwrap();
        let id = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(request_id(&r), "unknown");
    }
}
