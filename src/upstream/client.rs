//! HTTP client for the upstream origin.

use axum::{
    body::Body,
    http::Response,
};
use thiserror::Error;

use crate::http::response::strip_hop_by_hop;

/// Failure to obtain a response from the upstream.
///
/// Non-success statuses are not errors; they are relayed as received.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build upstream client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Shared, cheaply cloneable upstream client.
///
/// Redirects are never followed: a 3xx from the origin is relayed to the
/// client like any other status.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
}

impl UpstreamClient {
    pub fn new() -> Result<Self, UpstreamError> {
        Self::with_builder(reqwest::Client::builder())
    }

    /// Build from a customized builder (TLS roots, proxies). The redirect
    /// policy is always overridden to `none`.
    pub fn with_builder(builder: reqwest::ClientBuilder) -> Result<Self, UpstreamError> {
        let client = builder
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(UpstreamError::Client)?;
        Ok(Self { client })
    }

    /// Issue one GET to `url` and relay the response.
    ///
    /// Status and end-to-end headers are copied verbatim; the body is
    /// forwarded as a stream.
    pub async fn fetch(&self, url: &str) -> Result<Response<Body>, UpstreamError> {
        let upstream = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| UpstreamError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = upstream.status();
        let mut headers = upstream.headers().clone();
        strip_hop_by_hop(&mut headers);

        tracing::debug!(
            upstream_url = %url,
            status = %status,
            content_length = ?upstream.content_length(),
            "Upstream responded"
        );

        let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}
