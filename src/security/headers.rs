//! Response header policy.
//!
//! # Responsibilities
//! - Compile the configured header list into typed names/values
//! - Stamp every outgoing response with the policy headers
//!
//! # Design Decisions
//! - Policy headers overwrite any value the base response carried
//! - Applying the policy consumes a response and returns a new one
//! - Applying twice is the same as applying once

use axum::http::{
    header::{CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS},
    HeaderName, HeaderValue, Response,
};
use thiserror::Error;

use crate::config::HeaderConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderPolicyError {
    #[error("invalid header name {0:?}")]
    Name(String),

    #[error("header {0:?} has an invalid value")]
    Value(String),
}

/// Fixed set of headers applied to every response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPolicy {
    headers: Vec<(HeaderName, HeaderValue)>,
}

impl Default for HeaderPolicy {
    /// The four browser-hardening headers.
    fn default() -> Self {
        Self {
            headers: vec![
                (
                    CONTENT_SECURITY_POLICY,
                    HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
                ),
                (X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
                (X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
                (REFERRER_POLICY, HeaderValue::from_static("no-referrer")),
            ],
        }
    }
}

impl HeaderPolicy {
    /// Compile configured headers.
    pub fn from_config(headers: &[HeaderConfig]) -> Result<Self, HeaderPolicyError> {
        let headers = headers
            .iter()
            .map(|h| {
                let name = HeaderName::from_bytes(h.name.as_bytes())
                    .map_err(|_| HeaderPolicyError::Name(h.name.clone()))?;
                let value = HeaderValue::from_str(&h.value)
                    .map_err(|_| HeaderPolicyError::Value(h.name.clone()))?;
                Ok((name, value))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { headers })
    }

    /// Headers in application order.
    pub fn headers(&self) -> &[(HeaderName, HeaderValue)] {
        &self.headers
    }

    /// Return `response` with every policy header set, replacing all
    /// existing values under the same name.
    pub fn apply<B>(&self, response: Response<B>) -> Response<B> {
        let (mut parts, body) = response.into_parts();
        for (name, value) in &self.headers {
            parts.headers.insert(name.clone(), value.clone());
        }
        Response::from_parts(parts, body)
    }
}
