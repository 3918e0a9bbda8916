//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Route URLs are absolute and unique
//! - Upstream URLs are absolute http(s)
//! - Header names/values and methods are valid HTTP tokens
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use thiserror::Error;
use url::Url;

use crate::config::schema::{ActionConfig, RouterConfig};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address {0:?}")]
    BindAddress(String),

    #[error("public scheme must be \"http\" or \"https\", got {0:?}")]
    PublicScheme(String),

    #[error("route url {0:?} is not an absolute URL")]
    RouteUrl(String),

    #[error("route url {0:?} is defined more than once")]
    DuplicateRoute(String),

    #[error("route {url:?} has invalid method {method:?}")]
    Method { url: String, method: String },

    #[error("route {url:?} has invalid status {status}")]
    Status { url: String, status: u16 },

    #[error("route {url:?} has invalid upstream url {upstream:?}")]
    UpstreamUrl { url: String, upstream: String },

    #[error("invalid header name {0:?}")]
    HeaderName(String),

    #[error("header {name:?} has invalid value {value:?}")]
    HeaderValue { name: String, value: String },
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if !matches!(config.listener.public_scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::PublicScheme(config.listener.public_scheme.clone()));
    }

    let mut seen = HashSet::new();
    for route in &config.routes {
        if Url::parse(&route.url).is_err() {
            errors.push(ValidationError::RouteUrl(route.url.clone()));
        }

        if !seen.insert(route.url.as_str()) {
            errors.push(ValidationError::DuplicateRoute(route.url.clone()));
        }

        if let Some(method) = &route.method {
            if Method::from_bytes(method.as_bytes()).is_err() {
                errors.push(ValidationError::Method {
                    url: route.url.clone(),
                    method: method.clone(),
                });
            }
        }

        match &route.action {
            ActionConfig::Synthetic { status, .. } => {
                if StatusCode::from_u16(*status).is_err() {
                    errors.push(ValidationError::Status {
                        url: route.url.clone(),
                        status: *status,
                    });
                }
            }
            ActionConfig::Proxy { upstream_url } => {
                let valid = Url::parse(upstream_url)
                    .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
                    .unwrap_or(false);
                if !valid {
                    errors.push(ValidationError::UpstreamUrl {
                        url: route.url.clone(),
                        upstream: upstream_url.clone(),
                    });
                }
            }
        }
    }

    for header in &config.security.headers {
        if HeaderName::from_bytes(header.name.as_bytes()).is_err() {
            errors.push(ValidationError::HeaderName(header.name.clone()));
        }
        if HeaderValue::from_str(&header.value).is_err() {
            errors.push(ValidationError::HeaderValue {
                name: header.name.clone(),
                value: header.value.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
