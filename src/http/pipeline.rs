//! Request dispatch and response rewriting.
//!
//! # Responsibilities
//! - Route the request URL to an action
//! - Execute the action into a base response
//! - Apply the header policy to the base response
//!
//! # Design Decisions
//! - Stateless: everything here is read-only after construction
//! - Upstream failures are returned, not translated; the host decides
//!   what the client sees

use axum::{
    body::Body,
    http::{Request, Response},
};

use crate::config::{ConfigError, RouterConfig};
use crate::http::request::request_url;
use crate::http::response;
use crate::routing::{Action, RouteTable};
use crate::security::HeaderPolicy;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Routes requests and produces final responses.
#[derive(Debug, Clone)]
pub struct Pipeline {
    table: RouteTable,
    policy: HeaderPolicy,
    upstream: UpstreamClient,
    default_scheme: String,
}

impl Pipeline {
    pub fn new(
        table: RouteTable,
        policy: HeaderPolicy,
        upstream: UpstreamClient,
        default_scheme: impl Into<String>,
    ) -> Self {
        Self {
            table,
            policy,
            upstream,
            default_scheme: default_scheme.into(),
        }
    }

    /// Compile a pipeline from validated configuration.
    pub fn from_config(config: &RouterConfig, upstream: UpstreamClient) -> Result<Self, ConfigError> {
        let table = RouteTable::from_config(&config.routes)?;
        let policy = HeaderPolicy::from_config(&config.security.headers)?;

        Ok(Self::new(table, policy, upstream, config.listener.public_scheme.clone()))
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn policy(&self) -> &HeaderPolicy {
        &self.policy
    }

    /// Handle one request end to end.
    pub async fn handle<B>(&self, req: &Request<B>) -> Result<Response<Body>, UpstreamError> {
        let url = request_url(req, &self.default_scheme);

        if let Some(allowed) = self.table.lookup(&url).and_then(|r| r.method.as_ref()) {
            if req.method() != allowed {
                tracing::debug!(
                    url = %url,
                    method = %req.method(),
                    allowed = %allowed,
                    "Method not allowed"
                );
                return Ok(self.policy.apply(response::method_not_allowed(allowed)));
            }
        }

        let action = self.table.route(&url);
        tracing::debug!(url = %url, action = action.kind(), "Routed request");

        let base = self.execute(action).await?;
        Ok(self.policy.apply(base))
    }

    /// Produce the base response for an action.
    pub async fn execute(&self, action: &Action) -> Result<Response<Body>, UpstreamError> {
        match action {
            Action::Synthetic { status, body } => Ok(response::synthetic(*status, body.clone())),
            Action::Proxy { upstream_url } => self.upstream.fetch(upstream_url).await,
            Action::NotFound => Ok(response::not_found()),
        }
    }
}
