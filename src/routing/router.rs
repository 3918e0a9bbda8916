//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up the route for an exact request URL
//! - Fall back to NotFound when nothing matches
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) lookup via HashMap into the ordered route list
//! - Routes keep their declaration order for logging and introspection

use std::collections::HashMap;

use axum::http::{Method, StatusCode};
use thiserror::Error;

use crate::config::{ActionConfig, RouteConfig};
use crate::routing::action::Action;

static NOT_FOUND: Action = Action::NotFound;

/// Error compiling a route table from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("route url {0:?} is defined more than once")]
    Duplicate(String),

    #[error("route {url:?} has invalid status {status}")]
    Status { url: String, status: u16 },

    #[error("route {url:?} has invalid method {method:?}")]
    Method { url: String, method: String },
}

/// A single compiled route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Exact URL this route answers.
    pub url: String,
    /// Only method accepted, if restricted.
    pub method: Option<Method>,
    pub action: Action,
}

/// Ordered, exact-match mapping from request URL to action.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    index: HashMap<String, usize>,
}

impl RouteTable {
    /// Build a table from compiled routes. Keys must be unique.
    pub fn new(routes: Vec<Route>) -> Result<Self, RouteTableError> {
        let mut index = HashMap::with_capacity(routes.len());
        for (i, route) in routes.iter().enumerate() {
            if index.insert(route.url.clone(), i).is_some() {
                return Err(RouteTableError::Duplicate(route.url.clone()));
            }
        }
        Ok(Self { routes, index })
    }

    /// Compile route configuration.
    pub fn from_config(configs: &[RouteConfig]) -> Result<Self, RouteTableError> {
        let routes = configs
            .iter()
            .map(compile_route)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(routes)
    }

    /// Find the route whose URL equals `url` byte-for-byte.
    pub fn lookup(&self, url: &str) -> Option<&Route> {
        self.index.get(url).map(|&i| &self.routes[i])
    }

    /// Map a request URL to its action. Never fails.
    pub fn route(&self, url: &str) -> &Action {
        self.lookup(url).map(|r| &r.action).unwrap_or(&NOT_FOUND)
    }

    /// Routes in declaration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn compile_route(config: &RouteConfig) -> Result<Route, RouteTableError> {
    let method = config
        .method
        .as_deref()
        .map(|m| {
            Method::from_bytes(m.as_bytes()).map_err(|_| RouteTableError::Method {
                url: config.url.clone(),
                method: m.to_string(),
            })
        })
        .transpose()?;

    let action = match &config.action {
        ActionConfig::Synthetic { status, body } => Action::Synthetic {
            status: StatusCode::from_u16(*status).map_err(|_| RouteTableError::Status {
                url: config.url.clone(),
                status: *status,
            })?,
            body: body.clone(),
        },
        ActionConfig::Proxy { upstream_url } => Action::Proxy {
            upstream_url: upstream_url.clone(),
        },
    };

    Ok(Route {
        url: config.url.clone(),
        method,
        action,
    })
}
