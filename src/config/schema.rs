//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Base URL the default route table is keyed on.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Upstream resource served by the default latest-version route.
pub const DEFAULT_UPSTREAM_URL: &str = "https://origin.example.com/latest.json";

/// Root configuration for the edge router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Listener configuration (bind address, public scheme).
    pub listener: ListenerConfig,

    /// Route definitions mapping exact URLs to actions.
    pub routes: Vec<RouteConfig>,

    /// Response header policy.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            routes: default_routes(DEFAULT_BASE_URL, DEFAULT_UPSTREAM_URL),
            security: SecurityConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// The standard route table: latest-version proxy, ping and root.
pub fn default_routes(base_url: &str, upstream_url: &str) -> Vec<RouteConfig> {
    let base = base_url.trim_end_matches('/');
    vec![
        RouteConfig {
            url: format!("{}/v1/latest", base),
            method: None,
            action: ActionConfig::Proxy {
                upstream_url: upstream_url.to_string(),
            },
        },
        RouteConfig {
            url: format!("{}/ping", base),
            method: None,
            action: ActionConfig::Synthetic {
                status: 200,
                body: "pong".to_string(),
            },
        },
        RouteConfig {
            url: format!("{}/", base),
            method: None,
            action: ActionConfig::Synthetic {
                status: 200,
                body: String::new(),
            },
        },
    ]
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Scheme assumed for origin-form requests that carry no
    /// `X-Forwarded-Proto` header.
    pub public_scheme: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            public_scheme: "http".to_string(),
        }
    }
}

/// A single exact-URL route.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Absolute URL matched byte-for-byte against the request URL.
    pub url: String,

    /// Restrict the route to one HTTP method. Unset means any method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// What to do when the route matches.
    pub action: ActionConfig,
}

/// Action to execute for a matched route.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionConfig {
    /// Answer locally.
    Synthetic {
        status: u16,
        #[serde(default)]
        body: String,
    },
    /// Fetch and relay a fixed upstream resource.
    Proxy { upstream_url: String },
}

/// Response header policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Headers set on every outgoing response, overwriting existing values.
    pub headers: Vec<HeaderConfig>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        let headers = [
            ("Content-Security-Policy", "default-src 'none'; frame-ancestors 'none'"),
            ("X-Frame-Options", "DENY"),
            ("X-Content-Type-Options", "nosniff"),
            ("Referrer-Policy", "no-referrer"),
        ];

        Self {
            headers: headers
                .iter()
                .map(|(name, value)| HeaderConfig {
                    name: name.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }
}

/// A single response header.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HeaderConfig {
    pub name: String,
    pub value: String,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, for development.
    #[default]
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
