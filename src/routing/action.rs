//! Route actions.

use axum::http::StatusCode;

/// The unit of work executed for a routed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Answer locally with a fixed status and body.
    Synthetic { status: StatusCode, body: String },
    /// Fetch `upstream_url` and relay the response.
    Proxy { upstream_url: String },
    /// No route matched.
    NotFound,
}

impl Action {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Synthetic { .. } => "synthetic",
            Action::Proxy { .. } => "proxy",
            Action::NotFound => "not_found",
        }
    }
}
