//! Edge request router library.
//!
//! Routes each request by its exact absolute URL to a synthetic response,
//! a relayed upstream resource, or a 404, then stamps the response with a
//! fixed security-header policy.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;
pub mod upstream;

pub use config::RouterConfig;
pub use http::{HttpServer, Pipeline};
pub use lifecycle::Shutdown;
pub use routing::{Action, RouteTable};
pub use security::HeaderPolicy;
