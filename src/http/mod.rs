//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, tracing)
//!     → request.rs (rebuild absolute request URL)
//!     → pipeline.rs (route, execute action, apply header policy)
//!     → response.rs (synthetic bodies, hop-by-hop stripping)
//!     → Send to client
//! ```

pub mod pipeline;
pub mod request;
pub mod response;
pub mod server;

pub use pipeline::Pipeline;
pub use request::{request_url, MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
