//! Upstream origin subsystem.
//!
//! # Data Flow
//! ```text
//! Action::Proxy { upstream_url }
//!     → client.rs (single plain GET, no body, no custom headers)
//!     → status + end-to-end headers + streaming body
//!     → back to the pipeline as the base response
//! ```
//!
//! # Design Decisions
//! - One attempt per request: no retries, no fallback
//! - Redirects are not followed; a 3xx is relayed like any other status
//! - The origin request carries only `Host` and reqwest's default
//!   `Accept: */*`; nothing from the inbound request is forwarded
//! - No timeout beyond the HTTP client defaults
//! - Body is streamed chunk by chunk, never buffered

pub mod client;

pub use client::{UpstreamClient, UpstreamError};
