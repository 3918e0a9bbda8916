//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Base response (synthetic, not-found or relayed upstream)
//!     → headers.rs (stamp the header policy)
//!     → Send to client
//! ```
//!
//! # Design Decisions
//! - Every response leaving the process passes through the policy
//! - Policy is static configuration, compiled once at startup

pub mod headers;

pub use headers::{HeaderPolicy, HeaderPolicyError};
