//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request URL (absolute, unnormalized)
//!     → router.rs (exact lookup)
//!     → Return: matched Action, or Action::NotFound
//!
//! Route Compilation (at startup):
//!     RouteConfig[]
//!     → Validate (done by config::validation)
//!     → Compile into exact-match map, keeping declaration order
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Byte-exact matching: no prefix, pattern, case or slash folding
//! - Method-insensitive unless a route opts in to a single method
//! - Lookup is total: unmatched URLs map to NotFound

pub mod action;
pub mod router;

pub use action::Action;
pub use router::{Route, RouteTable, RouteTableError};
