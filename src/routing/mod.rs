//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup or reload):
//!     (method, handler, pattern)[]
//!     → registry.rs (buffer registrations)
//!     → builder.rs (split by prefix, detect conflicts)
//!     → trie.rs (frozen nodes)
//!     → router.rs (immutable Router)
//!
//! Incoming Request (method, path)
//!     → router.rs (route lookup)
//!     → matcher.rs (single-pass trie walk)
//!     → Return: handler + captured params, or no match
//! ```
//!
//! # Pattern Syntax
//! - literal text, matched verbatim
//! - `:name` captures one path segment
//! - `*` skips one segment when more pattern follows, otherwise it
//!   captures the rest of the path, slashes included
//!
//! # Design Decisions
//! - Routes compiled in one batch, immutable at runtime
//! - No regex, no priorities: at most one route can match a request
//! - Conflicting patterns fail the whole build

pub mod builder;
pub mod error;
pub mod matcher;
pub mod method;
pub mod registry;
pub mod router;
pub mod table;
pub mod trie;

pub use error::{BuildError, BuildResult};
pub use matcher::{Params, RouteMatch};
pub use method::{HttpMethod, UnknownMethod};
pub use registry::{Registration, RouteBuilder};
pub use router::{RouteTarget, Router};
pub use table::RouteTable;
pub use trie::{Node, Segment};
