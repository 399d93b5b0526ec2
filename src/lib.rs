//! Radix-trie HTTP request router.
//!
//! Routes are registered up front, compiled into a compressed prefix tree in
//! one batch, then matched against `(method, path)` pairs in a single pass.
//!
//! # Architecture Overview
//!
//! ```text
//!   route table (TOML)                        request
//!          │                                     │
//!          ▼                                     ▼
//!   ┌─────────────┐   ┌─────────────┐    ┌──────────────┐
//!   │   config    │──▶│   routing   │───▶│    http      │──▶ JSON match / 404
//!   │ load/watch  │   │ build trie  │    │ axum + swap  │
//!   └─────────────┘   └─────────────┘    └──────────────┘
//!                            │
//!          ┌─────────────────┴──────────────────┐
//!          │ observability (logs, metrics)       │
//!          │ lifecycle (startup, signals)        │
//!          └────────────────────────────────────┘
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{BuildError, HttpMethod, RouteBuilder, RouteMatch, RouteTable, Router};
