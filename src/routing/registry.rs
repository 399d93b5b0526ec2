//! Registration buffer.
//!
//! Registrations are only stored here. Nothing is validated until `build`
//! hands the whole batch to the split builder.

use std::time::Instant;

use crate::routing::builder::build_trie;
use crate::routing::error::BuildResult;
use crate::routing::method::HttpMethod;
use crate::routing::router::Router;

/// One pending `(method, handler, pattern)` triple.
#[derive(Debug)]
pub struct Registration<H> {
    pub(crate) method: HttpMethod,
    pub(crate) handler: H,
    pub(crate) pattern: Box<str>,
}

impl<H> Registration<H> {
    pub(crate) fn new(method: HttpMethod, handler: H, pattern: impl Into<Box<str>>) -> Self {
        Self {
            method,
            handler,
            pattern: pattern.into(),
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Accumulates registrations and compiles them into a [`Router`].
///
/// `build` consumes the builder, so a batch is compiled exactly once.
#[derive(Debug)]
pub struct RouteBuilder<H> {
    pending: Vec<Registration<H>>,
}

impl<H> RouteBuilder<H> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Queue a route. Patterns are checked by [`RouteBuilder::build`].
    pub fn add_route(&mut self, method: HttpMethod, handler: H, pattern: impl Into<String>) {
        let pattern: String = pattern.into();
        self.pending.push(Registration::new(method, handler, pattern));
    }

    /// Number of queued registrations.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn registrations(&self) -> &[Registration<H>] {
        &self.pending
    }

    /// Compile every queued registration into an immutable router.
    pub fn build(self) -> BuildResult<Router<H>> {
        let started = Instant::now();
        let routes = self.pending.len();
        let root = build_trie(self.pending)?;

        tracing::debug!(
            routes,
            nodes = root.node_count(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Route trie built"
        );
        Ok(Router::new(root, routes))
    }
}

impl<H> Default for RouteBuilder<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> FromIterator<(HttpMethod, H, String)> for RouteBuilder<H> {
    fn from_iter<T: IntoIterator<Item = (HttpMethod, H, String)>>(iter: T) -> Self {
        let mut builder = Self::new();
        for (method, handler, pattern) in iter {
            builder.add_route(method, handler, pattern);
        }
        builder
    }
}
