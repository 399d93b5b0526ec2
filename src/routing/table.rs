//! Stateful route table: register, build once, look up, reset.

use crate::routing::error::{BuildError, BuildResult};
use crate::routing::matcher::RouteMatch;
use crate::routing::method::HttpMethod;
use crate::routing::registry::RouteBuilder;
use crate::routing::router::Router;

/// Registration window plus the trie it compiles into.
///
/// Building is single-threaded and must finish before lookups start. To
/// rebuild while serving, build a fresh [`Router`] and publish it atomically
/// instead of resetting a shared table.
#[derive(Debug)]
pub struct RouteTable<H> {
    pending: RouteBuilder<H>,
    router: Option<Router<H>>,
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self {
            pending: RouteBuilder::new(),
            router: None,
        }
    }

    /// Queue a route for the next build.
    ///
    /// Once built, the table ignores new registrations until [`RouteTable::reset`].
    pub fn add_route(&mut self, method: HttpMethod, handler: H, pattern: impl Into<String>) {
        let pattern: String = pattern.into();
        if self.router.is_some() {
            tracing::warn!(
                method = %method,
                pattern = %pattern,
                "Route registered after build was ignored"
            );
            return;
        }
        self.pending.add_route(method, handler, pattern);
    }

    /// Compile the queued routes.
    ///
    /// The queue is consumed even when the build fails.
    pub fn build(&mut self) -> BuildResult<()> {
        if self.router.is_some() {
            return Err(BuildError::AlreadyBuilt);
        }
        let pending = std::mem::take(&mut self.pending);
        self.router = Some(pending.build()?);
        Ok(())
    }

    pub fn lookup<'r, 'p>(&'r self, method: HttpMethod, path: &'p str) -> Option<RouteMatch<'r, 'p, H>> {
        self.router.as_ref()?.lookup(method, path)
    }

    /// Drop the trie and every pending registration.
    pub fn reset(&mut self) {
        self.pending = RouteBuilder::new();
        self.router = None;
    }

    pub fn is_built(&self) -> bool {
        self.router.is_some()
    }

    pub fn router(&self) -> Option<&Router<H>> {
        self.router.as_ref()
    }
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_before_build_is_not_found() {
        let mut table = RouteTable::new();
        table.add_route(HttpMethod::Get, 1, "/a");
        assert!(table.lookup(HttpMethod::Get, "/a").is_none());

        table.build().unwrap();
        assert_eq!(table.lookup(HttpMethod::Get, "/a").map(|m| *m.handler), Some(1));
    }

    #[test]
    fn test_second_build_is_rejected() {
        let mut table = RouteTable::new();
        table.add_route(HttpMethod::Get, 1, "/a");
        table.build().unwrap();

        assert_eq!(table.build(), Err(BuildError::AlreadyBuilt));
        assert!(table.lookup(HttpMethod::Get, "/a").is_some());
    }

    #[test]
    fn test_add_after_build_is_ignored() {
        let mut table = RouteTable::new();
        table.add_route(HttpMethod::Get, 1, "/a");
        table.build().unwrap();
        table.add_route(HttpMethod::Get, 2, "/b");

        assert!(table.lookup(HttpMethod::Get, "/b").is_none());
        assert_eq!(table.router().map(Router::len), Some(1));
    }

    #[test]
    fn test_failed_build_leaves_table_unbuilt() {
        let mut table = RouteTable::new();
        table.add_route(HttpMethod::Get, 1, "/aaa/*");
        table.add_route(HttpMethod::Get, 2, "/aaa/:pp");
        assert!(matches!(table.build(), Err(BuildError::Conflict { .. })));
        assert!(!table.is_built());

        table.add_route(HttpMethod::Get, 3, "/ok");
        table.build().unwrap();
        assert_eq!(table.lookup(HttpMethod::Get, "/ok").map(|m| *m.handler), Some(3));
        assert!(table.lookup(HttpMethod::Get, "/aaa/x").is_none());
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut table = RouteTable::new();
        table.add_route(HttpMethod::Get, 1, "/old/:id");
        table.build().unwrap();

        table.reset();
        assert!(!table.is_built());
        assert!(table.lookup(HttpMethod::Get, "/old/1").is_none());

        table.add_route(HttpMethod::Post, 2, "/new");
        table.build().unwrap();
        assert!(table.lookup(HttpMethod::Get, "/old/1").is_none());
        assert_eq!(table.lookup(HttpMethod::Post, "/new").map(|m| *m.handler), Some(2));
    }
}
