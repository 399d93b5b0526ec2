//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the compiled trie
//! - Look up the matching route for a method and path
//! - Return the matched route or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Rebuilds produce a fresh `Router`; swapping it in is up to the caller
//! - Explicit `None` rather than a silent default route

use std::fmt;

use serde::Serialize;

use crate::config::RouteConfig;
use crate::routing::error::BuildResult;
use crate::routing::matcher::{self, RouteMatch};
use crate::routing::method::HttpMethod;
use crate::routing::registry::RouteBuilder;
use crate::routing::trie::{Node, Segment};

/// A compiled, read-only route trie.
#[derive(Debug)]
pub struct Router<H> {
    root: Node<H>,
    routes: usize,
}

impl<H> Router<H> {
    pub(crate) fn new(root: Node<H>, routes: usize) -> Self {
        Self { root, routes }
    }

    /// A router with no routes.
    pub fn empty() -> Self {
        Self::new(Node::new(Segment::default()), 0)
    }

    /// Resolve `path` for `method`.
    pub fn lookup<'r, 'p>(&'r self, method: HttpMethod, path: &'p str) -> Option<RouteMatch<'r, 'p, H>> {
        matcher::find(&self.root, method, path)
    }

    pub fn root(&self) -> &Node<H> {
        &self.root
    }

    /// Number of registrations compiled into this router.
    pub fn len(&self) -> usize {
        self.routes
    }

    pub fn is_empty(&self) -> bool {
        self.routes == 0
    }
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<H> fmt::Display for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

/// What a configured route resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteTarget {
    pub name: String,
    pub method: HttpMethod,
    pub pattern: String,
}

impl Router<RouteTarget> {
    /// Compile configured routes.
    pub fn from_config(routes: &[RouteConfig]) -> BuildResult<Self> {
        routes
            .iter()
            .map(|route| {
                let target = RouteTarget {
                    name: route.name.clone(),
                    method: route.method,
                    pattern: route.path.clone(),
                };
                (route.method, target, route.path.clone())
            })
            .collect::<RouteBuilder<_>>()
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::error::BuildError;

    fn route(name: &str, method: HttpMethod, path: &str) -> RouteConfig {
        RouteConfig {
            name: name.into(),
            method,
            path: path.into(),
        }
    }

    #[test]
    fn test_from_config() {
        let router = Router::from_config(&[
            route("list-users", HttpMethod::Get, "/users"),
            route("get-user", HttpMethod::Get, "/users/:id"),
            route("assets", HttpMethod::All, "/assets/*"),
        ])
        .unwrap();
        assert_eq!(router.len(), 3);

        let m = router.lookup(HttpMethod::Get, "/users/42").unwrap();
        assert_eq!(m.handler.name, "get-user");
        assert_eq!(m.handler.pattern, "/users/:id");
        assert_eq!(m.params.get("id"), Some("42"));

        let m = router.lookup(HttpMethod::Head, "/assets/js/app.js").unwrap();
        assert_eq!(m.handler.name, "assets");
        assert_eq!(m.catch_all, Some("js/app.js"));
    }

    #[test]
    fn test_from_config_reports_conflict() {
        let err = Router::from_config(&[
            route("a", HttpMethod::Get, "/aaa/*"),
            route("b", HttpMethod::Get, "/aaa/:pp"),
        ])
        .unwrap_err();
        assert!(matches!(err, BuildError::Conflict { .. }));
    }

    #[test]
    fn test_display_lists_tree() {
        let router = Router::from_config(&[route("a", HttpMethod::Get, "/a/:id")]).unwrap();
        assert_eq!(router.to_string(), "\"/a/\"\n  \":id\" [GET]\n");
    }

    #[test]
    fn test_empty_router() {
        let router: Router<()> = Router::default();
        assert!(router.is_empty());
        assert!(router.lookup(HttpMethod::Get, "/").is_none());
    }
}
