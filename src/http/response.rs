//! Response bodies for routed requests.
//!
//! Shared by the server and the CLI so both print the same JSON.

use serde::Serialize;

use crate::routing::{HttpMethod, Params, RouteMatch, RouteTarget};

/// Body returned for a matched route.
#[derive(Debug, Serialize)]
pub struct MatchBody<'a> {
    pub route: &'a str,
    pub method: HttpMethod,
    pub pattern: &'a str,
    pub params: Params<'a, 'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catch_all: Option<&'a str>,
}

impl<'a> From<RouteMatch<'a, 'a, RouteTarget>> for MatchBody<'a> {
    fn from(found: RouteMatch<'a, 'a, RouteTarget>) -> Self {
        Self {
            route: &found.handler.name,
            method: found.handler.method,
            pattern: &found.handler.pattern,
            params: found.params,
            catch_all: found.catch_all,
        }
    }
}

/// Body returned when no route matches.
#[derive(Debug, Serialize)]
pub struct NotFoundBody<'a> {
    pub error: &'static str,
    pub method: &'a str,
    pub path: &'a str,
}

impl<'a> NotFoundBody<'a> {
    pub fn new(method: &'a str, path: &'a str) -> Self {
        Self {
            error: "no matching route",
            method,
            path,
        }
    }
}
