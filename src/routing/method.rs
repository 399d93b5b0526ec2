//! HTTP method tokens understood by the router.
//!
//! # Design Decisions
//! - A closed set of methods plus `All`, the per-node fallback
//! - Parsing is ASCII case-insensitive so config files can say `get`
//! - Extension methods have no token; the host treats them as not-found

use std::fmt;
use std::str::FromStr;

use axum::http::Method;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Method a route is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
    Connect,
    /// Fallback used when a node has no handler for the exact method.
    All,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::All => "ALL",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a method token is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown HTTP method `{0}`")]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [HttpMethod; 10] = [
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Patch,
            HttpMethod::Delete,
            HttpMethod::Head,
            HttpMethod::Options,
            HttpMethod::Trace,
            HttpMethod::Connect,
            HttpMethod::All,
        ];
        ALL.into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = UnknownMethod;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}

impl TryFrom<&Method> for HttpMethod {
    type Error = UnknownMethod;

    fn try_from(method: &Method) -> Result<Self, Self::Error> {
        let known = [
            (Method::GET, HttpMethod::Get),
            (Method::POST, HttpMethod::Post),
            (Method::PUT, HttpMethod::Put),
            (Method::PATCH, HttpMethod::Patch),
            (Method::DELETE, HttpMethod::Delete),
            (Method::HEAD, HttpMethod::Head),
            (Method::OPTIONS, HttpMethod::Options),
            (Method::TRACE, HttpMethod::Trace),
            (Method::CONNECT, HttpMethod::Connect),
        ];
        known
            .into_iter()
            .find(|(m, _)| m == method)
            .map(|(_, token)| token)
            .ok_or_else(|| UnknownMethod(method.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("GET".parse::<HttpMethod>(), Ok(HttpMethod::Get));
        assert_eq!("delete".parse::<HttpMethod>(), Ok(HttpMethod::Delete));
        assert_eq!("All".parse::<HttpMethod>(), Ok(HttpMethod::All));
        assert_eq!(
            "BREW".parse::<HttpMethod>(),
            Err(UnknownMethod("BREW".to_string()))
        );
    }

    #[test]
    fn test_from_http_method() {
        assert_eq!(HttpMethod::try_from(&Method::PATCH), Ok(HttpMethod::Patch));
        let purge = Method::from_bytes(b"PURGE").unwrap();
        assert!(HttpMethod::try_from(&purge).is_err());
    }

    #[test]
    fn test_serde_uses_uppercase_token() {
        let json = serde_json::to_string(&HttpMethod::Options).unwrap();
        assert_eq!(json, "\"OPTIONS\"");
        let parsed: HttpMethod = serde_json::from_str("\"post\"").unwrap();
        assert_eq!(parsed, HttpMethod::Post);
    }
}
