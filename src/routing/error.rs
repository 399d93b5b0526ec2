//! Build-time errors.
//!
//! Matching never fails with an error; an unroutable request is just `None`.

use thiserror::Error;

/// Errors raised while compiling registrations into a trie.
///
/// Any error aborts the whole build. No partial trie is ever exposed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Two patterns cannot share the same trie position.
    #[error("route `{first}` conflicts with `{second}`")]
    Conflict { first: String, second: String },

    /// A pattern is invalid on its own.
    #[error("malformed route `{pattern}` at position {position}: {reason}")]
    Malformed {
        pattern: String,
        position: usize,
        reason: &'static str,
    },

    /// `build` was called on a table that already holds a trie.
    #[error("route table is already built; reset it before building again")]
    AlreadyBuilt,
}

impl BuildError {
    pub(crate) fn conflict(first: &str, second: &str) -> Self {
        BuildError::Conflict {
            first: first.to_string(),
            second: second.to_string(),
        }
    }

    pub(crate) fn malformed(pattern: &str, position: usize, reason: &'static str) -> Self {
        BuildError::Malformed {
            pattern: pattern.to_string(),
            position,
            reason,
        }
    }

    /// Patterns named by the error, if any.
    pub fn patterns(&self) -> Vec<&str> {
        match self {
            BuildError::Conflict { first, second } => vec![first.as_str(), second.as_str()],
            BuildError::Malformed { pattern, .. } => vec![pattern.as_str()],
            BuildError::AlreadyBuilt => Vec::new(),
        }
    }
}

/// Result type for router builds.
pub type BuildResult<T> = Result<T, BuildError>;
