//! Route matching logic.
//!
//! # Responsibilities
//! - Walk the compiled trie against a request path in a single pass
//! - Capture `:name` segments and the catch-all remainder
//! - Resolve the handler by exact method, then by `All`
//!
//! # Design Decisions
//! - No backtracking: the builder guarantees at most one branch can match
//! - Captures borrow from the trie and the path, nothing is copied
//! - Malformed request paths are not errors, they simply do not match
//! - Path matching is case-sensitive and byte-exact (no decoding)

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::routing::method::HttpMethod;
use crate::routing::trie::{Node, Segment};

/// Captured `:name` variables in the order they were matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params<'r, 'p> {
    entries: Vec<(&'r str, &'p str)>,
}

impl<'r, 'p> Params<'r, 'p> {
    fn push(&mut self, name: &'r str, value: &'p str) {
        self.entries.push((name, value));
    }

    /// Value captured for `name`.
    pub fn get(&self, name: &str) -> Option<&'p str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'r str, &'p str)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Serialized as a JSON-style object, keys in capture order.
impl Serialize for Params<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A resolved route.
#[derive(Debug)]
pub struct RouteMatch<'r, 'p, H> {
    /// Handler registered for the matched pattern.
    pub handler: &'r H,
    /// Captured path variables.
    pub params: Params<'r, 'p>,
    /// Remainder swallowed by a terminal `*`, slashes included.
    pub catch_all: Option<&'p str>,
}

/// Resolve `path` under `method` starting at `root`.
pub(crate) fn find<'r, 'p, H>(
    root: &'r Node<H>,
    method: HttpMethod,
    path: &'p str,
) -> Option<RouteMatch<'r, 'p, H>> {
    let mut node = root;
    let mut offset = 0;
    let mut params = Params::default();

    loop {
        match &node.segment {
            Segment::Wildcard if node.children.is_empty() => {
                if offset >= path.len() {
                    return None;
                }
                return resolve(node, method, params, Some(&path[offset..]));
            }
            Segment::Wildcard => {
                offset = segment_end(path, offset);
                node = &node.children[0].1;
            }
            Segment::Param(name) => {
                let end = segment_end(path, offset);
                params.push(name, &path[offset..end]);
                offset = end;
                if offset == path.len() {
                    return resolve(node, method, params, None);
                }
                node = node.children().next()?;
            }
            Segment::Static(text) => {
                if !path[offset..].starts_with(&**text) {
                    return None;
                }
                offset += text.len();
                if offset == path.len() {
                    return resolve(node, method, params, None);
                }
                node = match node.wild_child() {
                    Some(child) => child,
                    None => node.child(path[offset..].chars().next()?)?,
                };
            }
        }
    }
}

fn resolve<'r, 'p, H>(
    node: &'r Node<H>,
    method: HttpMethod,
    params: Params<'r, 'p>,
    catch_all: Option<&'p str>,
) -> Option<RouteMatch<'r, 'p, H>> {
    let handler = node.handler(method)?;
    Some(RouteMatch {
        handler,
        params,
        catch_all,
    })
}

/// Byte offset of the next `/` at or after `from`, or the end of `path`.
fn segment_end(path: &str, from: usize) -> usize {
    path[from..].find('/').map_or(path.len(), |idx| from + idx)
}
