//! Trie node definitions.
//!
//! # Responsibilities
//! - Hold one path fragment per node (literal, `:name` or `*`)
//! - Own children keyed by their pivot character
//! - Hold the per-method handler table of a terminal node
//!
//! # Design Decisions
//! - Children are `(pivot, node)` pairs sorted by pivot, never parallel arrays
//! - A `:` or `*` pivot is always the only child of its parent
//! - Nodes are created by the builder and never mutated afterwards

use std::collections::HashMap;
use std::fmt;

use crate::routing::method::HttpMethod;

/// Pivot used for a parameter child.
pub const PARAM_PIVOT: char = ':';
/// Pivot used for a wildcard child.
pub const WILDCARD_PIVOT: char = '*';

/// Path fragment contributed by a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text matched verbatim.
    Static(Box<str>),
    /// `:name`, captures one path segment.
    Param(Box<str>),
    /// `*`, one segment when it has a child, the rest of the path otherwise.
    Wildcard,
}

impl Segment {
    /// Character a parent uses to select this node.
    ///
    /// `None` only for an empty static segment, which the builder produces
    /// for the root alone.
    pub fn pivot(&self) -> Option<char> {
        match self {
            Segment::Static(text) => text.chars().next(),
            Segment::Param(_) => Some(PARAM_PIVOT),
            Segment::Wildcard => Some(WILDCARD_PIVOT),
        }
    }
}

impl Default for Segment {
    fn default() -> Self {
        Segment::Static(Box::from(""))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Static(text) => f.write_str(text),
            Segment::Param(name) => write!(f, ":{}", name),
            Segment::Wildcard => f.write_str("*"),
        }
    }
}

/// A node of the compiled trie.
#[derive(Debug)]
pub struct Node<H> {
    pub(crate) segment: Segment,
    pub(crate) children: Vec<(char, Node<H>)>,
    pub(crate) handlers: Option<HashMap<HttpMethod, H>>,
}

impl<H> Node<H> {
    pub(crate) fn new(segment: Segment) -> Self {
        Self {
            segment,
            children: Vec::new(),
            handlers: None,
        }
    }

    /// Append `child` under the pivot its segment starts with.
    ///
    /// Children must be appended in pivot order. A child whose segment has no
    /// pivot (an empty literal) is not attached.
    pub(crate) fn with_child(mut self, child: Node<H>) -> Self {
        if let Some(pivot) = child.segment.pivot() {
            self.children.push((pivot, child));
        }
        self
    }

    /// Attach a handler; returns the one it replaced, if any.
    pub(crate) fn insert_handler(&mut self, method: HttpMethod, handler: H) -> Option<H> {
        self.handlers
            .get_or_insert_with(HashMap::new)
            .insert(method, handler)
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Pivots in child order.
    pub fn pivots(&self) -> Vec<char> {
        self.children.iter().map(|(pivot, _)| *pivot).collect()
    }

    pub fn children(&self) -> impl Iterator<Item = &Node<H>> {
        self.children.iter().map(|(_, child)| child)
    }

    /// Child selected by `pivot`.
    pub fn child(&self, pivot: char) -> Option<&Node<H>> {
        self.children
            .binary_search_by(|(p, _)| p.cmp(&pivot))
            .ok()
            .map(|idx| &self.children[idx].1)
    }

    /// The sole `:` or `*` child, if this node leads into a capture.
    pub fn wild_child(&self) -> Option<&Node<H>> {
        match self.children.as_slice() {
            [(pivot, child)] if *pivot == PARAM_PIVOT || *pivot == WILDCARD_PIVOT => Some(child),
            _ => None,
        }
    }

    /// Handler for `method`, falling back to an `All` registration.
    pub fn handler(&self, method: HttpMethod) -> Option<&H> {
        let handlers = self.handlers.as_ref()?;
        handlers
            .get(&method)
            .or_else(|| handlers.get(&HttpMethod::All))
    }

    /// Methods registered directly on this node, sorted.
    pub fn methods(&self) -> Vec<HttpMethod> {
        let mut methods: Vec<HttpMethod> = self
            .handlers
            .iter()
            .flat_map(|handlers| handlers.keys().copied())
            .collect();
        methods.sort();
        methods
    }

    /// A terminal wildcard that swallows the rest of the path.
    pub fn is_catch_all(&self) -> bool {
        self.segment == Segment::Wildcard && self.children.is_empty()
    }

    /// Number of nodes in this subtree, this one included.
    pub fn node_count(&self) -> usize {
        1 + self.children().map(Node::node_count).sum::<usize>()
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        write!(f, "{:indent$}{:?}", "", self.segment.to_string(), indent = depth * 2)?;
        let methods = self.methods();
        if !methods.is_empty() {
            let names: Vec<&str> = methods.iter().map(HttpMethod::as_str).collect();
            write!(f, " [{}]", names.join(", "))?;
        }
        writeln!(f)?;
        for child in self.children() {
            child.write_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

impl<H> fmt::Display for Node<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}
