//! Split builder: compiles a batch of registrations into a trie.
//!
//! # Responsibilities
//! - Partition registrations by shared prefix and diverging character
//! - Emit `:name` and `*` nodes at segment boundaries
//! - Reject conflicting and malformed patterns before any trie is exposed
//!
//! # Design Decisions
//! - Pure recursion from `(group, offset)` to a subtree; no shared build state
//! - The whole batch is known up front, so divergence points are global
//! - Positions count `char`s, so literals never split inside a code point
//!
//! Scanning walks a small state machine per group:
//!
//! ```text
//! START --'/'--> SLASH --':'--> PARAM --'/'--> (emit :name, recurse)
//!                  |----'*'--> WILD  --'/'--> (emit *, recurse)
//!                  '--other--> START
//! ```
//!
//! Divergence inside START or SLASH fans out into children. Divergence inside
//! PARAM or WILD is a conflict.

use std::collections::BTreeMap;

use crate::routing::error::{BuildError, BuildResult};
use crate::routing::registry::Registration;
use crate::routing::trie::{Node, Segment, PARAM_PIVOT, WILDCARD_PIVOT};

const LEADING_CAPTURE: &str = "`:` and `*` must directly follow `/`";
const UNTERMINATED_WILDCARD: &str = "`*` must be followed by `/` or end the pattern";
const WILDCARD_IN_PARAM: &str = "`*` is not allowed inside a parameter name";

/// Compile `registrations` into a trie rooted at the returned node.
pub(crate) fn build_trie<H>(registrations: Vec<Registration<H>>) -> BuildResult<Node<H>> {
    if registrations.is_empty() {
        return Ok(Node::new(Segment::default()));
    }
    let members = registrations.into_iter().map(Member::new).collect();
    split(Group { members, offset: 0 })
}

/// A registration with its pattern pre-split into characters.
struct Member<H> {
    chars: Vec<char>,
    registration: Registration<H>,
}

impl<H> Member<H> {
    fn new(registration: Registration<H>) -> Self {
        Self {
            chars: registration.pattern.chars().collect(),
            registration,
        }
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    fn pattern(&self) -> &str {
        &self.registration.pattern
    }
}

/// Registrations that agree on every character before `offset`.
struct Group<H> {
    members: Vec<Member<H>>,
    offset: usize,
}

impl<H> Group<H> {
    fn min_len(&self) -> usize {
        self.members.iter().map(Member::len).min().unwrap_or(0)
    }

    fn max_len(&self) -> usize {
        self.members.iter().map(Member::len).max().unwrap_or(0)
    }

    fn shortest(&self) -> &str {
        self.members
            .iter()
            .min_by_key(|m| m.len())
            .map_or("", Member::pattern)
    }

    fn longest(&self) -> &str {
        self.members
            .iter()
            .max_by_key(|m| m.len())
            .map_or("", Member::pattern)
    }

    fn first_pattern(&self) -> &str {
        self.members[0].pattern()
    }

    fn char_at(&self, pos: usize) -> char {
        self.members[0].chars[pos]
    }

    fn slice(&self, start: usize, end: usize) -> Box<str> {
        self.members[0].chars[start..end].iter().collect::<String>().into()
    }

    /// Conflict between the first two neighbours that disagree at `pos`.
    fn divergence(&self, pos: usize) -> Option<BuildError> {
        let expected = self.char_at(pos);
        let j = self.members.iter().position(|m| m.chars[pos] != expected)?;
        Some(BuildError::conflict(
            self.members[j - 1].pattern(),
            self.members[j].pattern(),
        ))
    }

    /// True when the character before `at` is `/`.
    fn follows_slash(&self, at: usize) -> bool {
        at > 0 && self.members[0].chars[at - 1] == '/'
    }

    /// True when every member longer than `at` continues with `/`.
    fn overflow_starts_with_slash(&self, at: usize) -> bool {
        self.members
            .iter()
            .all(|m| m.len() <= at || m.chars[at] == '/')
    }

    fn advance(self, offset: usize) -> Self {
        Self {
            members: self.members,
            offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Slash,
    Wild,
    Param,
}

impl State {
    fn can_split(self) -> bool {
        matches!(self, State::Start | State::Slash)
    }

    fn after_slash(c: char) -> Self {
        match c {
            WILDCARD_PIVOT => State::Wild,
            PARAM_PIVOT => State::Param,
            _ => State::Start,
        }
    }
}

fn split<H>(group: Group<H>) -> BuildResult<Node<H>> {
    let offset = group.offset;
    let min_len = group.min_len();
    // a group opened right after `/` may begin with a capture
    let mut state = if group.follows_slash(offset) {
        State::Slash
    } else {
        State::Start
    };
    // where the current state was entered
    let mut mark = offset;
    let mut cursor = offset;

    while cursor < min_len {
        if let Some(conflict) = group.divergence(cursor) {
            if state.can_split() {
                return fan_out(group, cursor);
            }
            return Err(conflict);
        }

        let c = group.char_at(cursor);
        match state {
            State::Start => {
                if is_capture(c) {
                    return Err(BuildError::malformed(
                        group.first_pattern(),
                        cursor,
                        LEADING_CAPTURE,
                    ));
                }
                if c == '/' {
                    mark = cursor;
                    state = State::Slash;
                }
            }
            State::Slash => {
                mark = cursor;
                state = State::after_slash(c);
            }
            State::Wild => {
                if c != '/' {
                    return Err(BuildError::malformed(
                        group.first_pattern(),
                        cursor,
                        UNTERMINATED_WILDCARD,
                    ));
                }
                let prefix = group.slice(offset, mark);
                let rest = split(group.advance(cursor))?;
                let wildcard = Node::new(Segment::Wildcard).with_child(rest);
                return Ok(anchor(prefix, wildcard));
            }
            State::Param => {
                if c == WILDCARD_PIVOT {
                    return Err(BuildError::malformed(
                        group.first_pattern(),
                        cursor,
                        WILDCARD_IN_PARAM,
                    ));
                }
                if c == '/' {
                    let prefix = group.slice(offset, mark);
                    let name = group.slice(mark + 1, cursor);
                    let rest = split(group.advance(cursor))?;
                    let param = Node::new(Segment::Param(name)).with_child(rest);
                    return Ok(anchor(prefix, param));
                }
            }
        }
        cursor += 1;
    }

    if min_len != group.max_len() {
        if state.can_split() {
            return fan_out(group, cursor);
        }
        if state == State::Param && group.overflow_starts_with_slash(min_len) {
            // the short patterns end on the param node, the rest continue below it
            let prefix = group.slice(offset, mark);
            let name = group.slice(mark + 1, cursor);
            let param = branch(Segment::Param(name), group.members, cursor)?;
            return Ok(anchor(prefix, param));
        }
        return Err(BuildError::conflict(group.shortest(), group.longest()));
    }

    match state {
        State::Start | State::Slash => {
            let mut node = Node::new(Segment::Static(group.slice(offset, cursor)));
            attach(&mut node, group.members);
            Ok(node)
        }
        State::Wild => {
            let prefix = group.slice(offset, mark);
            let mut catch_all = Node::new(Segment::Wildcard);
            attach(&mut catch_all, group.members);
            Ok(anchor(prefix, catch_all))
        }
        State::Param => {
            let prefix = group.slice(offset, mark);
            let mut param = Node::new(Segment::Param(group.slice(mark + 1, cursor)));
            attach(&mut param, group.members);
            Ok(anchor(prefix, param))
        }
    }
}

/// Close the literal run `offset..cursor` and branch below it.
fn fan_out<H>(group: Group<H>, cursor: usize) -> BuildResult<Node<H>> {
    let segment = Segment::Static(group.slice(group.offset, cursor));
    branch(segment, group.members, cursor)
}

/// Node holding `segment` whose handlers come from members ending at
/// `cursor`, with one child per distinct character at `cursor` for the rest.
fn branch<H>(segment: Segment, members: Vec<Member<H>>, cursor: usize) -> BuildResult<Node<H>> {
    let (ended, rest): (Vec<_>, Vec<_>) = members.into_iter().partition(|m| m.len() == cursor);

    let mut groups: BTreeMap<char, Vec<Member<H>>> = BTreeMap::new();
    for member in rest {
        groups.entry(member.chars[cursor]).or_default().push(member);
    }
    if let Some(err) = misplaced_capture(&groups, cursor) {
        return Err(err);
    }
    if let Some(conflict) = capture_conflict(&groups) {
        return Err(conflict);
    }

    let mut node = Node::new(segment);
    attach(&mut node, ended);
    for (_, members) in groups {
        let child = split(Group {
            members,
            offset: cursor,
        })?;
        node = node.with_child(child);
    }
    Ok(node)
}

/// A `:` or `*` pivot that does not open a segment.
fn misplaced_capture<H>(groups: &BTreeMap<char, Vec<Member<H>>>, cursor: usize) -> Option<BuildError> {
    groups
        .iter()
        .filter(|(pivot, _)| is_capture(**pivot))
        .map(|(_, members)| &members[0])
        .find(|member| cursor == 0 || member.chars[cursor - 1] != '/')
        .map(|member| BuildError::malformed(member.pattern(), cursor, LEADING_CAPTURE))
}

/// A `:` or `*` pivot must be the only pivot of its parent.
///
/// Patterns that end on the parent itself do not count; the parent keeps
/// their handlers and still leads into the capture.
fn capture_conflict<H>(groups: &BTreeMap<char, Vec<Member<H>>>) -> Option<BuildError> {
    let capture = groups
        .iter()
        .find(|(pivot, _)| is_capture(**pivot))
        .map(|(_, members)| members[0].pattern())?;
    let other = groups
        .iter()
        .map(|(_, members)| members[0].pattern())
        .find(|pattern| *pattern != capture)?;
    Some(BuildError::conflict(capture, other))
}

fn is_capture(pivot: char) -> bool {
    pivot == PARAM_PIVOT || pivot == WILDCARD_PIVOT
}

/// Hang `capture` below the literal `prefix`, or return it bare when the
/// group opened on the capture itself.
fn anchor<H>(prefix: Box<str>, capture: Node<H>) -> Node<H> {
    if prefix.is_empty() {
        capture
    } else {
        Node::new(Segment::Static(prefix)).with_child(capture)
    }
}

fn attach<H>(node: &mut Node<H>, members: Vec<Member<H>>) {
    for member in members {
        let Registration {
            method,
            handler,
            pattern,
        } = member.registration;
        if node.insert_handler(method, handler).is_some() {
            tracing::warn!(
                method = %method,
                pattern = %pattern,
                "Duplicate route registration, keeping the last one"
            );
        }
    }
}
