// crates/fitgn-messages/src/key.rs
// ============================================================================
// Module: Key Resolver
// Description: Dotted key paths and leaf resolution inside a namespace group.
// Purpose: Walk message groups without partial matching or autovivification.
// Dependencies: serde, crate::node
// ============================================================================

//! ## Overview
//! A dotted key such as `hero.title` is split into a [`KeyPath`] and walked
//! one segment at a time. Resolution succeeds only when the final segment
//! lands on a leaf. Any other outcome is a [`KeyMiss`], and callers render the
//! original key instead (the visible fallback policy).
//!
//! ## Invariants
//! - Splitting always yields at least one segment (`""` becomes `[""]`).
//! - The first failing segment ends the walk.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::node::MessageGroup;
use crate::node::MessageNode;

// ============================================================================
// SECTION: Key Path
// ============================================================================

/// A dotted key split into its segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath<'k> {
    /// Original dotted key.
    key: &'k str,
    /// Segments in walk order.
    segments: Vec<&'k str>,
}

impl<'k> KeyPath<'k> {
    /// Splits a dotted key into segments.
    #[must_use]
    pub fn parse(key: &'k str) -> Self {
        Self {
            key,
            segments: key.split('.').collect(),
        }
    }

    /// Returns the original dotted key.
    #[must_use]
    pub const fn as_str(&self) -> &'k str {
        self.key
    }

    /// Returns the path segments.
    #[must_use]
    pub fn segments(&self) -> &[&'k str] {
        &self.segments
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Why a key failed to resolve.
///
/// # Invariants
/// - Variants are stable for audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissReason {
    /// The segment is not a key of the current group.
    SegmentNotFound,
    /// The segment resolved to a leaf but more segments followed.
    PathThroughLeaf,
    /// The full path resolved to a group rather than a leaf.
    EndsAtGroup,
}

impl MissReason {
    /// Returns a stable label for the reason.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SegmentNotFound => "segment_not_found",
            Self::PathThroughLeaf => "path_through_leaf",
            Self::EndsAtGroup => "ends_at_group",
        }
    }
}

/// Details of a failed key resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMiss<'k> {
    /// Zero-based index of the segment where the walk stopped.
    pub depth: usize,
    /// The segment where the walk stopped.
    pub segment: &'k str,
    /// Why the walk stopped.
    pub reason: MissReason,
}

/// Outcome of walking a key path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a, 'k> {
    /// The path ended on a leaf.
    Found(&'a str),
    /// The path did not end on a leaf.
    Missing(KeyMiss<'k>),
}

impl<'a> Resolution<'a, '_> {
    /// Returns the leaf text, if any.
    #[must_use]
    pub const fn leaf(&self) -> Option<&'a str> {
        match self {
            Self::Found(text) => Some(*text),
            Self::Missing(_) => None,
        }
    }

    /// Returns the leaf text, or `key` unchanged when resolution failed.
    #[must_use]
    pub fn text_or_key<'r>(&self, key: &'r str) -> &'r str
    where
        'a: 'r,
    {
        match self {
            Self::Found(text) => *text,
            Self::Missing(_) => key,
        }
    }
}

/// Walks `key` inside `group`.
#[must_use]
pub fn resolve_key<'a, 'k>(group: &'a MessageGroup, key: &'k str) -> Resolution<'a, 'k> {
    let path = KeyPath::parse(key);
    let last = path.segments().len().saturating_sub(1);
    let mut current = group;
    for (depth, segment) in path.segments().iter().copied().enumerate() {
        let miss = |reason| {
            Resolution::Missing(KeyMiss {
                depth,
                segment,
                reason,
            })
        };
        let Some(node) = current.get(segment) else {
            return miss(MissReason::SegmentNotFound);
        };
        match (node, depth == last) {
            (MessageNode::Leaf(text), true) => return Resolution::Found(text),
            (MessageNode::Leaf(_), false) => return miss(MissReason::PathThroughLeaf),
            (MessageNode::Group(_), true) => return miss(MissReason::EndsAtGroup),
            (MessageNode::Group(child), false) => current = child,
        }
    }
    // Unreachable in practice: split always yields at least one segment.
    Resolution::Missing(KeyMiss {
        depth: 0,
        segment: key,
        reason: MissReason::SegmentNotFound,
    })
}

/// Resolves `key` inside `group`, falling back to the key itself.
#[must_use]
pub fn resolve_or_key<'r>(group: &'r MessageGroup, key: &'r str) -> &'r str {
    resolve_key(group, key).text_or_key(key)
}
