// crates/fitgn-messages/src/node.rs
// ============================================================================
// Module: Message Tree Model
// Description: Tagged-union message nodes, groups, and per-locale tables.
// Purpose: Give lookups a closed, pattern-matchable shape instead of dynamic objects.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A message table is a tree of [`MessageNode`] values: leaves hold final
//! text, groups hold further nodes keyed by name. The top level of a
//! [`MessageTable`] is keyed by namespace (for example `"Home"`).
//!
//! ## Invariants
//! - Keys are unique within a group; iteration order is lexicographic.
//! - Lookups never mutate a table. Only loaders call the insertion helpers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::translator::Translator;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while building a message tree.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageTreeError {
    /// A dotted path would have to descend through an existing leaf, or
    /// would replace an existing group with a leaf.
    #[error("message path conflict at {path}")]
    PathConflict {
        /// Dotted path prefix where the conflict was detected.
        path: String,
    },
}

// ============================================================================
// SECTION: Nodes
// ============================================================================

/// A single node of a message tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageNode {
    /// Final message text.
    Leaf(String),
    /// Nested messages keyed by name.
    Group(MessageGroup),
}

impl MessageNode {
    /// Returns the leaf text when this node is a leaf.
    #[must_use]
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Self::Leaf(text) => Some(text),
            Self::Group(_) => None,
        }
    }

    /// Returns the group when this node is a group.
    #[must_use]
    pub const fn as_group(&self) -> Option<&MessageGroup> {
        match self {
            Self::Leaf(_) => None,
            Self::Group(group) => Some(group),
        }
    }
}

impl From<&str> for MessageNode {
    fn from(text: &str) -> Self {
        Self::Leaf(text.to_string())
    }
}

impl From<String> for MessageNode {
    fn from(text: String) -> Self {
        Self::Leaf(text)
    }
}

impl From<MessageGroup> for MessageNode {
    fn from(group: MessageGroup) -> Self {
        Self::Group(group)
    }
}

/// A mapping from key to child node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageGroup {
    /// Child nodes keyed by name.
    entries: BTreeMap<String, MessageNode>,
}

impl MessageGroup {
    /// Creates an empty group.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the child stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MessageNode> {
        self.entries.get(key)
    }

    /// Inserts a child node, returning the node previously stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<MessageNode>) -> Option<MessageNode> {
        self.entries.insert(key.into(), node.into())
    }

    /// Inserts `text` at a dotted path, creating intermediate groups.
    ///
    /// An existing leaf at the final segment is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`MessageTreeError::PathConflict`] when an intermediate segment
    /// is a leaf or the final segment already holds a group.
    pub fn insert_path(
        &mut self,
        dotted: &str,
        text: impl Into<String>,
    ) -> Result<(), MessageTreeError> {
        let mut segments = dotted.split('.').peekable();
        let mut group = self;
        let mut consumed = 0usize;
        while let Some(segment) = segments.next() {
            consumed += segment.len();
            let prefix = &dotted[.. consumed];
            consumed += 1;
            if segments.peek().is_none() {
                if matches!(group.entries.get(segment), Some(MessageNode::Group(_))) {
                    return Err(MessageTreeError::PathConflict {
                        path: prefix.to_string(),
                    });
                }
                group.entries.insert(segment.to_string(), MessageNode::Leaf(text.into()));
                return Ok(());
            }
            let child = group
                .entries
                .entry(segment.to_string())
                .or_insert_with(|| MessageNode::Group(Self::new()));
            group = match child {
                MessageNode::Group(child) => child,
                MessageNode::Leaf(_) => {
                    return Err(MessageTreeError::PathConflict {
                        path: prefix.to_string(),
                    });
                }
            };
        }
        Ok(())
    }

    /// Returns the number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the group has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates direct children in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, MessageNode> {
        self.entries.iter()
    }

    /// Returns every leaf below this group keyed by its dotted path.
    #[must_use]
    pub fn leaf_paths(&self) -> BTreeMap<String, &str> {
        let mut leaves = BTreeMap::new();
        let mut stack: Vec<(String, &Self)> = vec![(String::new(), self)];
        while let Some((prefix, group)) = stack.pop() {
            for (key, node) in &group.entries {
                let path = if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
                match node {
                    MessageNode::Leaf(text) => {
                        leaves.insert(path, text.as_str());
                    }
                    MessageNode::Group(child) => stack.push((path, child)),
                }
            }
        }
        leaves
    }
}

impl<'a> IntoIterator for &'a MessageGroup {
    type Item = (&'a String, &'a MessageNode);
    type IntoIter = btree_map::Iter<'a, String, MessageNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<MessageNode>> FromIterator<(K, V)> for MessageGroup {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(key, node)| (key.into(), node.into())).collect(),
        }
    }
}

// ============================================================================
// SECTION: Table
// ============================================================================

/// Per-locale message table keyed by namespace.
///
/// # Invariants
/// - The table is read-only for the duration of any lookup borrowing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageTable {
    /// Root group keyed by namespace name.
    root: MessageGroup,
}

impl MessageTable {
    /// Wraps a root group as a table.
    #[must_use]
    pub const fn new(root: MessageGroup) -> Self {
        Self {
            root,
        }
    }

    /// Returns the root group.
    #[must_use]
    pub const fn root(&self) -> &MessageGroup {
        &self.root
    }

    /// Returns the namespace group, or `None` when absent or stored as a leaf.
    #[must_use]
    pub fn namespace(&self, name: &str) -> Option<&MessageGroup> {
        self.root.get(name).and_then(MessageNode::as_group)
    }

    /// Iterates the names of namespaces that hold groups.
    pub fn namespace_names(&self) -> impl Iterator<Item = &str> {
        self.root
            .iter()
            .filter(|(_, node)| node.as_group().is_some())
            .map(|(name, _)| name.as_str())
    }

    /// Returns a translator bound to `namespace` in this table.
    #[must_use]
    pub fn translator<'a>(&'a self, namespace: &'a str) -> Translator<'a> {
        Translator::new(self, namespace)
    }
}

impl From<MessageGroup> for MessageTable {
    fn from(root: MessageGroup) -> Self {
        Self::new(root)
    }
}
