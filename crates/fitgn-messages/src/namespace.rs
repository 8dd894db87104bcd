// crates/fitgn-messages/src/namespace.rs
// ============================================================================
// Module: Namespace Selector
// Description: Extracts a top-level namespace subtree from a message table.
// Purpose: Degrade absent namespaces to an empty group instead of failing.
// Dependencies: crate::node
// ============================================================================

//! ## Overview
//! Namespaces group messages per UI section. Selection never fails: an
//! absent namespace, or one stored as a leaf, yields a shared empty group so
//! every key inside it later resolves to the visible key fallback.

use crate::node::MessageGroup;
use crate::node::MessageTable;

/// Shared empty group returned for absent namespaces.
static EMPTY_GROUP: MessageGroup = MessageGroup::new();

/// Returns the group stored at `namespace`, or an empty group.
#[must_use]
pub fn select_namespace<'a>(table: &'a MessageTable, namespace: &str) -> &'a MessageGroup {
    table.namespace(namespace).unwrap_or(&EMPTY_GROUP)
}
