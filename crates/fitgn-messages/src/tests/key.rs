// crates/fitgn-messages/src/tests/key.rs
// ============================================================================
// Module: Key Resolver Tests
// Description: Unit tests for dotted key walking and miss classification.
// Purpose: Ensure resolution stops at the first failing segment.
// Dependencies: fitgn-messages key module
// ============================================================================

//! ## Overview
//! Verifies leaf resolution, the visible key fallback, and the reported
//! miss reason and depth for each failure shape.

use crate::key::KeyMiss;
use crate::key::KeyPath;
use crate::key::MissReason;
use crate::key::Resolution;
use crate::key::resolve_key;
use crate::key::resolve_or_key;
use crate::node::MessageGroup;

fn home() -> MessageGroup {
    let mut group = MessageGroup::new();
    group.insert_path("hero.title", "Train smarter").unwrap();
    group.insert_path("hero.cta.label", "Start now").unwrap();
    group.insert_path("footer", "All rights reserved").unwrap();
    group
}

#[test]
fn key_path_splits_on_dots() {
    assert_eq!(KeyPath::parse("hero.title").segments(), &["hero", "title"]);
    assert_eq!(KeyPath::parse("").segments(), &[""]);
    assert_eq!(KeyPath::parse("a..b").segments(), &["a", "", "b"]);
    assert_eq!(KeyPath::parse("hero.title").as_str(), "hero.title");
}

#[test]
fn resolves_existing_leaves() {
    let group = home();
    assert_eq!(resolve_key(&group, "hero.title"), Resolution::Found("Train smarter"));
    assert_eq!(resolve_key(&group, "hero.cta.label"), Resolution::Found("Start now"));
    assert_eq!(resolve_key(&group, "footer"), Resolution::Found("All rights reserved"));
}

#[test]
fn missing_segment_reports_depth() {
    let group = home();
    assert_eq!(
        resolve_key(&group, "hero.missing.label"),
        Resolution::Missing(KeyMiss {
            depth: 1,
            segment: "missing",
            reason: MissReason::SegmentNotFound,
        })
    );
}

#[test]
fn path_through_leaf_is_a_miss() {
    let group = home();
    assert_eq!(
        resolve_key(&group, "footer.extra"),
        Resolution::Missing(KeyMiss {
            depth: 0,
            segment: "footer",
            reason: MissReason::PathThroughLeaf,
        })
    );
}

#[test]
fn path_ending_at_group_is_a_miss() {
    let group = home();
    assert_eq!(
        resolve_key(&group, "hero.cta"),
        Resolution::Missing(KeyMiss {
            depth: 1,
            segment: "cta",
            reason: MissReason::EndsAtGroup,
        })
    );
    assert_eq!(resolve_or_key(&group, "hero"), "hero");
}

#[test]
fn empty_key_falls_back_to_itself() {
    let group = home();
    assert_eq!(resolve_or_key(&group, ""), "");
    assert!(resolve_key(&group, "").leaf().is_none());
}

#[test]
fn trailing_dot_does_not_match_leaf() {
    let group = home();
    assert_eq!(resolve_or_key(&group, "footer."), "footer.");
}

#[test]
fn fallback_is_idempotent() {
    let group = home();
    let first = resolve_or_key(&group, "nope.key");
    let second = resolve_or_key(&group, first);
    assert_eq!(first, "nope.key");
    assert_eq!(second, first);
}

#[test]
fn miss_reason_labels_are_stable() {
    assert_eq!(MissReason::SegmentNotFound.as_str(), "segment_not_found");
    assert_eq!(MissReason::PathThroughLeaf.as_str(), "path_through_leaf");
    assert_eq!(MissReason::EndsAtGroup.as_str(), "ends_at_group");
}
