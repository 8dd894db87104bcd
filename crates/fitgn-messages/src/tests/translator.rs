// crates/fitgn-messages/src/tests/translator.rs
// ============================================================================
// Module: Translator Tests
// Description: Unit tests for the lookup API and audit reporting.
// Purpose: Ensure every degradation is silent for callers but visible in audit.
// Dependencies: fitgn-messages translator and audit modules
// ============================================================================

//! ## Overview
//! Exercises plain, interpolated, and rich lookups through a [`Translator`]
//! and asserts the audit events each degradation produces.

use std::sync::Mutex;

use crate::audit::MessageAuditEvent;
use crate::audit::MessageAuditSink;
use crate::audit::MessageEventKind;
use crate::interpolate::ParameterMap;
use crate::node::MessageGroup;
use crate::node::MessageTable;
use crate::rich::ComponentMap;
use crate::rich::Segment;
use crate::translator::Translator;
use crate::translator::resolve;
use crate::translator::resolve_rich;
use crate::translator::resolve_with;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Audit sink capturing events in memory.
#[derive(Default)]
struct RecordingSink {
    /// Captured events in arrival order.
    events: Mutex<Vec<MessageAuditEvent>>,
}

impl RecordingSink {
    fn kinds(&self) -> Vec<(MessageEventKind, Option<String>)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|event| (event.kind, event.detail.clone()))
            .collect()
    }
}

impl MessageAuditSink for RecordingSink {
    fn record(&self, event: &MessageAuditEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

fn table() -> MessageTable {
    let mut root = MessageGroup::new();
    root.insert_path("Home.hero.title", "Train smarter").unwrap();
    root.insert_path("Home.hero.greeting", "Hi {name}, welcome to {place}").unwrap();
    root.insert_path("Home.hero.body", "Read the <link>guide</link> or <x>skip</x>.").unwrap();
    root.insert_path("Home.footer.copyright", "© {year} FitGN").unwrap();
    root.insert_path("Home.broken", "Open <b>never closed").unwrap();
    MessageTable::new(root)
}

// ============================================================================
// SECTION: Lookup API
// ============================================================================

#[test]
fn resolve_returns_leaf_text() {
    let table = table();
    let t = table.translator("Home");
    assert_eq!(t.resolve("hero.title"), "Train smarter");
}

#[test]
fn resolve_returns_key_for_missing_or_group_paths() {
    let table = table();
    let t = table.translator("Home");
    assert_eq!(t.resolve("hero.subtitle"), "hero.subtitle");
    assert_eq!(t.resolve("hero"), "hero");
    assert_eq!(t.resolve(""), "");
}

#[test]
fn resolve_does_not_interpolate_without_params() {
    let table = table();
    assert_eq!(resolve(&table, "Home", "hero.greeting"), "Hi {name}, welcome to {place}");
}

#[test]
fn resolve_with_substitutes_and_keeps_missing() {
    let table = table();
    let params = ParameterMap::new().with("name", "Sam");
    assert_eq!(
        resolve_with(&table, "Home", "hero.greeting", &params),
        "Hi Sam, welcome to {place}"
    );
}

#[test]
fn resolve_with_never_interpolates_the_key() {
    let table = table();
    let params = ParameterMap::new().with("name", "Sam");
    assert_eq!(resolve_with(&table, "Home", "missing.{name}", &params), "missing.{name}");
}

#[test]
fn resolve_rich_renders_registered_tags() {
    let table = table();
    let components = ComponentMap::new().with("link", |content: &str| format!("[{content}]"));
    assert_eq!(
        resolve_rich(&table, "Home", "hero.body", &components),
        vec![
            Segment::Text("Read the ".to_string()),
            Segment::Node("[guide]".to_string()),
            Segment::Text(" or <x>skip</x>.".to_string()),
        ]
    );
}

#[test]
fn resolve_rich_missing_key_is_single_text_segment() {
    let table = table();
    let components = ComponentMap::<String>::new();
    assert_eq!(
        resolve_rich(&table, "Home", "hero.nope", &components),
        vec![Segment::Text("hero.nope".to_string())]
    );
    assert_eq!(resolve_rich(&table, "Home", "", &components), vec![Segment::Text(String::new())]);
}

#[test]
fn missing_namespace_degrades_every_key() {
    let table = table();
    let t = Translator::new(&table, "Pricing");
    assert_eq!(t.resolve("hero.title"), "hero.title");
    assert!(t.group().is_empty());
}

#[test]
fn in_namespace_keeps_locale() {
    let table = table();
    let t = Translator::new(&table, "Pricing").with_locale("nl");
    let home = t.in_namespace("Home");
    assert_eq!(home.namespace(), "Home");
    assert_eq!(home.locale(), Some("nl"));
    assert_eq!(home.resolve("hero.title"), "Train smarter");
}

#[test]
fn t_macro_formats_named_arguments() {
    let table = table();
    let t = table.translator("Home");
    let year = 2026;
    assert_eq!(crate::t!(t, "footer.copyright", year = year), "© 2026 FitGN");
    assert_eq!(crate::t!(t, "hero.title"), "Train smarter");
    assert_eq!(crate::t!(t, "hero.greeting", name = "Ada", place = "FitGN",), "Hi Ada, welcome to FitGN");
}

// ============================================================================
// SECTION: Audit Reporting
// ============================================================================

#[test]
fn successful_lookups_emit_no_events() {
    let table = table();
    let sink = RecordingSink::default();
    let t = table.translator("Home").with_audit(&sink);
    let _ = t.resolve("hero.title");
    let _ = t.resolve_with("hero.greeting", &ParameterMap::new().with("name", "a").with("place", "b"));
    assert!(sink.kinds().is_empty());
}

#[test]
fn missing_key_reports_reason() {
    let table = table();
    let sink = RecordingSink::default();
    let t = table.translator("Home").with_locale("en").with_audit(&sink);
    let _ = t.resolve("hero");
    let events = sink.events.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, MessageEventKind::MissingKey);
    assert_eq!(events[0].locale.as_deref(), Some("en"));
    assert_eq!(events[0].namespace, "Home");
    assert_eq!(events[0].key, "hero");
    assert_eq!(events[0].detail.as_deref(), Some("ends_at_group at segment 0 (hero)"));
}

#[test]
fn missing_namespace_reports_namespace_kind() {
    let table = table();
    let sink = RecordingSink::default();
    let t = Translator::new(&table, "Pricing").with_audit(&sink);
    let _ = t.resolve("plan.title");
    assert_eq!(sink.kinds(), vec![(MessageEventKind::MissingNamespace, None)]);
}

#[test]
fn unresolved_placeholders_are_reported() {
    let table = table();
    let sink = RecordingSink::default();
    let t = table.translator("Home").with_audit(&sink);
    let _ = t.resolve_with("hero.greeting", &ParameterMap::new().with("name", "Sam"));
    assert_eq!(
        sink.kinds(),
        vec![(MessageEventKind::UnresolvedPlaceholder, Some("place".to_string()))]
    );
}

#[test]
fn unknown_and_unclosed_tags_are_reported() {
    let table = table();
    let sink = RecordingSink::default();
    let t = table.translator("Home").with_audit(&sink);
    let components = ComponentMap::new().with("link", str::to_string);
    let _ = t.resolve_rich("hero.body", &components);
    let segments = t.resolve_rich("broken", &components);
    assert_eq!(segments, vec![Segment::Text("Open <b>never closed".to_string())]);
    assert_eq!(
        sink.kinds(),
        vec![
            (MessageEventKind::UnknownTag, Some("x".to_string())),
            (MessageEventKind::UnclosedTag, Some("b".to_string())),
        ]
    );
}

#[test]
fn audit_event_serializes_snake_case_kind() {
    let table = table();
    let sink = RecordingSink::default();
    let _ = table.translator("Home").with_audit(&sink).resolve("nope");
    let events = sink.events.lock().unwrap();
    let json = serde_json::to_value(&events[0]).unwrap();
    assert_eq!(json["event"], "message_degraded");
    assert_eq!(json["kind"], "missing_key");
    assert_eq!(json["key"], "nope");
}
