// crates/fitgn-messages-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for argument parsing and output helpers.
// Purpose: Ensure parameter bindings, tag nodes, and parity lines are stable.
// Dependencies: fitgn-messages-cli main helpers
// ============================================================================

//! ## Overview
//! Validates `--param` parsing, the rich node renderer, locale resolution,
//! and the text rendering of parity reports.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use clap::CommandFactory;
use fitgn_messages::Segment;
use fitgn_messages::parse_rich;
use fitgn_messages_config::ParityIssue;
use fitgn_messages_config::ParityReport;

use super::Cli;
use super::LangArg;
use super::RichNode;
use super::build_params;
use super::format_issue;
use super::join_names;
use super::node_components;
use super::parse_param;
use super::report_lines;
use super::resolve_locale;
use fitgn_messages_cli::i18n::Locale;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn parse_param_splits_on_first_equals() {
    assert_eq!(parse_param("name=Sam"), Some(("name", "Sam")));
    assert_eq!(parse_param("expr=a=b"), Some(("expr", "a=b")));
    assert_eq!(parse_param("empty="), Some(("empty", "")));
    assert_eq!(parse_param("=value"), None);
    assert_eq!(parse_param("novalue"), None);
}

#[test]
fn build_params_binds_every_argument() {
    let params = build_params(&["a=1".to_string(), "b=two".to_string()]).unwrap();
    assert_eq!(params.get("a"), Some("1"));
    assert_eq!(params.get("b"), Some("two"));
    assert!(build_params(&["broken".to_string()]).is_err());
}

#[test]
fn node_components_render_tag_and_content() {
    let tags = vec!["b".to_string()];
    let components = node_components(&tags);
    assert_eq!(
        parse_rich("Hi <b>there</b> <i>you</i>", &components),
        vec![
            Segment::Text("Hi ".to_string()),
            Segment::Node(RichNode {
                tag: "b".to_string(),
                content: "there".to_string(),
            }),
            Segment::Text(" <i>you</i>".to_string()),
        ]
    );
}

#[test]
fn rich_nodes_serialize_as_tag_and_content() {
    let segments = vec![
        Segment::Text("Hi ".to_string()),
        Segment::Node(RichNode {
            tag: "b".to_string(),
            content: "there".to_string(),
        }),
    ];
    assert_eq!(
        serde_json::to_value(&segments).unwrap(),
        serde_json::json!([{"text": "Hi "}, {"node": {"tag": "b", "content": "there"}}])
    );
}

#[test]
fn resolve_locale_prefers_flag_then_env() {
    assert_eq!(resolve_locale(Some(LangArg::Nl), Some("en")).unwrap(), Locale::Nl);
    assert_eq!(resolve_locale(None, Some("nl-BE")).unwrap(), Locale::Nl);
    assert_eq!(resolve_locale(None, None).unwrap(), Locale::En);
    assert!(resolve_locale(None, Some("klingon")).is_err());
}

#[test]
fn report_lines_cover_clean_and_dirty_reports() {
    let clean = ParityReport {
        default_locale: "nl".to_string(),
        locales: vec!["nl".to_string(), "en".to_string()],
        issues: Vec::new(),
    };
    assert_eq!(report_lines(&clean), vec!["All 2 locales match the default locale nl."]);

    let dirty = ParityReport {
        issues: vec![ParityIssue::MissingKey {
            locale: "en".to_string(),
            key: "Home.title".to_string(),
        }],
        ..clean
    };
    assert_eq!(
        report_lines(&dirty),
        vec!["en: missing key Home.title", "Found 1 parity issues."]
    );
}

#[test]
fn drift_issues_list_names() {
    let issue = ParityIssue::PlaceholderDrift {
        locale: "en".to_string(),
        key: "Home.title".to_string(),
        expected: ["name".to_string()].into_iter().collect(),
        found: ["nmae".to_string(), "x".to_string()].into_iter().collect(),
    };
    assert_eq!(
        format_issue(&issue),
        "en: Home.title uses placeholders [nmae, x], default uses [name]"
    );
    assert_eq!(join_names(&BTreeSet::new()), "");
}
