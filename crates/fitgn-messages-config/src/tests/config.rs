// crates/fitgn-messages-config/src/tests/config.rs
// ============================================================================
// Module: Config Validation Tests
// Description: Unit tests for TOML parsing, defaults, and validation.
// Purpose: Ensure invalid configuration fails closed with explicit errors.
// Dependencies: fitgn-messages-config config module
// ============================================================================

//! ## Overview
//! Parses inline TOML documents and checks defaults, limits, locale
//! validation, and audit sink selection.

use std::path::Path;
use std::path::PathBuf;

use crate::config::AuditSinkKind;
use crate::config::ConfigError;
use crate::config::MessagesConfig;

fn invalid_message(content: &str) -> String {
    match MessagesConfig::from_toml_str(content) {
        Err(ConfigError::Invalid(message)) => message,
        other => panic!("expected invalid config, got {other:?}"),
    }
}

#[test]
fn empty_document_uses_site_defaults() {
    let config = MessagesConfig::from_toml_str("").unwrap();
    assert_eq!(config.locales.supported, vec!["nl", "en", "fr", "de", "es", "it"]);
    assert_eq!(config.locales.default, "nl");
    assert_eq!(config.messages.dir, "messages");
    assert_eq!(config.messages.max_file_bytes, 1_048_576);
    assert_eq!(config.messages.max_depth, 32);
    assert_eq!(config.audit.sink, AuditSinkKind::None);
    assert_eq!(config.messages_dir(), PathBuf::from("messages"));
}

#[test]
fn full_document_parses() {
    let config = MessagesConfig::from_toml_str(
        r#"
[locales]
supported = ["en", "nl"]
default = "en"

[messages]
dir = "locales"
max_file_bytes = 4096
max_depth = 4

[audit]
sink = "file"
path = "audit.jsonl"
"#,
    )
    .unwrap();
    let registry = config.registry().unwrap();
    assert_eq!(registry.default_locale().as_str(), "en");
    assert_eq!(config.messages.max_depth, 4);
    assert_eq!(config.audit.sink, AuditSinkKind::File);
}

#[test]
fn unknown_fields_are_rejected() {
    let result = MessagesConfig::from_toml_str("[messages]\nfolder = \"x\"\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
    let result = MessagesConfig::from_toml_str("[server]\nbind = \"x\"\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn default_locale_must_be_supported() {
    let message = invalid_message("[locales]\nsupported = [\"en\"]\ndefault = \"nl\"\n");
    assert_eq!(message, "locales: default locale nl is not supported");
}

#[test]
fn malformed_and_duplicate_locales_are_rejected() {
    let message = invalid_message("[locales]\nsupported = [\"en\", \"english\"]\ndefault = \"en\"\n");
    assert!(message.contains("invalid locale tag: english"), "{message}");
    let message = invalid_message("[locales]\nsupported = [\"en\", \"EN\"]\ndefault = \"en\"\n");
    assert!(message.contains("duplicate locale: en"), "{message}");
    let message = invalid_message("[locales]\nsupported = []\ndefault = \"en\"\n");
    assert!(message.contains("must be non-empty"), "{message}");
}

#[test]
fn message_limits_are_bounded() {
    let message = invalid_message("[messages]\nmax_file_bytes = 0\n");
    assert!(message.starts_with("messages.max_file_bytes"), "{message}");
    let message = invalid_message("[messages]\nmax_file_bytes = 16777217\n");
    assert!(message.starts_with("messages.max_file_bytes"), "{message}");
    let message = invalid_message("[messages]\nmax_depth = 129\n");
    assert!(message.starts_with("messages.max_depth"), "{message}");
    let message = invalid_message("[messages]\ndir = \"  \"\n");
    assert_eq!(message, "messages.dir must be non-empty");
}

#[test]
fn audit_path_is_tied_to_file_sink() {
    let message = invalid_message("[audit]\nsink = \"file\"\n");
    assert_eq!(message, "audit.path is required for the file sink");
    let message = invalid_message("[audit]\nsink = \"stderr\"\npath = \"a.jsonl\"\n");
    assert_eq!(message, "audit.path is only valid for the file sink");
}

#[test]
fn relative_dirs_resolve_against_config_location() {
    let mut config = MessagesConfig::from_toml_str("[messages]\ndir = \"locales\"\n").unwrap();
    config.source_dir = Some(PathBuf::from("/srv/site"));
    assert_eq!(config.messages_dir(), Path::new("/srv/site/locales"));
    let mut config = MessagesConfig::from_toml_str("[messages]\ndir = \"/abs/locales\"\n").unwrap();
    config.source_dir = Some(PathBuf::from("/srv/site"));
    assert_eq!(config.messages_dir(), Path::new("/abs/locales"));
}

#[test]
fn none_and_stderr_sinks_build_without_io() {
    let config = MessagesConfig::from_toml_str("[audit]\nsink = \"stderr\"\n").unwrap();
    assert!(config.build_audit_sink().is_ok());
    let config = MessagesConfig::default();
    assert!(config.build_audit_sink().is_ok());
}
