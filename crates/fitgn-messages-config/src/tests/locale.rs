// crates/fitgn-messages-config/src/tests/locale.rs
// ============================================================================
// Module: Locale Registry Tests
// Description: Unit tests for locale tag parsing and registry lookups.
// Purpose: Ensure only well-formed, listed locales are ever served.
// Dependencies: fitgn-messages-config locale module
// ============================================================================

//! ## Overview
//! Verifies tag canonicalization, registry construction errors, and the
//! tolerant locale matching used by request routing.

use crate::locale::LocaleError;
use crate::locale::LocaleRegistry;
use crate::locale::LocaleTag;

#[test]
fn tags_are_canonicalized() {
    assert_eq!(LocaleTag::parse("NL").unwrap().as_str(), "nl");
    assert_eq!(LocaleTag::parse("en_us").unwrap().as_str(), "en-US");
    assert_eq!(LocaleTag::parse(" pt-br ").unwrap().as_str(), "pt-BR");
    assert_eq!(LocaleTag::parse("es-419").unwrap().language(), "es");
}

#[test]
fn malformed_tags_are_rejected() {
    for raw in ["", "e", "engl", "e1", "en-", "en-U", "en-toolongreg", "en-US-x", "en US"] {
        assert_eq!(
            LocaleTag::parse(raw),
            Err(LocaleError::InvalidTag(raw.to_string())),
            "{raw:?} should be rejected"
        );
    }
}

#[test]
fn default_registry_serves_site_locales() {
    let registry = LocaleRegistry::default();
    let tags: Vec<&str> = registry.supported().iter().map(LocaleTag::as_str).collect();
    assert_eq!(tags, vec!["nl", "en", "fr", "de", "es", "it"]);
    assert_eq!(registry.default_locale().as_str(), "nl");
}

#[test]
fn registry_rejects_empty_duplicate_and_unlisted_default() {
    let empty: [&str; 0] = [];
    assert_eq!(LocaleRegistry::new(&empty, "nl"), Err(LocaleError::Empty));
    assert_eq!(
        LocaleRegistry::new(&["nl", "NL"], "nl"),
        Err(LocaleError::Duplicate("nl".to_string()))
    );
    assert_eq!(
        LocaleRegistry::new(&["nl", "en"], "fr"),
        Err(LocaleError::DefaultNotSupported("fr".to_string()))
    );
}

#[test]
fn is_supported_requires_exact_tag() {
    let registry = LocaleRegistry::default();
    assert!(registry.is_supported("en"));
    assert!(!registry.is_supported("EN"));
    assert!(!registry.is_supported("pt"));
}

#[test]
fn parse_tolerates_case_and_region() {
    let registry = LocaleRegistry::new(&["en", "en-GB", "nl"], "en").unwrap();
    assert_eq!(registry.parse("EN").map(LocaleTag::as_str), Some("en"));
    assert_eq!(registry.parse("en_gb").map(LocaleTag::as_str), Some("en-GB"));
    assert_eq!(registry.parse("en-US").map(LocaleTag::as_str), Some("en"));
    assert_eq!(registry.parse("nl-BE").map(LocaleTag::as_str), Some("nl"));
    assert!(registry.parse("fr").is_none());
    assert!(registry.parse("not a tag").is_none());
}

#[test]
fn resolve_or_default_falls_back() {
    let registry = LocaleRegistry::default();
    assert_eq!(registry.resolve_or_default(Some("fr-CA")).as_str(), "fr");
    assert_eq!(registry.resolve_or_default(Some("pt")).as_str(), "nl");
    assert_eq!(registry.resolve_or_default(None).as_str(), "nl");
}
