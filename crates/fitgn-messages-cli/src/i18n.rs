// crates/fitgn-messages-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Message catalog and translation utilities for the CLI.
// Purpose: Route every user-facing CLI string through the message engine.
// Dependencies: fitgn-messages
// ============================================================================

//! ## Overview
//! The CLI keeps its own strings in small per-locale catalogs. Each catalog
//! is built once into a [`MessageTable`] under the `Cli` namespace and read
//! through the same [`Translator`] the engine exposes to applications. All
//! runtime output should be routed through the [`t!`](crate::t) macro.
//!
//! ## Invariants
//! - The output locale is selected once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::OnceLock;

pub use fitgn_messages::ParameterMap;
use fitgn_messages::MessageGroup;
use fitgn_messages::MessageTable;
use fitgn_messages::Translator;
use fitgn_messages::interpolate;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Namespace holding every CLI message.
pub const CLI_NAMESPACE: &str = "Cli";

/// Supported CLI output locales.
///
/// # Invariants
/// - Variants are stable for CLI parsing and catalog lookup.
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Dutch.
    Nl,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Nl => "nl",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "nl" => Some(Self::Nl),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Nl];

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// English catalog entries, keyed below the `Cli` namespace.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "fitgn-messages {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'nl'."),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config is valid ({count} locales, default {default})."),
    ("audit.open_failed", "Failed to open audit sink: {error}"),
    ("messages.load_failed", "Failed to load messages: {error}"),
    ("resolve.param.invalid", "Invalid parameter '{value}': expected name=value."),
    ("rich.encode_failed", "Failed to encode segments: {error}"),
    ("check.encode_failed", "Failed to encode parity report: {error}"),
    ("check.ok", "All {count} locales match the default locale {default}."),
    ("check.summary", "Found {count} parity issues."),
    ("check.issue.missing_locale", "{locale}: no messages loaded"),
    ("check.issue.missing_key", "{locale}: missing key {key}"),
    ("check.issue.extra_key", "{locale}: key {key} is not in the default locale"),
    (
        "check.issue.placeholder_drift",
        "{locale}: {key} uses placeholders [{found}], default uses [{expected}]",
    ),
    ("check.issue.tag_drift", "{locale}: {key} uses tags [{found}], default uses [{expected}]"),
];

/// Dutch catalog entries, keyed below the `Cli` namespace.
const CATALOG_NL: &[(&str, &str)] = &[
    ("main.version", "fitgn-messages {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "uitvoer"),
    ("output.write_failed", "Schrijven naar {stream} mislukt: {error}"),
    ("i18n.lang.invalid_env", "Ongeldige waarde voor {env}: {value}. Verwacht 'en' of 'nl'."),
    ("config.load_failed", "Configuratie laden mislukt: {error}"),
    ("config.validate.ok", "Configuratie is geldig ({count} talen, standaard {default})."),
    ("audit.open_failed", "Auditlog openen mislukt: {error}"),
    ("messages.load_failed", "Berichten laden mislukt: {error}"),
    ("resolve.param.invalid", "Ongeldige parameter '{value}': verwacht naam=waarde."),
    ("rich.encode_failed", "Segmenten coderen mislukt: {error}"),
    ("check.encode_failed", "Pariteitsrapport coderen mislukt: {error}"),
    ("check.ok", "Alle {count} talen komen overeen met standaardtaal {default}."),
    ("check.summary", "{count} pariteitsproblemen gevonden."),
    ("check.issue.missing_locale", "{locale}: geen berichten geladen"),
    ("check.issue.missing_key", "{locale}: sleutel {key} ontbreekt"),
    ("check.issue.extra_key", "{locale}: sleutel {key} staat niet in de standaardtaal"),
    (
        "check.issue.placeholder_drift",
        "{locale}: {key} gebruikt plaatshouders [{found}], standaardtaal gebruikt [{expected}]",
    ),
    (
        "check.issue.tag_drift",
        "{locale}: {key} gebruikt tags [{found}], standaardtaal gebruikt [{expected}]",
    ),
];

/// Returns the raw catalog entries for a locale.
pub(crate) const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Nl => CATALOG_NL,
    }
}

/// Returns the message table for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static MessageTable {
    static CATALOG_EN_TABLE: OnceLock<MessageTable> = OnceLock::new();
    static CATALOG_NL_TABLE: OnceLock<MessageTable> = OnceLock::new();
    let cell = match locale {
        Locale::En => &CATALOG_EN_TABLE,
        Locale::Nl => &CATALOG_NL_TABLE,
    };
    cell.get_or_init(|| build_table(catalog_entries_for(locale)))
}

/// Builds a table with every entry placed below [`CLI_NAMESPACE`].
fn build_table(entries: &[(&str, &str)]) -> MessageTable {
    let mut namespace = MessageGroup::new();
    for (key, text) in entries {
        // Catalog keys are fixed; conflicts are caught by the catalog tests.
        let _ = namespace.insert_path(key, *text);
    }
    let mut root = MessageGroup::new();
    root.insert(CLI_NAMESPACE, namespace);
    MessageTable::new(root)
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Returns a translator over the CLI namespace for `locale`.
#[must_use]
pub fn translator(locale: Locale) -> Translator<'static> {
    catalog_for(locale).translator(CLI_NAMESPACE).with_locale(locale.as_str())
}

/// Translates `key` using the selected locale while substituting `params`.
#[must_use]
pub fn translate(key: &str, params: &ParameterMap) -> String {
    let locale = current_locale();
    let template = translator(locale)
        .lookup(key)
        .leaf()
        .or_else(|| translator(Locale::En).lookup(key).leaf());
    match template {
        Some(template) => interpolate(template, Some(params)),
        None => key.to_string(),
    }
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized CLI message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let params = $crate::i18n::ParameterMap::new()
            $( .with(stringify!($name), &$value) )*;
        $crate::i18n::translate($key, &params)
    }};
}
