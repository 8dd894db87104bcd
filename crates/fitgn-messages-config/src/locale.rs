// crates/fitgn-messages-config/src/locale.rs
// ============================================================================
// Module: Locale Registry
// Description: Validated locale tags and the supported-locale registry.
// Purpose: Decide which locales may be served and which one is the default.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! A [`LocaleTag`] is a syntactically valid language tag in canonical form
//! (lowercase language, uppercase region, `-` separator). A
//! [`LocaleRegistry`] holds the ordered supported list and the default.
//!
//! ## Invariants
//! - The supported list is non-empty and free of duplicates.
//! - The default locale is always a member of the supported list.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Locales served when no configuration overrides them.
pub const DEFAULT_SUPPORTED_LOCALES: &[&str] = &["nl", "en", "fr", "de", "es", "it"];
/// Locale used when no configuration overrides it.
pub const DEFAULT_LOCALE: &str = "nl";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Locale tag or registry construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    /// The tag does not match `ll[-RR]`.
    #[error("invalid locale tag: {0}")]
    InvalidTag(String),
    /// The supported list is empty.
    #[error("supported locale list must be non-empty")]
    Empty,
    /// The same locale appears twice.
    #[error("duplicate locale: {0}")]
    Duplicate(String),
    /// The default locale is not in the supported list.
    #[error("default locale {0} is not supported")]
    DefaultNotSupported(String),
}

// ============================================================================
// SECTION: Locale Tag
// ============================================================================

/// Canonical locale tag such as `nl` or `en-US`.
///
/// # Invariants
/// - Language is 2-3 lowercase ASCII letters.
/// - Region, when present, is 2-8 ASCII alphanumerics, uppercased.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LocaleTag(String);

impl LocaleTag {
    /// Parses and canonicalizes a locale tag.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError::InvalidTag`] when the value is not `ll[-RR]`.
    pub fn parse(value: &str) -> Result<Self, LocaleError> {
        let trimmed = value.trim();
        let invalid = || LocaleError::InvalidTag(value.to_string());
        let mut parts = trimmed.splitn(2, ['-', '_']);
        let language = parts.next().unwrap_or_default();
        if !(2 ..= 3).contains(&language.len()) || !language.bytes().all(|b| b.is_ascii_alphabetic())
        {
            return Err(invalid());
        }
        let mut canonical = language.to_ascii_lowercase();
        if let Some(region) = parts.next() {
            if !(2 ..= 8).contains(&region.len())
                || !region.bytes().all(|b| b.is_ascii_alphanumeric())
            {
                return Err(invalid());
            }
            canonical.push('-');
            canonical.push_str(&region.to_ascii_uppercase());
        }
        Ok(Self(canonical))
    }

    /// Returns the canonical tag text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the language subtag.
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocaleTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Ordered set of supported locales with a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRegistry {
    /// Supported locales in configuration order.
    supported: Vec<LocaleTag>,
    /// Index of the default locale in `supported`.
    default_index: usize,
}

impl LocaleRegistry {
    /// Builds a registry from raw tags.
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError`] when a tag is invalid, the list is empty or
    /// repeats a locale, or the default is not listed.
    pub fn new<S: AsRef<str>>(supported: &[S], default: &str) -> Result<Self, LocaleError> {
        if supported.is_empty() {
            return Err(LocaleError::Empty);
        }
        let mut tags: Vec<LocaleTag> = Vec::with_capacity(supported.len());
        for raw in supported {
            let tag = LocaleTag::parse(raw.as_ref())?;
            if tags.contains(&tag) {
                return Err(LocaleError::Duplicate(tag.0));
            }
            tags.push(tag);
        }
        let default = LocaleTag::parse(default)?;
        let default_index = tags
            .iter()
            .position(|tag| *tag == default)
            .ok_or_else(|| LocaleError::DefaultNotSupported(default.to_string()))?;
        Ok(Self {
            supported: tags,
            default_index,
        })
    }

    /// Returns the supported locales in configuration order.
    #[must_use]
    pub fn supported(&self) -> &[LocaleTag] {
        &self.supported
    }

    /// Returns the default locale.
    #[must_use]
    pub fn default_locale(&self) -> &LocaleTag {
        &self.supported[self.default_index]
    }

    /// Returns true when `value` names a supported locale exactly.
    #[must_use]
    pub fn is_supported(&self, value: &str) -> bool {
        self.supported.iter().any(|tag| tag.as_str() == value)
    }

    /// Matches `value` against the supported list, tolerating case and region tags.
    ///
    /// An exact canonical match wins; otherwise a supported tag with the same
    /// language and no region is accepted (`en-GB` selects `en`).
    #[must_use]
    pub fn parse(&self, value: &str) -> Option<&LocaleTag> {
        let tag = LocaleTag::parse(value).ok()?;
        self.supported.iter().find(|candidate| **candidate == tag).or_else(|| {
            self.supported.iter().find(|candidate| candidate.as_str() == tag.language())
        })
    }

    /// Returns the matching supported locale, or the default.
    #[must_use]
    pub fn resolve_or_default(&self, value: Option<&str>) -> &LocaleTag {
        value.and_then(|value| self.parse(value)).unwrap_or_else(|| self.default_locale())
    }
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        let supported: Vec<LocaleTag> =
            DEFAULT_SUPPORTED_LOCALES.iter().map(|tag| LocaleTag((*tag).to_string())).collect();
        let default_index =
            supported.iter().position(|tag| tag.as_str() == DEFAULT_LOCALE).unwrap_or(0);
        Self {
            supported,
            default_index,
        }
    }
}
