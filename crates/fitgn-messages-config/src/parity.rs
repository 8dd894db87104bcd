// crates/fitgn-messages-config/src/parity.rs
// ============================================================================
// Module: Catalog Parity
// Description: Cross-locale consistency checks for message catalogs.
// Purpose: Catch missing translations and placeholder drift before release.
// Dependencies: fitgn-messages, serde
// ============================================================================

//! ## Overview
//! Every locale is compared against the default locale. A key present in the
//! default but absent elsewhere would render as its raw key in that locale; a
//! key whose placeholder or tag names differ would render with a visible
//! `{token}` or literal markup. Both are reported here instead.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use fitgn_messages::MessageTable;
use fitgn_messages::TagSpan;
use fitgn_messages::placeholders;
use fitgn_messages::tag_spans;
use serde::Serialize;

use crate::loader::MessageCatalog;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One inconsistency between a locale and the default locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParityIssue {
    /// A supported locale has no loaded table.
    MissingLocale {
        /// Locale without a table.
        locale: String,
    },
    /// A key in the default locale is absent.
    MissingKey {
        /// Locale lacking the key.
        locale: String,
        /// Full dotted key, namespace included.
        key: String,
    },
    /// A key is absent from the default locale.
    ExtraKey {
        /// Locale holding the extra key.
        locale: String,
        /// Full dotted key, namespace included.
        key: String,
    },
    /// Placeholder names differ from the default locale.
    PlaceholderDrift {
        /// Locale with the drifting message.
        locale: String,
        /// Full dotted key, namespace included.
        key: String,
        /// Names used by the default locale.
        expected: BTreeSet<String>,
        /// Names used by this locale.
        found: BTreeSet<String>,
    },
    /// Matched tag names differ from the default locale.
    TagDrift {
        /// Locale with the drifting message.
        locale: String,
        /// Full dotted key, namespace included.
        key: String,
        /// Tags used by the default locale.
        expected: BTreeSet<String>,
        /// Tags used by this locale.
        found: BTreeSet<String>,
    },
}

impl ParityIssue {
    /// Returns the locale the issue belongs to.
    #[must_use]
    pub fn locale(&self) -> &str {
        match self {
            Self::MissingLocale {
                locale,
            }
            | Self::MissingKey {
                locale, ..
            }
            | Self::ExtraKey {
                locale, ..
            }
            | Self::PlaceholderDrift {
                locale, ..
            }
            | Self::TagDrift {
                locale, ..
            } => locale,
        }
    }
}

/// Result of a catalog parity check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParityReport {
    /// Locale every other locale was compared with.
    pub default_locale: String,
    /// Locales compared, in registry order.
    pub locales: Vec<String>,
    /// Issues in locale then key order.
    pub issues: Vec<ParityIssue>,
}

impl ParityReport {
    /// Returns true when no issues were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

// ============================================================================
// SECTION: Check
// ============================================================================

/// Compares every locale in `catalog` with its default locale.
#[must_use]
pub fn check_parity(catalog: &MessageCatalog) -> ParityReport {
    let registry = catalog.registry();
    let default = registry.default_locale();
    let mut report = ParityReport {
        default_locale: default.to_string(),
        locales: registry.supported().iter().map(ToString::to_string).collect(),
        issues: Vec::new(),
    };
    let Some(baseline) = catalog.table(default.as_str()) else {
        report.issues.extend(registry.supported().iter().map(|tag| ParityIssue::MissingLocale {
            locale: tag.to_string(),
        }));
        return report;
    };
    let baseline = leaf_map(baseline);
    for tag in registry.supported().iter().filter(|tag| *tag != default) {
        let locale = tag.to_string();
        let Some(table) = catalog.table(tag.as_str()) else {
            report.issues.push(ParityIssue::MissingLocale {
                locale,
            });
            continue;
        };
        compare(&baseline, &leaf_map(table), &locale, &mut report.issues);
    }
    report
}

/// Flattens a table into full dotted keys.
fn leaf_map(table: &MessageTable) -> BTreeMap<String, &str> {
    table.root().leaf_paths()
}

/// Appends issues for one locale relative to the baseline.
fn compare(
    baseline: &BTreeMap<String, &str>,
    candidate: &BTreeMap<String, &str>,
    locale: &str,
    issues: &mut Vec<ParityIssue>,
) {
    let keys: BTreeSet<&String> = baseline.keys().chain(candidate.keys()).collect();
    for key in keys {
        match (baseline.get(key), candidate.get(key)) {
            (Some(expected), Some(found)) => {
                let (expected_names, found_names) =
                    (placeholder_names(expected), placeholder_names(found));
                if expected_names != found_names {
                    issues.push(ParityIssue::PlaceholderDrift {
                        locale: locale.to_string(),
                        key: key.clone(),
                        expected: expected_names,
                        found: found_names,
                    });
                }
                let (expected_tags, found_tags) = (tag_names(expected), tag_names(found));
                if expected_tags != found_tags {
                    issues.push(ParityIssue::TagDrift {
                        locale: locale.to_string(),
                        key: key.clone(),
                        expected: expected_tags,
                        found: found_tags,
                    });
                }
            }
            (Some(_), None) => issues.push(ParityIssue::MissingKey {
                locale: locale.to_string(),
                key: key.clone(),
            }),
            (None, Some(_)) => issues.push(ParityIssue::ExtraKey {
                locale: locale.to_string(),
                key: key.clone(),
            }),
            (None, None) => {}
        }
    }
}

/// Collects placeholder names used by a template.
fn placeholder_names(template: &str) -> BTreeSet<String> {
    placeholders(template).map(|placeholder| placeholder.name.to_string()).collect()
}

/// Collects names of matched tags used by a template.
fn tag_names(template: &str) -> BTreeSet<String> {
    tag_spans(template)
        .filter_map(|span| match span {
            TagSpan::Matched {
                name, ..
            } => Some(name.to_string()),
            TagSpan::Unclosed {
                ..
            } => None,
        })
        .collect()
}
