// crates/fitgn-messages/src/translator.rs
// ============================================================================
// Module: Translator
// Description: Explicit lookup context over a message table namespace.
// Purpose: Expose plain, interpolated, and rich lookups with audit reporting.
// Dependencies: crate::{audit, interpolate, key, namespace, node, rich}
// ============================================================================

//! ## Overview
//! A [`Translator`] is a cheap, copyable view binding one namespace of a
//! [`MessageTable`] together with an optional locale label and an audit sink.
//! Render code receives it as an explicit argument. No table is ever held in
//! process-wide state.
//!
//! ## Invariants
//! - Lookups never fail: misses return the key, and rich misses return a single
//!   text segment holding the key.
//! - The key itself is never interpolated or parsed for tags.
//! - Every degradation is reported to the audit sink exactly once per lookup.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::audit::MessageAuditEvent;
use crate::audit::MessageAuditEventParams;
use crate::audit::MessageAuditSink;
use crate::audit::MessageEventKind;
use crate::audit::NoopAuditSink;
use crate::interpolate::ParameterMap;
use crate::interpolate::interpolate;
use crate::interpolate::unresolved_placeholders;
use crate::key::Resolution;
use crate::key::resolve_key;
use crate::namespace::select_namespace;
use crate::node::MessageGroup;
use crate::node::MessageTable;
use crate::rich::ComponentMap;
use crate::rich::Segment;
use crate::rich::TagSpan;
use crate::rich::parse_rich;
use crate::rich::tag_spans;

/// Sink used until a caller installs one.
static NOOP_AUDIT: NoopAuditSink = NoopAuditSink;

// ============================================================================
// SECTION: Translator
// ============================================================================

/// Lookup context bound to one namespace of a message table.
#[derive(Clone, Copy)]
pub struct Translator<'a> {
    /// Table the namespace was selected from.
    table: &'a MessageTable,
    /// Selected namespace name.
    namespace: &'a str,
    /// Selected namespace group (empty when absent).
    group: &'a MessageGroup,
    /// Whether the namespace exists as a group.
    namespace_found: bool,
    /// Locale label attached to audit events.
    locale: Option<&'a str>,
    /// Destination for degradation events.
    audit: &'a dyn MessageAuditSink,
}

impl<'a> Translator<'a> {
    /// Creates a translator for `namespace` in `table`.
    #[must_use]
    pub fn new(table: &'a MessageTable, namespace: &'a str) -> Self {
        Self {
            table,
            namespace,
            group: select_namespace(table, namespace),
            namespace_found: table.namespace(namespace).is_some(),
            locale: None,
            audit: &NOOP_AUDIT,
        }
    }

    /// Attaches a locale label used in audit events.
    #[must_use]
    pub const fn with_locale(mut self, locale: &'a str) -> Self {
        self.locale = Some(locale);
        self
    }

    /// Routes degradation events to `audit`.
    #[must_use]
    pub const fn with_audit(mut self, audit: &'a dyn MessageAuditSink) -> Self {
        self.audit = audit;
        self
    }

    /// Returns a translator for another namespace of the same table.
    #[must_use]
    pub fn in_namespace(&self, namespace: &'a str) -> Self {
        Self {
            locale: self.locale,
            audit: self.audit,
            ..Self::new(self.table, namespace)
        }
    }

    /// Returns the selected namespace name.
    #[must_use]
    pub const fn namespace(&self) -> &'a str {
        self.namespace
    }

    /// Returns the locale label, if any.
    #[must_use]
    pub const fn locale(&self) -> Option<&'a str> {
        self.locale
    }

    /// Returns the selected namespace group.
    #[must_use]
    pub const fn group(&self) -> &'a MessageGroup {
        self.group
    }

    /// Walks `key` and reports a miss to the audit sink.
    #[must_use]
    pub fn lookup<'k>(&self, key: &'k str) -> Resolution<'a, 'k> {
        let resolution = resolve_key(self.group, key);
        if let Resolution::Missing(miss) = resolution {
            if self.namespace_found {
                let detail =
                    format!("{} at segment {} ({})", miss.reason.as_str(), miss.depth, miss.segment);
                self.report(MessageEventKind::MissingKey, key, Some(detail));
            } else {
                self.report(MessageEventKind::MissingNamespace, key, None);
            }
        }
        resolution
    }

    /// Returns the leaf text for `key`, or the key itself.
    #[must_use]
    pub fn resolve(&self, key: &str) -> String {
        self.lookup(key).text_or_key(key).to_string()
    }

    /// Returns the leaf text for `key` with placeholders substituted, or the key itself.
    #[must_use]
    pub fn resolve_with(&self, key: &str, params: &ParameterMap) -> String {
        let Some(template) = self.lookup(key).leaf() else {
            return key.to_string();
        };
        for name in unresolved_placeholders(template, params) {
            self.report(MessageEventKind::UnresolvedPlaceholder, key, Some(name.to_string()));
        }
        interpolate(template, Some(params))
    }

    /// Returns the rich-text segments for `key`, or a single text segment holding the key.
    #[must_use]
    pub fn resolve_rich<N>(&self, key: &str, components: &ComponentMap<'_, N>) -> Vec<Segment<N>> {
        let Some(template) = self.lookup(key).leaf() else {
            return vec![Segment::Text(key.to_string())];
        };
        for span in tag_spans(template) {
            match span {
                TagSpan::Matched {
                    name, ..
                } if !components.contains(name) => {
                    self.report(MessageEventKind::UnknownTag, key, Some(name.to_string()));
                }
                TagSpan::Unclosed {
                    name, ..
                } => {
                    self.report(MessageEventKind::UnclosedTag, key, Some(name.to_string()));
                }
                TagSpan::Matched {
                    ..
                } => {}
            }
        }
        parse_rich(template, components)
    }

    /// Sends one degradation event to the audit sink.
    fn report(&self, kind: MessageEventKind, key: &str, detail: Option<String>) {
        let event = MessageAuditEvent::new(MessageAuditEventParams {
            kind,
            locale: self.locale.map(str::to_string),
            namespace: self.namespace.to_string(),
            key: key.to_string(),
            detail,
        });
        self.audit.record(&event);
    }
}

impl fmt::Debug for Translator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator")
            .field("namespace", &self.namespace)
            .field("namespace_found", &self.namespace_found)
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Free Functions
// ============================================================================

/// Resolves `key` in `namespace` of `table`, falling back to the key.
#[must_use]
pub fn resolve(table: &MessageTable, namespace: &str, key: &str) -> String {
    Translator::new(table, namespace).resolve(key)
}

/// Resolves and interpolates `key` in `namespace` of `table`, falling back to the key.
#[must_use]
pub fn resolve_with(table: &MessageTable, namespace: &str, key: &str, params: &ParameterMap) -> String {
    Translator::new(table, namespace).resolve_with(key, params)
}

/// Resolves `key` in `namespace` of `table` into rich-text segments.
#[must_use]
pub fn resolve_rich<N>(
    table: &MessageTable,
    namespace: &str,
    key: &str,
    components: &ComponentMap<'_, N>,
) -> Vec<Segment<N>> {
    Translator::new(table, namespace).resolve_rich(key, components)
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Resolves a message through a [`Translator`] with named arguments.
///
/// # Arguments
///
/// - `$translator` is any expression evaluating to a [`Translator`].
/// - `$key` is the dotted message key.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// The resolved [`String`], or the key itself when the message is missing.
#[macro_export]
macro_rules! t {
    ($translator:expr, $key:expr, $( $name:ident = $value:expr ),+ $(,)?) => {{
        let params = $crate::ParameterMap::new()
            $( .with(stringify!($name), &$value) )+;
        $translator.resolve_with($key, &params)
    }};
    ($translator:expr, $key:expr $(,)?) => {
        $translator.resolve($key)
    };
}
