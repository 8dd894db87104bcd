// crates/fitgn-messages/src/interpolate.rs
// ============================================================================
// Module: Parameter Interpolator
// Description: `{name}` placeholder scanning and single-pass substitution.
// Purpose: Substitute runtime values while keeping unresolved tokens visible.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! Placeholders are `{identifier}` tokens where the identifier matches
//! `[A-Za-z0-9_]+`. Interpolation is a single left-to-right pass: substituted
//! values are never re-scanned, and placeholders without a value stay in the
//! output verbatim, braces included.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt::Display;
use std::ops::Range;

// ============================================================================
// SECTION: Parameter Map
// ============================================================================

/// Placeholder values supplied for a single lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap {
    /// Display strings keyed by placeholder name.
    values: BTreeMap<String, String>,
}

impl ParameterMap {
    /// Creates an empty parameter map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Returns the map with `name` bound to the display form of `value`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    /// Binds `name` to the display form of `value`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Display) -> Option<String> {
        self.values.insert(name.into(), value.to_string())
    }

    /// Returns the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Returns the number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true when no parameters are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates bound parameters in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.values.iter()
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

// ============================================================================
// SECTION: Placeholder Scanning
// ============================================================================

/// Returns true for bytes allowed in placeholder and tag names.
pub(crate) const fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// A placeholder token found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'t> {
    /// Placeholder name without braces.
    pub name: &'t str,
    /// Byte range of the full token, braces included.
    pub range: Range<usize>,
}

/// Iterator over the placeholder tokens of a template.
#[derive(Debug, Clone)]
pub struct Placeholders<'t> {
    /// Template being scanned.
    template: &'t str,
    /// Byte offset where the next scan starts.
    cursor: usize,
}

impl<'t> Iterator for Placeholders<'t> {
    type Item = Placeholder<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.template.as_bytes();
        while self.cursor < bytes.len() {
            let open = self.cursor + bytes[self.cursor ..].iter().position(|byte| *byte == b'{')?;
            let name_start = open + 1;
            let name_len = bytes[name_start ..].iter().take_while(|byte| is_name_byte(**byte)).count();
            let name_end = name_start + name_len;
            if name_len > 0 && bytes.get(name_end) == Some(&b'}') {
                self.cursor = name_end + 1;
                return Some(Placeholder {
                    name: &self.template[name_start .. name_end],
                    range: open .. name_end + 1,
                });
            }
            self.cursor = name_start;
        }
        None
    }
}

/// Scans `template` for placeholder tokens, left to right.
#[must_use]
pub const fn placeholders(template: &str) -> Placeholders<'_> {
    Placeholders {
        template,
        cursor: 0,
    }
}

// ============================================================================
// SECTION: Interpolation
// ============================================================================

/// Substitutes placeholders in `template` with values from `params`.
///
/// Without a parameter map the template is returned unchanged.
#[must_use]
pub fn interpolate(template: &str, params: Option<&ParameterMap>) -> String {
    let Some(params) = params else {
        return template.to_string();
    };
    let mut output = String::with_capacity(template.len());
    let mut copied = 0usize;
    for placeholder in placeholders(template) {
        if let Some(value) = params.get(placeholder.name) {
            output.push_str(&template[copied .. placeholder.range.start]);
            output.push_str(value);
            copied = placeholder.range.end;
        }
    }
    output.push_str(&template[copied ..]);
    output
}

/// Returns placeholder names in `template` that `params` does not bind.
#[must_use]
pub fn unresolved_placeholders<'t>(template: &'t str, params: &ParameterMap) -> Vec<&'t str> {
    placeholders(template)
        .filter(|placeholder| params.get(placeholder.name).is_none())
        .map(|placeholder| placeholder.name)
        .collect()
}
