// crates/fitgn-messages/src/rich.rs
// ============================================================================
// Module: Rich-Text Tag Parser
// Description: Converts one level of `<tag>content</tag>` markup into segments.
// Purpose: Let callers render inline markup through registered components.
// Dependencies: crate::interpolate, serde
// ============================================================================

//! ## Overview
//! Rich messages embed inline spans such as `Read the <link>guide</link>.`.
//! The parser scans left to right for non-overlapping spans whose close tag
//! carries the same name as the open tag. Content is captured up to the first
//! such close tag on the same line. Registered tags become
//! [`Segment::Node`] values built by the caller's renderer. Everything else,
//! including unknown or unclosed tags, stays literal text.
//!
//! ## Invariants
//! - Output preserves document order.
//! - Adjacent text is coalesced and empty text segments are never emitted.
//! - Tag content is passed to renderers verbatim and is never re-scanned.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

use serde::Serialize;

use crate::interpolate::is_name_byte;

// ============================================================================
// SECTION: Segments
// ============================================================================

/// One ordered unit of a rich-text result.
///
/// Serializes externally tagged: `{"text": "..."}` or `{"node": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment<N> {
    /// Literal text.
    Text(String),
    /// Node produced by a component renderer.
    Node(N),
}

impl<N> Segment<N> {
    /// Returns the text when this is a text segment.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Node(_) => None,
        }
    }

    /// Returns the node when this is a node segment.
    #[must_use]
    pub const fn as_node(&self) -> Option<&N> {
        match self {
            Self::Text(_) => None,
            Self::Node(node) => Some(node),
        }
    }
}

// ============================================================================
// SECTION: Component Map
// ============================================================================

/// Renderer invoked with the captured content of a tag.
type Renderer<'r, N> = Box<dyn Fn(&str) -> N + 'r>;

/// Tag renderers supplied for a single rich lookup.
pub struct ComponentMap<'r, N> {
    /// Renderers keyed by tag name.
    renderers: BTreeMap<String, Renderer<'r, N>>,
}

impl<'r, N> ComponentMap<'r, N> {
    /// Creates an empty component map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            renderers: BTreeMap::new(),
        }
    }

    /// Returns the map with `renderer` registered for `tag`.
    #[must_use]
    pub fn with(mut self, tag: impl Into<String>, renderer: impl Fn(&str) -> N + 'r) -> Self {
        self.insert(tag, renderer);
        self
    }

    /// Registers `renderer` for `tag`, replacing any previous renderer.
    pub fn insert(&mut self, tag: impl Into<String>, renderer: impl Fn(&str) -> N + 'r) {
        self.renderers.insert(tag.into(), Box::new(renderer));
    }

    /// Returns true when a renderer is registered for `tag`.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.renderers.contains_key(tag)
    }

    /// Renders `content` with the renderer registered for `tag`.
    #[must_use]
    pub fn render(&self, tag: &str, content: &str) -> Option<N> {
        self.renderers.get(tag).map(|renderer| renderer(content))
    }

    /// Returns the number of registered renderers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    /// Returns true when no renderers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }
}

impl<N> Default for ComponentMap<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> fmt::Debug for ComponentMap<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.renderers.keys()).finish()
    }
}

// ============================================================================
// SECTION: Tag Scanning
// ============================================================================

/// A tag occurrence found while scanning a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagSpan<'t> {
    /// An open tag with a matching close tag on the same line.
    Matched {
        /// Tag name.
        name: &'t str,
        /// Captured inner content.
        content: &'t str,
        /// Byte range of the whole span, tags included.
        range: Range<usize>,
    },
    /// An open tag with no matching close tag on the same line.
    Unclosed {
        /// Tag name.
        name: &'t str,
        /// Byte range of the open tag.
        range: Range<usize>,
    },
}

impl<'t> TagSpan<'t> {
    /// Returns the tag name.
    #[must_use]
    pub const fn name(&self) -> &'t str {
        match self {
            Self::Matched {
                name, ..
            }
            | Self::Unclosed {
                name, ..
            } => *name,
        }
    }
}

/// Iterator over the tag occurrences of a template.
#[derive(Debug, Clone)]
pub struct TagSpans<'t> {
    /// Template being scanned.
    template: &'t str,
    /// Byte offset where the next scan starts.
    cursor: usize,
}

impl<'t> Iterator for TagSpans<'t> {
    type Item = TagSpan<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let template = self.template;
        let bytes = template.as_bytes();
        while self.cursor < bytes.len() {
            let open = self.cursor + bytes[self.cursor ..].iter().position(|byte| *byte == b'<')?;
            let name_start = open + 1;
            let name_len = bytes[name_start ..].iter().take_while(|byte| is_name_byte(**byte)).count();
            let name_end = name_start + name_len;
            if name_len == 0 || bytes.get(name_end) != Some(&b'>') {
                self.cursor = name_start;
                continue;
            }
            let name = &template[name_start .. name_end];
            let content_start = name_end + 1;
            let Some(close) = find_close_tag(template, content_start, name) else {
                self.cursor = name_start;
                return Some(TagSpan::Unclosed {
                    name,
                    range: open .. content_start,
                });
            };
            let end = close + name.len() + 3;
            self.cursor = end;
            return Some(TagSpan::Matched {
                name,
                content: &template[content_start .. close],
                range: open .. end,
            });
        }
        None
    }
}

/// Scans `template` for tag occurrences, left to right.
#[must_use]
pub const fn tag_spans(template: &str) -> TagSpans<'_> {
    TagSpans {
        template,
        cursor: 0,
    }
}

/// Returns true for characters that end a line.
const fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Finds the byte offset of the first `</name>` at or after `from` on the same line.
fn find_close_tag(template: &str, from: usize, name: &str) -> Option<usize> {
    let rest = &template[from ..];
    let line = rest.find(is_line_terminator).map_or(rest, |end| &rest[.. end]);
    line.match_indices("</").find_map(|(offset, _)| {
        let after = &line[offset + 2 ..];
        let closes = after.strip_prefix(name).is_some_and(|tail| tail.starts_with('>'));
        closes.then_some(from + offset)
    })
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

/// Appends `text`, merging it into a trailing text segment.
fn push_text<N>(segments: &mut Vec<Segment<N>>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Text(last)) = segments.last_mut() {
        last.push_str(text);
    } else {
        segments.push(Segment::Text(text.to_string()));
    }
}

/// Parses `template` into text and rendered node segments.
#[must_use]
pub fn parse_rich<N>(template: &str, components: &ComponentMap<'_, N>) -> Vec<Segment<N>> {
    let mut segments = Vec::new();
    let mut copied = 0usize;
    for span in tag_spans(template) {
        let TagSpan::Matched {
            name,
            content,
            range,
        } = span
        else {
            continue;
        };
        push_text(&mut segments, &template[copied .. range.start]);
        match components.render(name, content) {
            Some(node) => segments.push(Segment::Node(node)),
            None => push_text(&mut segments, &template[range.clone()]),
        }
        copied = range.end;
    }
    push_text(&mut segments, &template[copied ..]);
    segments
}
