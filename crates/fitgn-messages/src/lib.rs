// crates/fitgn-messages/src/lib.rs
// ============================================================================
// Module: FitGN Messages Library
// Description: Message resolution and rich-text interpolation engine.
// Purpose: Resolve dotted keys, substitute parameters, and parse inline markup.
// Dependencies: crate::{audit, interpolate, key, namespace, node, rich, translator}
// ============================================================================

//! ## Overview
//! `fitgn-messages` turns a per-locale [`MessageTable`] into display strings.
//! Callers select a namespace through a [`Translator`], then request a key as
//! plain text, as text with `{placeholder}` parameters, or as rich text where
//! `<tag>content</tag>` spans are rendered by caller-supplied components.
//!
//! Missing translations never fail a render: absent keys come back verbatim
//! so they stay visible in the UI, and every degradation is reported to a
//! [`MessageAuditSink`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod interpolate;
pub mod key;
pub mod namespace;
pub mod node;
pub mod rich;
pub mod translator;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::MessageAuditEvent;
pub use audit::MessageAuditEventParams;
pub use audit::MessageAuditSink;
pub use audit::MessageEventKind;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use interpolate::ParameterMap;
pub use interpolate::Placeholder;
pub use interpolate::interpolate;
pub use interpolate::placeholders;
pub use interpolate::unresolved_placeholders;
pub use key::KeyMiss;
pub use key::KeyPath;
pub use key::MissReason;
pub use key::Resolution;
pub use key::resolve_key;
pub use key::resolve_or_key;
pub use namespace::select_namespace;
pub use node::MessageGroup;
pub use node::MessageNode;
pub use node::MessageTable;
pub use node::MessageTreeError;
pub use rich::ComponentMap;
pub use rich::Segment;
pub use rich::TagSpan;
pub use rich::parse_rich;
pub use rich::tag_spans;
pub use translator::Translator;
pub use translator::resolve;
pub use translator::resolve_rich;
pub use translator::resolve_with;
