// crates/fitgn-messages/src/audit.rs
// ============================================================================
// Module: Message Audit Logging
// Description: Structured events for degraded message lookups.
// Purpose: Surface missing translations to developers without failing renders.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every lookup degradation (missing namespace, missing key, unresolved
//! placeholder, unknown or unclosed tag) is reported as a
//! [`MessageAuditEvent`]. Sinks decide where events go. The engine never
//! waits on or fails because of a sink: write errors are dropped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Classification of a degraded lookup.
///
/// # Invariants
/// - Variants are stable for audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageEventKind {
    /// The namespace is absent from the table or is not a group.
    MissingNamespace,
    /// The key did not resolve to a leaf.
    MissingKey,
    /// A placeholder had no bound parameter.
    UnresolvedPlaceholder,
    /// A matched tag had no registered renderer.
    UnknownTag,
    /// An open tag had no matching close tag on the same line.
    UnclosedTag,
}

impl MessageEventKind {
    /// Returns a stable label for the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingNamespace => "missing_namespace",
            Self::MissingKey => "missing_key",
            Self::UnresolvedPlaceholder => "unresolved_placeholder",
            Self::UnknownTag => "unknown_tag",
            Self::UnclosedTag => "unclosed_tag",
        }
    }
}

/// Degraded lookup event payload.
#[derive(Debug, Clone, Serialize)]
pub struct MessageAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Degradation kind.
    pub kind: MessageEventKind,
    /// Locale label when the translator knows it.
    pub locale: Option<String>,
    /// Namespace the lookup ran in.
    pub namespace: String,
    /// Requested dotted key (empty for namespace events).
    pub key: String,
    /// Kind-specific detail (miss reason, placeholder or tag name).
    pub detail: Option<String>,
}

/// Inputs required to construct an audit event.
pub struct MessageAuditEventParams {
    /// Degradation kind.
    pub kind: MessageEventKind,
    /// Locale label when known.
    pub locale: Option<String>,
    /// Namespace the lookup ran in.
    pub namespace: String,
    /// Requested dotted key.
    pub key: String,
    /// Kind-specific detail.
    pub detail: Option<String>,
}

impl MessageAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(params: MessageAuditEventParams) -> Self {
        let timestamp_ms =
            SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        Self {
            event: "message_degraded",
            timestamp_ms,
            kind: params.kind,
            locale: params.locale,
            namespace: params.namespace,
            key: params.key,
            detail: params.detail,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for degraded lookups.
pub trait MessageAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &MessageAuditEvent);
}

/// No-op audit sink.
///
/// # Invariants
/// - Events are intentionally discarded.
pub struct NoopAuditSink;

impl MessageAuditSink for NoopAuditSink {
    fn record(&self, _event: &MessageAuditEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl MessageAuditSink for StderrAuditSink {
    fn record(&self, event: &MessageAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl MessageAuditSink for FileAuditSink {
    fn record(&self, event: &MessageAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}
