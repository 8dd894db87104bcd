// crates/fitgn-messages-config/src/loader.rs
// ============================================================================
// Module: Message Loader
// Description: Reads per-locale JSON message files into message tables.
// Purpose: Turn `<dir>/<locale>.json` documents into validated catalogs.
// Dependencies: fitgn-messages, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Each supported locale has one JSON document whose root is an object.
//! Strings become leaves and objects become groups. Any other JSON value is
//! rejected with the dotted path where it appeared, so a malformed file fails
//! at load time instead of degrading lookups later.
//!
//! ## Invariants
//! - Only locales in the registry are ever read from disk.
//! - Files larger than the configured limit are never parsed.
//! - Group nesting never exceeds the configured depth.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use fitgn_messages::MessageGroup;
use fitgn_messages::MessageNode;
use fitgn_messages::MessageTable;
use fitgn_messages::Translator;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::config::MessagesConfig;
use crate::locale::LocaleRegistry;
use crate::locale::LocaleTag;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Message file loading errors.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The requested locale is not in the registry.
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),
    /// I/O failure while reading a message file.
    #[error("message file io error at {path}: {error}")]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying error text.
        error: String,
    },
    /// The message file exceeds the size limit.
    #[error("message file {path} is {size} bytes (limit {limit})")]
    TooLarge {
        /// Oversized file.
        path: PathBuf,
        /// Observed size in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
    /// The message file is not valid utf-8.
    #[error("message file {0} must be utf-8")]
    NotUtf8(PathBuf),
    /// The message file is not valid JSON.
    #[error("message file {path} is not valid json: {error}")]
    Json {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser error text.
        error: String,
    },
    /// The document root is not a JSON object.
    #[error("message document root must be an object")]
    RootNotObject,
    /// A value other than a string or object was found.
    #[error("unsupported {kind} value at {path}")]
    UnsupportedValue {
        /// Dotted path of the offending value.
        path: String,
        /// JSON type name of the offending value.
        kind: &'static str,
    },
    /// Group nesting exceeds the depth limit.
    #[error("message groups nested deeper than {limit} at {path}")]
    TooDeep {
        /// Dotted path of the group that crossed the limit.
        path: String,
        /// Configured depth limit.
        limit: usize,
    },
}

// ============================================================================
// SECTION: Conversion
// ============================================================================

/// Converts a parsed JSON document into a message table.
///
/// The root object counts as depth 1.
///
/// # Errors
///
/// Returns [`LoaderError`] when the root is not an object, a non-string
/// scalar or array appears, or nesting exceeds `max_depth`.
pub fn table_from_json(value: &Value, max_depth: usize) -> Result<MessageTable, LoaderError> {
    let Value::Object(root) = value else {
        return Err(LoaderError::RootNotObject);
    };
    let group = group_from_json(root, "", 1, max_depth)?;
    Ok(MessageTable::new(group))
}

/// Converts one JSON object into a group, tracking the dotted prefix.
fn group_from_json(
    object: &Map<String, Value>,
    prefix: &str,
    depth: usize,
    max_depth: usize,
) -> Result<MessageGroup, LoaderError> {
    if depth > max_depth {
        return Err(LoaderError::TooDeep {
            path: if prefix.is_empty() { "<root>".to_string() } else { prefix.to_string() },
            limit: max_depth,
        });
    }
    let mut group = MessageGroup::new();
    for (key, value) in object {
        let path = if prefix.is_empty() { key.clone() } else { format!("{prefix}.{key}") };
        let node = match value {
            Value::String(text) => MessageNode::Leaf(text.clone()),
            Value::Object(child) => {
                MessageNode::Group(group_from_json(child, &path, depth + 1, max_depth)?)
            }
            other => {
                return Err(LoaderError::UnsupportedValue {
                    path,
                    kind: json_kind(other),
                });
            }
        };
        group.insert(key.clone(), node);
    }
    Ok(group)
}

/// Returns the JSON type name of a value.
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// SECTION: Loader
// ============================================================================

/// Reads locale message files from a directory.
#[derive(Debug, Clone)]
pub struct MessageLoader {
    /// Directory holding `<locale>.json` files.
    dir: PathBuf,
    /// Locales that may be loaded.
    registry: LocaleRegistry,
    /// Maximum file size in bytes.
    max_file_bytes: usize,
    /// Maximum group nesting depth.
    max_depth: usize,
}

impl MessageLoader {
    /// Creates a loader over `dir` with explicit limits.
    #[must_use]
    pub fn new(
        dir: impl Into<PathBuf>,
        registry: LocaleRegistry,
        max_file_bytes: usize,
        max_depth: usize,
    ) -> Self {
        Self {
            dir: dir.into(),
            registry,
            max_file_bytes,
            max_depth,
        }
    }

    /// Creates a loader from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError`] when the locale list is invalid.
    pub fn from_config(config: &MessagesConfig) -> Result<Self, crate::ConfigError> {
        Ok(Self::new(
            config.messages_dir(),
            config.registry()?,
            config.messages.max_file_bytes,
            config.messages.max_depth,
        ))
    }

    /// Returns the locale registry.
    #[must_use]
    pub const fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    /// Returns the message file path for a locale.
    #[must_use]
    pub fn locale_path(&self, locale: &LocaleTag) -> PathBuf {
        self.dir.join(format!("{locale}.json"))
    }

    /// Loads the message table for `locale`.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::UnsupportedLocale`] for locales outside the
    /// registry, and other [`LoaderError`] variants for unreadable or
    /// malformed files.
    pub fn load_locale(&self, locale: &str) -> Result<MessageTable, LoaderError> {
        let tag = self
            .registry
            .parse(locale)
            .ok_or_else(|| LoaderError::UnsupportedLocale(locale.to_string()))?;
        self.load_path(&self.locale_path(tag))
    }

    /// Loads every supported locale into a catalog.
    ///
    /// # Errors
    ///
    /// Returns the first [`LoaderError`] encountered.
    pub fn load_catalog(&self) -> Result<MessageCatalog, LoaderError> {
        let mut catalog = MessageCatalog::new(self.registry.clone());
        for tag in self.registry.supported() {
            let table = self.load_path(&self.locale_path(tag))?;
            catalog.insert(tag.clone(), table);
        }
        Ok(catalog)
    }

    /// Reads, size-checks, and converts one message file.
    fn load_path(&self, path: &Path) -> Result<MessageTable, LoaderError> {
        let io_error = |err: std::io::Error| LoaderError::Io {
            path: path.to_path_buf(),
            error: err.to_string(),
        };
        let size = fs::metadata(path).map_err(io_error)?.len();
        let size = usize::try_from(size).unwrap_or(usize::MAX);
        if size > self.max_file_bytes {
            return Err(LoaderError::TooLarge {
                path: path.to_path_buf(),
                size,
                limit: self.max_file_bytes,
            });
        }
        let bytes = fs::read(path).map_err(io_error)?;
        if bytes.len() > self.max_file_bytes {
            return Err(LoaderError::TooLarge {
                path: path.to_path_buf(),
                size: bytes.len(),
                limit: self.max_file_bytes,
            });
        }
        let content =
            std::str::from_utf8(&bytes).map_err(|_| LoaderError::NotUtf8(path.to_path_buf()))?;
        let value: Value = serde_json::from_str(content).map_err(|err| LoaderError::Json {
            path: path.to_path_buf(),
            error: err.to_string(),
        })?;
        table_from_json(&value, self.max_depth)
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Message tables keyed by locale.
///
/// # Invariants
/// - Every stored locale belongs to the registry.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    /// Locales the catalog may hold.
    registry: LocaleRegistry,
    /// Loaded tables.
    tables: BTreeMap<LocaleTag, MessageTable>,
}

impl MessageCatalog {
    /// Creates an empty catalog for `registry`.
    #[must_use]
    pub const fn new(registry: LocaleRegistry) -> Self {
        Self {
            registry,
            tables: BTreeMap::new(),
        }
    }

    /// Stores a table, returning the one it replaced.
    ///
    /// Tables for locales outside the registry are dropped and returned.
    pub fn insert(&mut self, locale: LocaleTag, table: MessageTable) -> Option<MessageTable> {
        if !self.registry.is_supported(locale.as_str()) {
            return Some(table);
        }
        self.tables.insert(locale, table)
    }

    /// Returns the registry.
    #[must_use]
    pub const fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    /// Returns the table for `locale`, tolerating case and region tags.
    #[must_use]
    pub fn table(&self, locale: &str) -> Option<&MessageTable> {
        let tag = self.registry.parse(locale)?;
        self.tables.get(tag)
    }

    /// Returns a translator for `namespace` in `locale`, labeled with the locale.
    #[must_use]
    pub fn translator<'a>(&'a self, locale: &str, namespace: &'a str) -> Option<Translator<'a>> {
        let tag = self.registry.parse(locale)?;
        let table = self.tables.get(tag)?;
        Some(table.translator(namespace).with_locale(tag.as_str()))
    }

    /// Iterates over loaded locales and their tables in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&LocaleTag, &MessageTable)> {
        self.tables.iter()
    }
}
