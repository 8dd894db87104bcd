// crates/fitgn-messages-config/src/config.rs
// ============================================================================
// Module: FitGN Messages Configuration
// Description: Configuration loading and validation for message catalogs.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: fitgn-messages, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Unknown fields, malformed locales, and out-of-range limits fail closed.
//! Relative paths in the file resolve against the directory holding it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use fitgn_messages::FileAuditSink;
use fitgn_messages::MessageAuditSink;
use fitgn_messages::NoopAuditSink;
use fitgn_messages::StderrAuditSink;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::locale::DEFAULT_LOCALE;
use crate::locale::DEFAULT_SUPPORTED_LOCALES;
use crate::locale::LocaleRegistry;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "fitgn-messages.toml";
/// Environment variable overriding the configuration path.
pub const CONFIG_ENV_VAR: &str = "FITGN_MESSAGES_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum length of a full path.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default maximum size of one locale message file.
pub(crate) const DEFAULT_MAX_FILE_BYTES: usize = 1024 * 1024;
/// Upper bound for `messages.max_file_bytes`.
pub(crate) const MAX_MAX_FILE_BYTES: usize = 16 * 1024 * 1024;
/// Default maximum group nesting of a locale message file.
pub(crate) const DEFAULT_MAX_DEPTH: usize = 32;
/// Upper bound for `messages.max_depth`.
pub(crate) const MAX_MAX_DEPTH: usize = 128;
/// Default message directory.
const DEFAULT_MESSAGES_DIR: &str = "messages";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// FitGN messages configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessagesConfig {
    /// Supported and default locales.
    #[serde(default)]
    pub locales: LocaleConfig,
    /// Message file source settings.
    #[serde(default)]
    pub messages: MessageSourceConfig,
    /// Degraded-lookup audit settings.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Directory of the loaded config file (not serialized).
    #[serde(skip)]
    pub source_dir: Option<PathBuf>,
}

impl MessagesConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::from_toml_str(content)?;
        config.source_dir = resolved.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.locales.registry()?;
        self.messages.validate()?;
        self.audit.validate()
    }

    /// Returns the locale registry described by `[locales]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the locale list is invalid.
    pub fn registry(&self) -> Result<LocaleRegistry, ConfigError> {
        self.locales.registry()
    }

    /// Returns the message directory, resolved against the config file location.
    #[must_use]
    pub fn messages_dir(&self) -> PathBuf {
        self.resolve_relative(&self.messages.dir)
    }

    /// Builds the audit sink described by `[audit]`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the audit file cannot be opened.
    pub fn build_audit_sink(&self) -> Result<Box<dyn MessageAuditSink>, ConfigError> {
        self.audit.build_sink(self.source_dir.as_deref())
    }

    /// Joins a relative path onto the config source directory.
    fn resolve_relative(&self, value: &str) -> PathBuf {
        let path = Path::new(value.trim());
        match &self.source_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Supported locale configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleConfig {
    /// Supported locale tags in presentation order.
    #[serde(default = "default_supported_locales")]
    pub supported: Vec<String>,
    /// Locale served when a request names none.
    #[serde(default = "default_locale")]
    pub default: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            supported: default_supported_locales(),
            default: default_locale(),
        }
    }
}

impl LocaleConfig {
    /// Builds the validated locale registry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the locale list is invalid.
    pub fn registry(&self) -> Result<LocaleRegistry, ConfigError> {
        LocaleRegistry::new(&self.supported, &self.default)
            .map_err(|err| ConfigError::Invalid(format!("locales: {err}")))
    }
}

/// Message file source configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageSourceConfig {
    /// Directory holding `<locale>.json` files.
    #[serde(default = "default_messages_dir")]
    pub dir: String,
    /// Maximum size of one locale file in bytes.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,
    /// Maximum group nesting depth of one locale file.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for MessageSourceConfig {
    fn default() -> Self {
        Self {
            dir: default_messages_dir(),
            max_file_bytes: default_max_file_bytes(),
            max_depth: default_max_depth(),
        }
    }
}

impl MessageSourceConfig {
    /// Validates message source limits.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("messages.dir", &self.dir)?;
        if !(1 ..= MAX_MAX_FILE_BYTES).contains(&self.max_file_bytes) {
            return Err(ConfigError::Invalid(format!(
                "messages.max_file_bytes must be between 1 and {MAX_MAX_FILE_BYTES}"
            )));
        }
        if !(1 ..= MAX_MAX_DEPTH).contains(&self.max_depth) {
            return Err(ConfigError::Invalid(format!(
                "messages.max_depth must be between 1 and {MAX_MAX_DEPTH}"
            )));
        }
        Ok(())
    }
}

/// Audit sink selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Discard events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to `audit.path`.
    File,
}

/// Degraded-lookup audit configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Selected sink.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Audit log path (JSON lines), required for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, &self.path) {
            (AuditSinkKind::File, Some(path)) => validate_path_string("audit.path", path),
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for the file sink".to_string()))
            }
            (_, Some(_)) => {
                Err(ConfigError::Invalid("audit.path is only valid for the file sink".to_string()))
            }
            (_, None) => Ok(()),
        }
    }

    /// Builds the configured sink; relative file paths resolve against `base`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file sink is misconfigured or cannot
    /// be opened.
    pub fn build_sink(&self, base: Option<&Path>) -> Result<Box<dyn MessageAuditSink>, ConfigError> {
        match self.sink {
            AuditSinkKind::None => Ok(Box::new(NoopAuditSink)),
            AuditSinkKind::Stderr => Ok(Box::new(StderrAuditSink)),
            AuditSinkKind::File => {
                let Some(path) = self.path.as_deref() else {
                    return Err(ConfigError::Invalid(
                        "audit.path is required for the file sink".to_string(),
                    ));
                };
                let path = Path::new(path.trim());
                let path = match base {
                    Some(base) if path.is_relative() => base.join(path),
                    _ => path.to_path_buf(),
                };
                let sink =
                    FileAuditSink::new(&path).map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Box::new(sink))
            }
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Default supported locales.
fn default_supported_locales() -> Vec<String> {
    DEFAULT_SUPPORTED_LOCALES.iter().map(|tag| (*tag).to_string()).collect()
}

/// Default locale.
fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

/// Default message directory.
fn default_messages_dir() -> String {
    DEFAULT_MESSAGES_DIR.to_string()
}

/// Default maximum message file size.
const fn default_max_file_bytes() -> usize {
    DEFAULT_MAX_FILE_BYTES
}

/// Default maximum group nesting.
const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}
