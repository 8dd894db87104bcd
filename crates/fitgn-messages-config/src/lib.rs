// crates/fitgn-messages-config/src/lib.rs
// ============================================================================
// Module: FitGN Messages Config Library
// Description: Config model, locale registry, message loading, and parity.
// Purpose: Single source of truth for fitgn-messages.toml semantics.
// Dependencies: fitgn-messages, serde, serde_json, toml
// ============================================================================

//! ## Overview
//! `fitgn-messages-config` wires the lookup engine to disk. It validates
//! `fitgn-messages.toml`, decides which locales are served, loads
//! `<dir>/<locale>.json` files into [`fitgn_messages::MessageTable`]s, and
//! checks that every locale stays in step with the default locale.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod loader;
pub mod locale;
pub mod parity;

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::AuditConfig;
pub use config::AuditSinkKind;
pub use config::CONFIG_ENV_VAR;
pub use config::ConfigError;
pub use config::LocaleConfig;
pub use config::MessageSourceConfig;
pub use config::MessagesConfig;
pub use loader::LoaderError;
pub use loader::MessageCatalog;
pub use loader::MessageLoader;
pub use loader::table_from_json;
pub use locale::DEFAULT_LOCALE;
pub use locale::DEFAULT_SUPPORTED_LOCALES;
pub use locale::LocaleError;
pub use locale::LocaleRegistry;
pub use locale::LocaleTag;
pub use parity::ParityIssue;
pub use parity::ParityReport;
pub use parity::check_parity;
