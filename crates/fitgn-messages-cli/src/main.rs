// crates/fitgn-messages-cli/src/main.rs
// ============================================================================
// Module: FitGN Messages CLI Entry Point
// Description: Command dispatcher for message lookup and catalog checks.
// Purpose: Provide a localized CLI over the FitGN message catalogs.
// Dependencies: clap, fitgn-messages, fitgn-messages-config, serde, thiserror.
// ============================================================================

//! ## Overview
//! The `fitgn-messages` CLI validates configuration, resolves single
//! messages as plain or rich text, and checks that every locale catalog stays
//! in parity with the default locale. All user-facing strings are routed
//! through the i18n catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use fitgn_messages::ComponentMap;
use fitgn_messages::MessageAuditSink;
use fitgn_messages::MessageTable;
use fitgn_messages::ParameterMap;
use fitgn_messages::Translator;
use fitgn_messages_cli::i18n::Locale;
use fitgn_messages_cli::i18n::set_locale;
use fitgn_messages_cli::t;
use fitgn_messages_config::LocaleTag;
use fitgn_messages_config::MessageLoader;
use fitgn_messages_config::MessagesConfig;
use fitgn_messages_config::ParityIssue;
use fitgn_messages_config::ParityReport;
use fitgn_messages_config::check_parity;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "FITGN_MESSAGES_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "fitgn-messages", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print the CLI version and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Output language for CLI messages.
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Resolve a message to plain text.
    Resolve(ResolveCommand),
    /// Resolve a message to rich-text segments (JSON).
    Rich(RichCommand),
    /// Check that every locale matches the default locale.
    Check(CheckCommand),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a config file.
    Validate(ConfigValidateCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to fitgn-messages.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Message selection shared by lookup commands.
#[derive(Args, Debug)]
struct MessageTarget {
    /// Optional config file path (defaults to fitgn-messages.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Locale to load (case-insensitive, region tags tolerated).
    #[arg(long, value_name = "LOCALE")]
    locale: String,
    /// Namespace to select.
    #[arg(long, value_name = "NAMESPACE")]
    namespace: String,
    /// Dotted message key.
    #[arg(long, value_name = "KEY")]
    key: String,
}

/// Arguments for `resolve`.
#[derive(Args, Debug)]
struct ResolveCommand {
    /// Message selection.
    #[command(flatten)]
    target: MessageTarget,
    /// Placeholder binding (repeatable).
    #[arg(long = "param", value_name = "NAME=VALUE")]
    params: Vec<String>,
}

/// Arguments for `rich`.
#[derive(Args, Debug)]
struct RichCommand {
    /// Message selection.
    #[command(flatten)]
    target: MessageTarget,
    /// Tag name to render as a node (repeatable).
    #[arg(long = "tag", value_name = "NAME")]
    tags: Vec<String>,
}

/// Arguments for `check`.
#[derive(Args, Debug)]
struct CheckCommand {
    /// Optional config file path (defaults to fitgn-messages.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Output formats for structured CLI commands.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum OutputFormat {
    /// JSON output.
    Json,
    /// Human-readable text output.
    Text,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Dutch.
    Nl,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Nl => Self::Nl,
        }
    }
}

/// Rendered rich-text node emitted by `rich`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct RichNode {
    /// Tag name that produced the node.
    tag: String,
    /// Verbatim tag content.
    content: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Config {
            command,
        } => command_config(command),
        Commands::Resolve(command) => command_resolve(&command),
        Commands::Rich(command) => command_rich(&command),
        Commands::Check(command) => command_check(&command),
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Validate(command) => command_config_validate(&command),
    }
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let registry =
        config.registry().map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    write_stdout_line(&t!(
        "config.validate.ok",
        count = registry.supported().len(),
        default = registry.default_locale()
    ))
    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Lookup Commands
// ============================================================================

/// Executes `resolve`.
fn command_resolve(command: &ResolveCommand) -> CliResult<ExitCode> {
    let params = build_params(&command.params)?;
    let text = with_translator(&command.target, |translator| {
        if params.is_empty() {
            translator.resolve(&command.target.key)
        } else {
            translator.resolve_with(&command.target.key, &params)
        }
    })?;
    write_stdout_line(&text).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `rich`.
fn command_rich(command: &RichCommand) -> CliResult<ExitCode> {
    let components = node_components(&command.tags);
    let segments = with_translator(&command.target, |translator| {
        translator.resolve_rich(&command.target.key, &components)
    })?;
    let output = serde_json::to_string_pretty(&segments)
        .map_err(|err| CliError::new(t!("rich.encode_failed", error = err)))?;
    write_stdout_line(&output).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Loads the target locale and runs `lookup` with an audited translator.
fn with_translator<R>(
    target: &MessageTarget,
    lookup: impl FnOnce(Translator<'_>) -> R,
) -> CliResult<R> {
    let config = load_config(target.config.as_deref())?;
    let loader = MessageLoader::from_config(&config)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let table: MessageTable = loader
        .load_locale(&target.locale)
        .map_err(|err| CliError::new(t!("messages.load_failed", error = err)))?;
    let audit: Box<dyn MessageAuditSink> = config
        .build_audit_sink()
        .map_err(|err| CliError::new(t!("audit.open_failed", error = err)))?;
    let locale =
        loader.registry().parse(&target.locale).map_or(target.locale.as_str(), LocaleTag::as_str);
    let translator = table.translator(&target.namespace).with_locale(locale).with_audit(&*audit);
    Ok(lookup(translator))
}

/// Parses repeated `name=value` arguments into a parameter map.
fn build_params(raw: &[String]) -> CliResult<ParameterMap> {
    let mut params = ParameterMap::new();
    for value in raw {
        let (name, bound) = parse_param(value)
            .ok_or_else(|| CliError::new(t!("resolve.param.invalid", value = value)))?;
        params.insert(name, bound);
    }
    Ok(params)
}

/// Splits one `name=value` argument; the name must be non-empty.
fn parse_param(raw: &str) -> Option<(&str, &str)> {
    let (name, value) = raw.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, value))
}

/// Registers a JSON node renderer for each requested tag.
fn node_components(tags: &[String]) -> ComponentMap<'_, RichNode> {
    let mut components = ComponentMap::new();
    for tag in tags {
        components.insert(tag.as_str(), move |content: &str| RichNode {
            tag: tag.clone(),
            content: content.to_string(),
        });
    }
    components
}

// ============================================================================
// SECTION: Parity Command
// ============================================================================

/// Executes `check`; exits with failure when any parity issue exists.
fn command_check(command: &CheckCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let loader = MessageLoader::from_config(&config)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))?;
    let catalog = loader
        .load_catalog()
        .map_err(|err| CliError::new(t!("messages.load_failed", error = err)))?;
    let report = check_parity(&catalog);
    match command.format {
        OutputFormat::Json => {
            let output = serde_json::to_string_pretty(&report)
                .map_err(|err| CliError::new(t!("check.encode_failed", error = err)))?;
            write_stdout_line(&output)
                .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        }
        OutputFormat::Text => {
            for line in report_lines(&report) {
                write_stdout_line(&line)
                    .map_err(|err| CliError::new(output_error("stdout", &err)))?;
            }
        }
    }
    Ok(if report.is_clean() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Formats a parity report as localized text lines.
fn report_lines(report: &ParityReport) -> Vec<String> {
    if report.is_clean() {
        return vec![t!(
            "check.ok",
            count = report.locales.len(),
            default = report.default_locale
        )];
    }
    let mut lines: Vec<String> = report.issues.iter().map(format_issue).collect();
    lines.push(t!("check.summary", count = report.issues.len()));
    lines
}

/// Formats one parity issue as a localized line.
fn format_issue(issue: &ParityIssue) -> String {
    match issue {
        ParityIssue::MissingLocale {
            locale,
        } => t!("check.issue.missing_locale", locale = locale),
        ParityIssue::MissingKey {
            locale,
            key,
        } => t!("check.issue.missing_key", locale = locale, key = key),
        ParityIssue::ExtraKey {
            locale,
            key,
        } => t!("check.issue.extra_key", locale = locale, key = key),
        ParityIssue::PlaceholderDrift {
            locale,
            key,
            expected,
            found,
        } => t!(
            "check.issue.placeholder_drift",
            locale = locale,
            key = key,
            expected = join_names(expected),
            found = join_names(found)
        ),
        ParityIssue::TagDrift {
            locale,
            key,
            expected,
            found,
        } => t!(
            "check.issue.tag_drift",
            locale = locale,
            key = key,
            expected = join_names(expected),
            found = join_names(found)
        ),
    }
}

/// Joins a name set with commas.
fn join_names(names: &BTreeSet<String>) -> String {
    names.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

// ============================================================================
// SECTION: Shared Helpers
// ============================================================================

/// Loads and validates configuration with a localized error.
fn load_config(path: Option<&Path>) -> CliResult<MessagesConfig> {
    MessagesConfig::load(path).map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

/// Resolves the output locale from the flag, then the environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
