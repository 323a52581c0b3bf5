//! Library half of `paramctl`.
//!
//! Argument definitions and command execution live here so they can be
//! exercised by tests; `main.rs` only installs logging and forwards to
//! [`run`].
//!
//! # Usage
//!
//! ```text
//! paramctl [--log-level <LEVEL>] <COMMAND>
//!
//! Commands:
//!   get     <FILE> <KEY>           Print one value as JSON
//!   set     <FILE> <KEY> <VALUE>   Set a value (JSON literal or plain string)
//!   remove  <FILE> <KEY>           Remove a value; fails if it is not set
//!   list    <FILE>                 Print every `key = value` pair
//!   clear   <FILE>                 Remove every value
//!   formats                        Print the registered file extensions
//! ```
//!
//! The file format is chosen by the file's extension through the
//! process-wide registry.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use param_core::{registry, ParamHandler, ParamValue, TomlFormat};
use tracing::{debug, info};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Inspect and edit key-value parameter files (JSON, binary, TOML).
#[derive(Debug, Parser)]
#[command(name = "paramctl", version, about)]
pub struct Cli {
    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, env = "PARAMCTL_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the value stored under KEY.
    Get { file: PathBuf, key: String },

    /// Store VALUE under KEY, creating the file if needed.
    Set {
        file: PathBuf,
        key: String,
        value: String,
        /// Store VALUE verbatim instead of parsing it as JSON.
        #[arg(long)]
        string: bool,
    },

    /// Remove KEY from the file.
    Remove { file: PathBuf, key: String },

    /// Print every parameter in the file.
    List { file: PathBuf },

    /// Remove every parameter from the file.
    Clear { file: PathBuf },

    /// Print the registered file extensions.
    Formats,
}

// ── Setup ─────────────────────────────────────────────────────────────────────

/// Adds the formats `paramctl` supports on top of the built-ins.
///
/// # Errors
///
/// Propagates registration failures.
pub fn register_formats() -> anyhow::Result<()> {
    registry::global()
        .register_format::<TomlFormat>("toml")
        .context("failed to register TOML format")
}

/// Parses a command-line value: JSON literals (`42`, `true`, `[1,2]`, `"x"`)
/// keep their type, anything else becomes a string.
pub fn parse_value(raw: &str) -> ParamValue {
    serde_json::from_str(raw).unwrap_or_else(|_| ParamValue::String(raw.to_string()))
}

// ── Command execution ─────────────────────────────────────────────────────────

/// Executes `cli.command`, writing human-readable output to `out`.
///
/// # Errors
///
/// Returns an error if the file's format is unknown, the file cannot be read
/// or written, or a requested key is not set.
pub fn run(cli: &Cli, out: &mut dyn Write) -> anyhow::Result<()> {
    match &cli.command {
        Command::Get { file, key } => {
            let handler = load(file)?;
            match handler.get_param(key) {
                Some(value) => writeln!(out, "{value}")?,
                None => bail!("parameter \"{key}\" is not set in {}", file.display()),
            }
        }

        Command::Set {
            file,
            key,
            value,
            string,
        } => {
            let mut handler = load_or_empty(file)?;
            let value = if *string {
                ParamValue::String(value.clone())
            } else {
                parse_value(value)
            };
            debug!(%key, kind = value.type_name(), "setting parameter");
            handler.add_param(key, value);
            save(handler.as_ref())?;
        }

        Command::Remove { file, key } => {
            let mut handler = load(file)?;
            let removed = handler.remove_param(key)?;
            save(handler.as_ref())?;
            writeln!(out, "{removed}")?;
        }

        Command::List { file } => {
            let handler = load(file)?;
            for (key, value) in handler.get_all_params() {
                writeln!(out, "{key} = {value}")?;
            }
        }

        Command::Clear { file } => {
            let mut handler = registry::create(file)?;
            handler.remove_all_params();
            save(handler.as_ref())?;
        }

        Command::Formats => {
            for extension in registry::global().extensions() {
                writeln!(out, "{extension}")?;
            }
        }
    }
    Ok(())
}

fn load(file: &Path) -> anyhow::Result<Box<dyn ParamHandler>> {
    let mut handler = registry::create(file)?;
    handler
        .read()
        .with_context(|| format!("failed to load {}", file.display()))?;
    Ok(handler)
}

/// Like [`load`], but a file that does not exist yet yields an empty handler.
fn load_or_empty(file: &Path) -> anyhow::Result<Box<dyn ParamHandler>> {
    if file.exists() {
        load(file)
    } else {
        info!(path = %file.display(), "file does not exist; starting empty");
        Ok(registry::create(file)?)
    }
}

fn save(handler: &dyn ParamHandler) -> anyhow::Result<()> {
    handler
        .write()
        .with_context(|| format!("failed to save {}", handler.source().display()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
