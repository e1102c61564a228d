//! # dirtally
//!
//! A fast CLI tool that reports how much disk space each directory under a
//! root uses, largest first.
//!
//! Every subdirectory is scanned as its own parallel task; a directory's total
//! is the size of its files plus the totals of all its non-excluded
//! subdirectories.
//!
//! ## Usage
//!
//! ```bash
//! # Raw byte counts for every directory under the current one
//! dirtally
//!
//! # Human-readable sizes, only the root and its immediate children
//! dirtally -h -d 1 ~/Projects
//!
//! # Skip VCS metadata and dependency folders entirely
//! dirtally -e '.git,node_modules,target' .
//! ```

mod cli;

use std::{fs, path::PathBuf, process::exit};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use dirtally::{config::FileConfig, output::JsonOutput, output::render_lines, scanner::Scanner};

/// Entry point for the dirtally application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("{} {err}", "Error:".red());

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Parses arguments, checks the scan root, runs the scan, and prints either
/// the text report or the JSON document.
///
/// # Errors
///
/// Returns errors from config subcommands, thread-pool setup, the result
/// collector, or JSON serialization.
fn inner_main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let file_config = load_config();
    let root = args.directory(&file_config);
    let scan_options = args.scan_options(&file_config);
    let output_options = args.output_options(&file_config);

    if !root.is_dir() {
        println!("Path doesn't exist");
        exit(1);
    }

    let verbose = scan_options.verbose;
    let scanner = Scanner::new(scan_options).with_progress(output_options.progress);
    let report = scanner.scan_directory(&root)?;

    if output_options.json {
        let output = JsonOutput::from_report(report, verbose);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for issue in &report.issues {
        println!("{}", issue.describe(verbose));
    }

    for line in render_lines(report.results, output_options.human_readable) {
        println!("{line}");
    }

    Ok(())
}

// ── Config subcommand ────────────────────────────────────────────────

/// Commented-out defaults written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# dirtally configuration
# Every key is optional; uncomment one to override its default.

# Scan root used when no path is given on the command line
# dir = "."

[scanning]
# Directory name patterns (shell globs) to exclude from scanning and totals
# exclude = []

# Maximum depth of reported directories (-1 = unlimited, 0 = root only)
# max_depth = -1

# Number of worker threads for the pool fan-out (0 = all CPU cores)
# threads = 0

# Subdirectory scheduling: "pool" (bounded) or "thread" (one thread each)
# fan_out = "pool"

# Include the underlying I/O error in diagnostics
# verbose = false

[output]
# Print sizes as 1.50K / 2.00M / ... instead of raw bytes
# human_readable = false

# Print a single JSON document instead of text lines
# json = false
"#;

fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => println!("{}", require_config_path()?.display()),
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

fn require_config_path() -> Result<PathBuf> {
    FileConfig::config_path().context("No config directory is known for this platform")
}

/// Print where the config lives and the settings it resolves to.
fn show_config() -> Result<()> {
    let path = require_config_path()?;

    if path.is_file() {
        println!("# {} (loaded)", path.display());
    } else {
        println!("# {} (absent, built-in defaults)", path.display());
    }
    println!();
    println!("{}", format_config(&FileConfig::load_from(&path)?));

    Ok(())
}

/// Render each config key with its value, marking keys that fall back to a default.
fn format_config(config: &FileConfig) -> String {
    fn show<T: ToString>(val: Option<T>, default: &str) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }
    fn show_list(val: Option<&[String]>) -> String {
        match val {
            Some(patterns) if !patterns.is_empty() => format!("{patterns:?}"),
            _ => "[]  (default)".to_string(),
        }
    }

    format!(
        "\
dir            = {dir}

[scanning]
exclude        = {exclude}
max_depth      = {max_depth}
threads        = {threads}
fan_out        = {fan_out}
verbose        = {verbose}

[output]
human_readable = {human_readable}
json           = {json}",
        dir = show(
            config.dir.as_ref().map(|p| format!("\"{}\"", p.display())),
            "\".\""
        ),
        exclude = show_list(config.scanning.exclude.as_deref()),
        max_depth = show(config.scanning.max_depth, "-1 (unlimited)"),
        threads = show(config.scanning.threads, "0 (all cores)"),
        fan_out = show(
            config.scanning.fan_out.as_ref().map(|v| format!("\"{v}\"")),
            "\"pool\""
        ),
        verbose = show(config.scanning.verbose, "false"),
        human_readable = show(config.output.human_readable, "false"),
        json = show(config.output.json, "false"),
    )
}

/// Create `config.toml` from [`CONFIG_TEMPLATE`], leaving an existing file untouched.
fn init_config() -> Result<()> {
    let path = require_config_path()?;

    if path.exists() {
        println!("{} already exists; delete it to start over", path.display());
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Created {}", path.display());
    Ok(())
}

/// Read the user's config, warning and using defaults if it is unusable.
fn load_config() -> FileConfig {
    FileConfig::load().unwrap_or_else(|e| {
        eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
        FileConfig::default()
    })
}
