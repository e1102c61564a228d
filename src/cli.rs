//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and their validation
//! using the [clap](https://docs.rs/clap/) library.
//!
//! Helper methods on [`Cli`] accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).
//!
//! `-h` selects human-readable sizes, so help is only available as `--help`.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use dirtally::config::file::{FileConfig, expand_tilde};
use dirtally::config::{FanOut, OutputOptions, ScanOptions, depth_limit};
use dirtally::exclude::ExcludePatterns;

/// Command-line arguments for controlling directory scanning behavior.
#[derive(Parser)]
struct ScanningArgs {
    /// Maximum depth of reported directories (-1 = unlimited)
    ///
    /// 0 reports only the scan root, 1 adds its immediate subdirectories, and
    /// so on. Other negative values also report only the root. Deeper
    /// directories are still scanned and counted in their ancestors' totals.
    #[arg(short = 'd', long, allow_negative_numbers = true)]
    max_depth: Option<i64>,

    /// Directory name patterns to exclude (comma-separated globs)
    ///
    /// Matching directories are neither scanned nor counted. Patterns are
    /// shell globs tested against the bare directory name, e.g.
    /// `-e '.git,node_modules,*.cache'`. Can be given multiple times.
    #[arg(short = 'e', long, value_delimiter = ',', action = ArgAction::Append)]
    exclude: Vec<String>,

    /// The number of worker threads for the pool fan-out
    ///
    /// A value of 0 uses one thread per CPU core. Ignored with `--fan-out thread`.
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// How subdirectory scans are scheduled
    ///
    /// `pool` runs them on a bounded work-stealing pool; `thread` spawns one
    /// OS thread per subdirectory with no upper bound.
    #[arg(long, value_enum)]
    fan_out: Option<FanOut>,

    /// Include the underlying I/O error in diagnostics
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
#[derive(Parser)]
#[command(name = "dirtally")]
#[command(about = "Summarize disk usage per directory, largest first")]
#[command(version)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Directory to scan (defaults to the current directory)
    path: Option<PathBuf>,

    /// Print sizes in human-readable units (K, M, G, T)
    #[arg(short = 'h', long)]
    human_readable: bool,

    /// Output results as a single JSON object for scripting/piping
    #[arg(long)]
    json: bool,

    /// Show a progress spinner on stderr while scanning
    #[arg(long)]
    progress: bool,

    /// Scanning options
    #[command(flatten)]
    scanning: ScanningArgs,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    #[allow(dead_code)]
    help: Option<bool>,
}

impl Cli {
    /// Resolve the scan root from CLI args, config file, or default.
    ///
    /// Priority: CLI argument > config file `dir` > current directory (`.`).
    /// Tilde expansion is applied to the config file path.
    #[must_use]
    pub fn directory(&self, config: &FileConfig) -> PathBuf {
        if let Some(ref path) = self.path {
            return path.clone();
        }

        config
            .dir
            .as_deref()
            .map_or_else(|| PathBuf::from("."), expand_tilde)
    }

    /// Extract scanning options from CLI args and config file.
    ///
    /// - **`max_depth`**: CLI > config > unlimited
    /// - **exclude**: merged from both sources (config values first, then CLI)
    /// - **threads**: CLI > config > `0`
    /// - **`fan_out`**: CLI > config (case-insensitive) > `pool`
    /// - **verbose**: CLI flag `||` config value `||` `false`
    #[must_use]
    pub fn scan_options(&self, config: &FileConfig) -> ScanOptions {
        let mut exclude = config.scanning.exclude.clone().unwrap_or_default();
        exclude.extend(self.scanning.exclude.iter().cloned());

        ScanOptions {
            max_depth: self
                .scanning
                .max_depth
                .or(config.scanning.max_depth)
                .and_then(depth_limit),
            exclude: ExcludePatterns::new(exclude),
            threads: self
                .scanning
                .threads
                .or(config.scanning.threads)
                .unwrap_or(0),
            fan_out: self
                .scanning
                .fan_out
                .or_else(|| {
                    config
                        .scanning
                        .fan_out
                        .as_ref()
                        .and_then(|s| FanOut::from_str(s, true).ok())
                })
                .unwrap_or_default(),
            verbose: self.scanning.verbose || config.scanning.verbose.unwrap_or(false),
        }
    }

    /// Extract output options from CLI args and config file.
    ///
    /// Boolean flags set on the command line win; otherwise the config file
    /// value applies, then `false`. The spinner is never shown in JSON mode.
    #[must_use]
    pub fn output_options(&self, config: &FileConfig) -> OutputOptions {
        let json = self.json || config.output.json.unwrap_or(false);

        OutputOptions {
            human_readable: self.human_readable
                || config.output.human_readable.unwrap_or(false),
            json,
            progress: self.progress && !json,
        }
    }
}
