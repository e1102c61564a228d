//! Configuration file support for persistent settings.
//!
//! This module loads configuration from a TOML file located at
//! `~/.config/dirtally/config.toml` (or the platform-specific equivalent).
//! Configuration file values serve as defaults that can be overridden by CLI
//! arguments.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! dir = "~/data"
//!
//! [scanning]
//! exclude = [".git", "node_modules"]
//! max_depth = 2
//! threads = 4
//! fan_out = "pool"
//! verbose = false
//!
//! [output]
//! human_readable = true
//! json = false
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;

/// The parsed `config.toml`.
///
/// Every key is optional; an absent key means "defer to the built-in default"
/// and a CLI flag always wins over a present one.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Default directory to scan
    pub dir: Option<PathBuf>,

    /// Scanning options
    #[serde(default)]
    pub scanning: FileScanConfig,

    /// Output options
    #[serde(default)]
    pub output: FileOutputConfig,
}

/// Scanning options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileScanConfig {
    /// Directory name patterns to exclude
    pub exclude: Option<Vec<String>>,

    /// Maximum depth of reported results (-1 = unlimited)
    pub max_depth: Option<i64>,

    /// Number of pool threads
    pub threads: Option<usize>,

    /// Fan-out strategy (`"pool"` or `"thread"`)
    pub fan_out: Option<String>,

    /// Whether to include I/O error causes in diagnostics
    pub verbose: Option<bool>,
}

/// Output options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileOutputConfig {
    /// Whether to print human-readable sizes
    pub human_readable: Option<bool>,

    /// Whether to print JSON
    pub json: Option<bool>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
///
/// # Examples
///
/// ```
/// # use std::path::PathBuf;
/// # use dirtally::config::file::expand_tilde;
/// let absolute = PathBuf::from("/absolute/path");
/// assert_eq!(expand_tilde(&absolute), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// The configuration file is located at `<config_dir>/dirtally/config.toml`,
    /// where `<config_dir>` is the platform-specific configuration directory
    /// (e.g., `~/.config` on Linux, `%APPDATA%` on Windows).
    ///
    /// Returns `None` if the config directory cannot be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dirtally").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// If the config file doesn't exist, returns a default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read, or
    /// contains invalid TOML or unexpected fields.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file path.
    ///
    /// A missing file yields the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read config file at {}", path.display()));
            }
        };

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))
    }
}
