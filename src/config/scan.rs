//! Scanning configuration for directory traversal.
//!
//! This module defines the options that control how a directory tree is
//! walked: which directories are excluded, how deep results are reported,
//! and how traversal tasks are scheduled.

use clap::ValueEnum;

use crate::exclude::ExcludePatterns;

/// Strategy used to run one traversal task per subdirectory.
#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum, Default)]
pub enum FanOut {
    /// Run subdirectory tasks on a bounded work-stealing thread pool
    #[default]
    Pool,

    /// Spawn one OS thread per subdirectory, with no upper bound
    Thread,
}

/// Configuration for directory scanning behavior.
///
/// Immutable once built; the walker borrows it for the whole scan so every
/// traversal task reads the same values without synchronization.
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    /// Maximum depth of reported results (None = unlimited)
    ///
    /// `Some(0)` reports nothing below the root; `Some(1)` reports the
    /// root's immediate children, and so on. Subtrees below the limit are
    /// still scanned and summed.
    pub max_depth: Option<usize>,

    /// Directory name patterns to skip entirely
    pub exclude: ExcludePatterns,

    /// Number of pool threads (0 = one per CPU core); ignored by [`FanOut::Thread`]
    pub threads: usize,

    /// How subdirectory tasks are scheduled
    pub fan_out: FanOut,

    /// Whether diagnostics include the underlying I/O error
    pub verbose: bool,
}

impl ScanOptions {
    /// Whether a child of a directory at `depth` belongs in the result stream.
    #[must_use]
    pub fn reports_children_of(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth < max)
    }
}

/// Convert a signed depth flag into a limit.
///
/// `-1` means unlimited. Any other negative value admits no depth at all,
/// so only the root is reported.
///
/// # Examples
///
/// ```
/// # use dirtally::config::depth_limit;
/// assert_eq!(depth_limit(-1), None);
/// assert_eq!(depth_limit(-2), Some(0));
/// assert_eq!(depth_limit(2), Some(2));
/// ```
#[must_use]
pub fn depth_limit(raw: i64) -> Option<usize> {
    match raw {
        -1 => None,
        i64::MIN..=-2 => Some(0),
        _ => Some(usize::try_from(raw).unwrap_or(usize::MAX)),
    }
}
