//! Recursive, concurrent directory size aggregation.
//!
//! The walker lists a directory, sums the sizes of its non-directory entries,
//! and runs one traversal task per non-excluded subdirectory. A directory's
//! total is only known once every child task has joined, so totals are
//! computed bottom-up. Each child's total is also pushed into the result
//! stream as soon as it is known, subject to the reporting depth limit.
//!
//! The root directory is never reported by the recursion itself;
//! [`Scanner::scan_directory`] emits it after the walk returns.

use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
    thread,
    time::Duration,
};

use anyhow::{Context, Result};
use crossbeam_channel::Sender;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    collector::{DirectoryResult, RESULT_BUFFER, ResultCollector},
    config::{FanOut, ScanOptions},
    diagnostics::{IssueLog, ScanIssue},
    utils::clean_path,
};

/// Stack size for pool threads. Work stealing inside a blocked scope can nest
/// unrelated subtrees on one stack.
const POOL_STACK_SIZE: usize = 16 * 1024 * 1024;

/// Everything a finished scan produced.
#[derive(Debug)]
pub struct ScanReport {
    /// The scan root, exactly as given
    pub root: PathBuf,

    /// Total bytes under the root
    pub total_size: u64,

    /// One entry per reported directory (root included), in arrival order
    pub results: Vec<DirectoryResult>,

    /// Recoverable failures, ordered by path
    pub issues: Vec<ScanIssue>,
}

/// Directory scanner computing per-directory disk usage.
///
/// The `Scanner` owns the scan configuration and drives one complete walk:
/// it starts the result collector, runs the recursive walk with the
/// configured fan-out strategy, emits the root's own total, and waits for the
/// collector to drain before returning.
#[derive(Debug)]
pub struct Scanner {
    /// Configuration options for scanning behavior
    scan_options: ScanOptions,

    /// Whether to draw a progress spinner on stderr
    progress: bool,

    /// Capacity of the result channel
    buffer: usize,
}

impl Scanner {
    /// Create a new scanner with the specified options.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use std::path::Path;
    /// # use dirtally::{config::ScanOptions, scanner::Scanner};
    /// let scanner = Scanner::new(ScanOptions::default());
    /// let report = scanner.scan_directory(Path::new(".")).unwrap();
    /// println!("{} bytes", report.total_size);
    /// ```
    #[must_use]
    pub const fn new(scan_options: ScanOptions) -> Self {
        Self {
            scan_options,
            progress: false,
            buffer: RESULT_BUFFER,
        }
    }

    /// Enable or disable the stderr progress spinner.
    #[must_use]
    pub const fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Override the result channel capacity (minimum 1).
    #[must_use]
    pub fn with_buffer(mut self, capacity: usize) -> Self {
        self.buffer = capacity.max(1);
        self
    }

    /// Scan a directory tree and collect per-directory totals.
    ///
    /// Unreadable directories and files never abort the scan; they are
    /// returned as [`ScanReport::issues`] and contribute nothing to totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker pool or the collector thread cannot be
    /// started, or if the collector thread panics.
    pub fn scan_directory(&self, root: &Path) -> Result<ScanReport> {
        let pool = match self.scan_options.fan_out {
            FanOut::Pool => Some(self.build_pool()?),
            FanOut::Thread => None,
        };

        let progress = self.progress_bar();
        let (sender, collector) = ResultCollector::spawn(self.buffer)?;

        let walker = Walker {
            options: &self.scan_options,
            results: sender,
            issues: IssueLog::default(),
            progress: &progress,
        };

        let total_size = match &pool {
            Some(pool) => pool.install(|| walker.scan(root, 0)),
            None => walker.scan(root, 0),
        };
        walker.emit(DirectoryResult::new(root, total_size));

        // Dropping the last sender closes the stream
        let Walker {
            results: sender,
            issues,
            ..
        } = walker;
        drop(sender);

        let results = collector.finish()?;
        progress.finish_and_clear();

        Ok(ScanReport {
            root: root.to_path_buf(),
            total_size,
            results,
            issues: issues.into_sorted(),
        })
    }

    fn build_pool(&self) -> Result<rayon::ThreadPool> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.scan_options.threads)
            .thread_name(|i| format!("scan-{i}"))
            .stack_size(POOL_STACK_SIZE)
            .build()
            .context("Failed to build scan thread pool")
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} Scanning... {pos} directories")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

/// Per-scan state shared read-only (or through synchronized handles) by
/// every traversal task.
struct Walker<'a> {
    options: &'a ScanOptions,
    results: Sender<DirectoryResult>,
    issues: IssueLog,
    progress: &'a ProgressBar,
}

impl Walker<'_> {
    /// Measure `path` and everything below it, returning its total in bytes.
    ///
    /// `depth` is the distance from the scan root (root = 0). Child paths
    /// are built from the cleaned root, so a `.` root yields `sub`, not `./sub`.
    fn scan(&self, path: &Path, depth: usize) -> u64 {
        let entries = match fs::read_dir(path) {
            Ok(entries) => entries,
            Err(source) => {
                self.issues.push(ScanIssue::UnreadableDir {
                    path: path.to_path_buf(),
                    source,
                });
                return 0;
            }
        };
        self.progress.inc(1);

        let base = if depth == 0 {
            Cow::Owned(clean_path(path))
        } else {
            Cow::Borrowed(path)
        };
        let mut files_size = 0u64;
        let mut subdirs = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    self.issues.push(ScanIssue::UnreadableDir {
                        path: path.to_path_buf(),
                        source,
                    });
                    continue;
                }
            };

            // Symlinks are classified as themselves, never followed
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                let name = entry.file_name();
                if !self.options.exclude.matches(&name) {
                    subdirs.push(base.join(name));
                }
                continue;
            }

            match entry.metadata() {
                Ok(metadata) => files_size += metadata.len(),
                Err(source) => self.issues.push(ScanIssue::UnreadableFile {
                    path: base.join(entry.file_name()),
                    source,
                }),
            }
        }

        files_size + self.scan_subdirs(&subdirs, depth)
    }

    /// Run one task per subdirectory and return the sum of their totals.
    ///
    /// Returns only after every task has finished.
    fn scan_subdirs(&self, subdirs: &[PathBuf], depth: usize) -> u64 {
        if subdirs.is_empty() {
            return 0;
        }

        let subdirs_size = AtomicU64::new(0);
        let report = self.options.reports_children_of(depth);

        let visit = |subdir: &Path| {
            let size = self.scan(subdir, depth + 1);
            subdirs_size.fetch_add(size, Ordering::Relaxed);
            if report {
                self.emit(DirectoryResult::new(subdir, size));
            }
        };
        let visit = &visit;

        match self.options.fan_out {
            FanOut::Pool => rayon::scope(|s| {
                for subdir in subdirs {
                    let subdir = subdir.as_path();
                    s.spawn(move |_| visit(subdir));
                }
            }),
            FanOut::Thread => thread::scope(|s| {
                for subdir in subdirs {
                    let subdir = subdir.as_path();
                    let spawned = thread::Builder::new().spawn_scoped(s, move || visit(subdir));
                    if spawned.is_err() {
                        // Out of threads: measure this subtree on the current one
                        visit(subdir);
                    }
                }
            }),
        }

        subdirs_size.into_inner()
    }

    fn emit(&self, result: DirectoryResult) {
        // Only fails once the collector thread is gone, which `finish` reports
        let _ = self.results.send(result);
    }
}
