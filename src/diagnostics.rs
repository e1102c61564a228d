//! Recoverable failures encountered while walking a tree.
//!
//! A failure here never aborts a scan. The affected directory or file simply
//! contributes nothing to its ancestors' totals, and one [`ScanIssue`] is
//! recorded so the caller can print a diagnostic line for it.

use std::{
    fmt, io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

/// A single directory or file that could not be measured.
#[derive(Debug)]
pub enum ScanIssue {
    /// The directory could not be listed (or an entry of it could not be read)
    UnreadableDir {
        /// Directory being listed
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A non-directory entry's metadata could not be read
    UnreadableFile {
        /// Path of the entry
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
}

impl ScanIssue {
    /// Path of the directory or file this issue is about.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::UnreadableDir { path, .. } | Self::UnreadableFile { path, .. } => path,
        }
    }

    /// The I/O error that caused this issue.
    #[must_use]
    pub const fn source(&self) -> &io::Error {
        match self {
            Self::UnreadableDir { source, .. } | Self::UnreadableFile { source, .. } => source,
        }
    }

    /// Render the diagnostic line, optionally followed by the I/O error cause.
    #[must_use]
    pub fn describe(&self, verbose: bool) -> String {
        if verbose {
            format!("{self} ({})", self.source())
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for ScanIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnreadableDir { path, .. } => write!(f, "Can't read dir: {}", path.display()),
            Self::UnreadableFile { path, .. } => {
                write!(f, "Can't get file info: {}", path.display())
            }
        }
    }
}

/// Thread-safe sink that traversal tasks push issues into.
#[derive(Debug, Default)]
pub struct IssueLog {
    issues: Mutex<Vec<ScanIssue>>,
}

impl IssueLog {
    /// Record an issue. A poisoned lock is recovered rather than propagated.
    pub fn push(&self, issue: ScanIssue) {
        self.issues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(issue);
    }

    /// Take every recorded issue, ordered by path.
    #[must_use]
    pub fn into_sorted(self) -> Vec<ScanIssue> {
        let mut issues = self
            .issues
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        issues.sort_by(|a, b| a.path().cmp(b.path()));
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn denied() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "permission denied")
    }

    #[test]
    fn test_unreadable_dir_message() {
        let issue = ScanIssue::UnreadableDir {
            path: PathBuf::from("/data/locked"),
            source: denied(),
        };

        assert_eq!(issue.to_string(), "Can't read dir: /data/locked");
        assert_eq!(issue.path(), Path::new("/data/locked"));
    }

    #[test]
    fn test_unreadable_file_message() {
        let issue = ScanIssue::UnreadableFile {
            path: PathBuf::from("data/gone.bin"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };

        assert_eq!(issue.to_string(), "Can't get file info: data/gone.bin");
    }

    #[test]
    fn test_describe_verbose_appends_cause() {
        let issue = ScanIssue::UnreadableDir {
            path: PathBuf::from("x"),
            source: denied(),
        };

        assert_eq!(issue.describe(false), "Can't read dir: x");
        assert_eq!(issue.describe(true), "Can't read dir: x (permission denied)");
    }

    #[test]
    fn test_issue_log_sorts_by_path() {
        let log = IssueLog::default();
        for name in ["c", "a", "b"] {
            log.push(ScanIssue::UnreadableFile {
                path: PathBuf::from(name),
                source: denied(),
            });
        }

        let paths: Vec<_> = log
            .into_sorted()
            .iter()
            .map(|issue| issue.path().to_path_buf())
            .collect();
        assert_eq!(
            paths,
            vec![PathBuf::from("a"), PathBuf::from("b"), PathBuf::from("c")]
        );
    }

    #[test]
    fn test_issue_log_is_shared_across_threads() {
        let log = IssueLog::default();

        std::thread::scope(|s| {
            for i in 0..8 {
                let log = &log;
                s.spawn(move || {
                    log.push(ScanIssue::UnreadableDir {
                        path: PathBuf::from(format!("dir{i}")),
                        source: denied(),
                    });
                });
            }
        });

        assert_eq!(log.into_sorted().len(), 8);
    }
}
