//! Background collection of per-directory results.
//!
//! Traversal tasks push [`DirectoryResult`]s into a bounded channel while the
//! walk is still running. A single dedicated thread drains that channel into
//! a vector until every sender is dropped, and [`ResultCollector::finish`] is
//! the barrier that hands the complete vector back.

use std::{
    path::PathBuf,
    thread::{self, JoinHandle},
};

use anyhow::{Context, Result, anyhow};
use crossbeam_channel::{Sender, bounded};

/// Default capacity of the result channel.
pub const RESULT_BUFFER: usize = 1000;

/// Total size of one directory, including everything beneath it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectoryResult {
    /// Directory path, relative to wherever the scan root was given
    pub path: PathBuf,

    /// Total bytes of all files in the directory and its non-excluded descendants
    pub size: u64,
}

impl DirectoryResult {
    /// Create a result for `path` with total `size` bytes.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Single consumer draining the result stream on its own thread.
///
/// The consumer lives outside any worker pool, so producers blocked on a full
/// buffer always make progress.
#[derive(Debug)]
pub struct ResultCollector {
    handle: JoinHandle<Vec<DirectoryResult>>,
}

impl ResultCollector {
    /// Start the collector thread with a channel of the given capacity.
    ///
    /// Returns the sending half (clone it freely) and the collector handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the collector thread cannot be spawned.
    pub fn spawn(capacity: usize) -> Result<(Sender<DirectoryResult>, Self)> {
        let (sender, receiver) = bounded::<DirectoryResult>(capacity);

        let handle = thread::Builder::new()
            .name("result-collector".to_string())
            .spawn(move || receiver.into_iter().collect())
            .context("Failed to spawn result collector thread")?;

        Ok((sender, Self { handle }))
    }

    /// Wait for the stream to close and return everything it carried.
    ///
    /// Every [`Sender`] must be dropped first, otherwise this blocks forever.
    ///
    /// # Errors
    ///
    /// Returns an error if the collector thread panicked.
    pub fn finish(self) -> Result<Vec<DirectoryResult>> {
        self.handle
            .join()
            .map_err(|_| anyhow!("Result collector thread panicked"))
    }
}
