//! Report rendering, as text lines or a single JSON document.
//!
//! Results arrive from the collector in completion order. Rendering is the
//! one place a total order is imposed: largest directory first.

use serde::Serialize;

use crate::{collector::DirectoryResult, scanner::ScanReport, utils::format_size};

/// Sort results by size, largest first. Ties keep their arrival order.
pub fn sort_results(results: &mut [DirectoryResult]) {
    results.sort_by(|a, b| b.size.cmp(&a.size));
}

/// Format a size for the text report.
#[must_use]
pub fn size_field(size: u64, human_readable: bool) -> String {
    if human_readable {
        format_size(size)
    } else {
        size.to_string()
    }
}

/// Render results as `<size>\t<path>` lines, sorted largest first.
///
/// # Examples
///
/// ```
/// # use dirtally::{collector::DirectoryResult, output::render_lines};
/// let lines = render_lines(
///     vec![DirectoryResult::new("a", 10), DirectoryResult::new("b", 2048)],
///     true,
/// );
/// assert_eq!(lines, vec!["2.00K\tb", "10B\ta"]);
/// ```
#[must_use]
pub fn render_lines(mut results: Vec<DirectoryResult>, human_readable: bool) -> Vec<String> {
    sort_results(&mut results);

    results
        .iter()
        .map(|r| {
            format!(
                "{}\t{}",
                size_field(r.size, human_readable),
                r.path.display()
            )
        })
        .collect()
}

/// Top-level JSON output emitted when `--json` is active.
#[derive(Serialize, Debug)]
pub struct JsonOutput {
    /// The scan root, as given
    pub root: String,

    /// Total bytes under the root
    pub total_size: u64,

    /// Human-readable formatted total (e.g. `"1.50M"`)
    pub total_size_formatted: String,

    /// Every reported directory, largest first
    pub directories: Vec<JsonDirectoryEntry>,

    /// Diagnostic lines for directories and files that could not be read
    pub errors: Vec<String>,
}

/// A single directory entry in the JSON output.
#[derive(Serialize, Debug)]
pub struct JsonDirectoryEntry {
    /// Directory path
    pub path: String,

    /// Total size in bytes
    pub size: u64,

    /// Human-readable formatted size
    pub size_formatted: String,
}

impl JsonDirectoryEntry {
    /// Build a JSON entry from a directory result.
    #[must_use]
    pub fn from_result(result: &DirectoryResult) -> Self {
        Self {
            path: result.path.display().to_string(),
            size: result.size,
            size_formatted: format_size(result.size),
        }
    }
}

impl JsonOutput {
    /// Build the JSON document for a finished scan.
    #[must_use]
    pub fn from_report(report: ScanReport, verbose: bool) -> Self {
        let mut results = report.results;
        sort_results(&mut results);

        Self {
            root: report.root.display().to_string(),
            total_size: report.total_size,
            total_size_formatted: format_size(report.total_size),
            directories: results.iter().map(JsonDirectoryEntry::from_result).collect(),
            errors: report
                .issues
                .iter()
                .map(|issue| issue.describe(verbose))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{io, path::PathBuf};

    use super::*;
    use crate::diagnostics::ScanIssue;

    fn results(sizes: &[(&str, u64)]) -> Vec<DirectoryResult> {
        sizes
            .iter()
            .map(|&(path, size)| DirectoryResult::new(path, size))
            .collect()
    }

    #[test]
    fn test_sort_descending_with_ties() {
        let mut items = results(&[("a", 10), ("b", 500), ("c", 10), ("d", 3)]);
        sort_results(&mut items);

        let sizes: Vec<u64> = items.iter().map(|r| r.size).collect();
        assert_eq!(sizes, vec![500, 10, 10, 3]);
    }

    #[test]
    fn test_render_raw_sizes() {
        let lines = render_lines(results(&[("small", 1), ("big", 4096)]), false);
        assert_eq!(lines, vec!["4096\tbig", "1\tsmall"]);
    }

    #[test]
    fn test_render_human_readable_sizes() {
        let lines = render_lines(
            results(&[("k", 1024), ("b", 1023), ("m", 1_048_576)]),
            true,
        );
        assert_eq!(lines, vec!["1.00M\tm", "1.00K\tk", "1023B\tb"]);
    }

    #[test]
    fn test_render_empty() {
        assert!(render_lines(Vec::new(), false).is_empty());
    }

    #[test]
    fn test_size_field() {
        assert_eq!(size_field(0, false), "0");
        assert_eq!(size_field(0, true), "0B");
        assert_eq!(size_field(1536, true), "1.50K");
    }

    #[test]
    fn test_json_output_from_report() {
        let report = ScanReport {
            root: PathBuf::from("data"),
            total_size: 3072,
            results: results(&[("data/x", 1024), ("data", 3072)]),
            issues: vec![ScanIssue::UnreadableFile {
                path: PathBuf::from("data/bad"),
                source: io::Error::from(io::ErrorKind::NotFound),
            }],
        };

        let output = JsonOutput::from_report(report, false);

        assert_eq!(output.root, "data");
        assert_eq!(output.total_size_formatted, "3.00K");
        assert_eq!(output.directories.len(), 2);
        assert_eq!(output.directories[0].path, "data");
        assert_eq!(output.directories[1].size_formatted, "1.00K");
        assert_eq!(output.errors, vec!["Can't get file info: data/bad"]);
    }

    #[test]
    fn test_json_output_serializes() {
        let report = ScanReport {
            root: PathBuf::from("."),
            total_size: 5,
            results: results(&[(".", 5)]),
            issues: Vec::new(),
        };

        let json = serde_json::to_value(JsonOutput::from_report(report, false)).unwrap();

        assert_eq!(json["root"], ".");
        assert_eq!(json["total_size"], 5);
        assert_eq!(json["directories"][0]["size_formatted"], "5B");
        assert!(json["errors"].as_array().unwrap().is_empty());
    }
}
