//! Output configuration for the final report.

/// Options controlling how the collected results are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OutputOptions {
    /// Print sizes with binary units (`1.50M`) instead of raw byte counts
    pub human_readable: bool,

    /// Print a single JSON document instead of text lines
    pub json: bool,

    /// Show a progress spinner on stderr while scanning
    pub progress: bool,
}
