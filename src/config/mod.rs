//! Configuration types for scanning and output.
//!
//! Options are resolved from three layers (CLI argument, config file,
//! hardcoded default) by the binary, then handed to the library as plain
//! immutable values.

pub mod file;
pub mod output;
pub mod scan;

pub use file::FileConfig;
pub use output::OutputOptions;
pub use scan::{FanOut, ScanOptions, depth_limit};
