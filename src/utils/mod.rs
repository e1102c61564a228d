//! Utility functions and helpers.
//!
//! This module contains small helpers used throughout the application,
//! such as byte-count formatting and lexical path cleanup.

pub mod path;
pub mod size;

pub use path::clean_path;
pub use size::format_size;
