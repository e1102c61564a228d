//! # dirtally
//!
//! Per-directory disk usage, computed with a parallel recursive walk.
//!
//! The [`scanner`] walks a tree with one task per subdirectory, summing file
//! sizes bottom-up and streaming each directory's total to a background
//! [`collector`]. The [`output`] module sorts the collected totals and
//! renders them as text or JSON.

pub mod collector;
pub mod config;
pub mod diagnostics;
pub mod exclude;
pub mod output;
pub mod scanner;
pub mod utils;

pub use config::{FanOut, OutputOptions, ScanOptions};
