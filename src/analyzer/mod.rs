//! Analysis of commit diffs

pub mod diff;

pub use diff::{analyze_patches, parse_unified_diff, scan_file, BREAKING_CHANGE_MARKER};
