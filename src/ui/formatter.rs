//! Pure formatting functions for UI output.
//!
//! Standard output is reserved for the generated Markdown, so every message
//! here goes to standard error.

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("\x1b[33m→\x1b[0m {}", message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("\x1b[33m⚠ WARNING:\x1b[0m {}", warning);
}

/// Summarize the run: how many commits were used and which issues they cite.
pub fn format_run_summary(commit_count: usize, issues: &[u64]) -> String {
    let noun = if commit_count == 1 { "commit" } else { "commits" };
    if issues.is_empty() {
        format!("Release notes built from {} {}", commit_count, noun)
    } else {
        let refs: Vec<String> = issues.iter().map(|n| format!("#{}", n)).collect();
        format!(
            "Release notes built from {} {} referencing {}",
            commit_count,
            noun,
            refs.join(", ")
        )
    }
}
