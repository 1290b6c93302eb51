//! Breaking-change detection over unified diffs
//!
//! Each file's patch is parsed on its own with libgit2's patch parser, so a
//! malformed or undecodable patch only costs that one file.

use git2::{Diff, Patch};
use tracing::{trace, warn};

use crate::domain::{DiffAnalysis, FileScan, SkipReason};
use crate::error::{ReleaseNotesError, Result};
use crate::git::FilePatch;

/// Literal marker searched for in added lines
pub const BREAKING_CHANGE_MARKER: &str = "BREAKING CHANGE";

/// A line from a parsed unified diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub added: bool,
    pub removed: bool,
    pub content: String,
}

fn is_binary_patch(patch: &[u8]) -> bool {
    patch
        .split(|b| *b == b'\n')
        .any(|line| line.starts_with(b"Binary files ") || line.starts_with(b"GIT binary patch"))
}

/// Parse unified-diff text into its lines across all files and hunks.
pub fn parse_unified_diff(path: &str, text: &str) -> Result<Vec<ParsedLine>> {
    let diff = Diff::from_buffer(text.as_bytes())
        .map_err(|e| ReleaseNotesError::diff_parse(path, e.message()))?;

    if diff.deltas().len() == 0 {
        return Err(ReleaseNotesError::diff_parse(path, "no file header found"));
    }

    let mut lines = Vec::new();
    for idx in 0..diff.deltas().len() {
        let patch = match Patch::from_diff(&diff, idx)
            .map_err(|e| ReleaseNotesError::diff_parse(path, e.message()))?
        {
            Some(patch) => patch,
            None => continue,
        };

        for hunk_idx in 0..patch.num_hunks() {
            let line_count = patch
                .num_lines_in_hunk(hunk_idx)
                .map_err(|e| ReleaseNotesError::diff_parse(path, e.message()))?;

            for line_idx in 0..line_count {
                let line = patch
                    .line_in_hunk(hunk_idx, line_idx)
                    .map_err(|e| ReleaseNotesError::diff_parse(path, e.message()))?;

                lines.push(ParsedLine {
                    added: line.origin() == '+',
                    removed: line.origin() == '-',
                    content: String::from_utf8_lossy(line.content()).into_owned(),
                });
            }
        }
    }

    Ok(lines)
}

/// Scan one file's patch for breaking-change markers in added lines.
pub fn scan_file(file: &FilePatch) -> FileScan {
    let path = file.path.clone();

    if file.patch.is_empty() {
        return FileScan::Skipped {
            path,
            reason: SkipReason::Empty,
        };
    }
    if is_binary_patch(&file.patch) {
        trace!("Skipping binary patch for {}", path);
        return FileScan::Skipped {
            path,
            reason: SkipReason::Binary,
        };
    }

    let text = match std::str::from_utf8(&file.patch) {
        Ok(text) => text,
        Err(e) => {
            warn!("Skipping malformed diff for {}: {}", path, e);
            return FileScan::Skipped {
                path,
                reason: SkipReason::NotUtf8(e.to_string()),
            };
        }
    };

    match parse_unified_diff(&path, text) {
        Ok(lines) => {
            let fragments = lines
                .into_iter()
                .filter(|line| line.added && line.content.contains(BREAKING_CHANGE_MARKER))
                .map(|line| line.content.trim().to_string())
                .collect();
            FileScan::Scanned { path, fragments }
        }
        Err(e) => {
            warn!("Skipping malformed diff: {}", e);
            let reason = match e {
                ReleaseNotesError::DiffParse { reason, .. } => reason,
                other => other.to_string(),
            };
            FileScan::Skipped {
                path,
                reason: SkipReason::Malformed(reason),
            }
        }
    }
}

/// Analyze every file patch of a commit; `None` means the commit has no parent.
pub fn analyze_patches(patches: Option<&[FilePatch]>) -> DiffAnalysis {
    match patches {
        Some(patches) => DiffAnalysis::from_scans(patches.iter().map(scan_file).collect()),
        None => DiffAnalysis::default(),
    }
}
