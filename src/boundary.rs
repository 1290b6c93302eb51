use std::fmt;

use crate::domain::SkipReason;

/// Non-fatal conditions met while generating release notes.
/// These are reported to the user but never abort the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The requested range holds no commits that survive filtering
    NoCommitsInRange {
        branch: String,
        base_tag: Option<String>,
    },
    /// A file's patch could not be read and was left out of the diff scan
    SkippedDiff {
        commit_hash: String,
        path: String,
        reason: SkipReason,
    },
    /// The summarizer failed and the commit subject was used instead
    SummaryFallback { commit_hash: String, reason: String },
}

fn short(hash: &str) -> &str {
    if hash.len() > 7 {
        &hash[..7]
    } else {
        hash
    }
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoCommitsInRange { branch, base_tag } => match base_tag {
                Some(tag) => write!(
                    f,
                    "No release-worthy commits on '{}' since tag '{}'",
                    branch, tag
                ),
                None => write!(f, "No release-worthy commits on '{}'", branch),
            },
            BoundaryWarning::SkippedDiff {
                commit_hash,
                path,
                reason,
            } => write!(
                f,
                "Skipped diff of '{}' in {}: {}",
                path,
                short(commit_hash),
                reason
            ),
            BoundaryWarning::SummaryFallback {
                commit_hash,
                reason,
            } => write!(
                f,
                "Summary for {} unavailable, using commit subject: {}",
                short(commit_hash),
                reason
            ),
        }
    }
}
