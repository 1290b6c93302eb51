use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::diff::DiffAnalysis;

/// Conventional commit type assigned from the message prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Refactor,
    Other,
}

impl CommitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feat => "feat",
            CommitType::Fix => "fix",
            CommitType::Docs => "docs",
            CommitType::Refactor => "refactor",
            CommitType::Other => "other",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A commit after filtering, classification and diff analysis
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedCommit {
    pub hash: String,
    pub message: String,
    pub author: String,
    pub r#type: CommitType,
    pub issues: BTreeSet<u64>,
    pub diff: DiffAnalysis,
}

impl EnrichedCommit {
    /// First line of the message, trimmed
    pub fn subject(&self) -> &str {
        subject_line(&self.message)
    }

    pub fn short_hash(&self) -> &str {
        if self.hash.len() > 7 {
            &self.hash[..7]
        } else {
            &self.hash
        }
    }
}

/// Returns the first line of a commit message, trimmed
pub fn subject_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default().trim()
}
