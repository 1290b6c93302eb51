use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{ClassificationConfig, ClassificationRule, RepositoryConfig};
use crate::domain::CommitType;

static ISSUE_REF: LazyLock<Regex> = LazyLock::new(|| {
    // A fixed pattern; a failure here is a programming error.
    Regex::new(r"#(\d+)").expect("issue reference pattern is valid")
});

/// Extract every `#<digits>` issue reference from a message.
///
/// References too large for a `u64` are ignored.
pub fn extract_issues(message: &str) -> BTreeSet<u64> {
    ISSUE_REF
        .captures_iter(message)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Decides which commits are kept and what type each one gets.
#[derive(Debug, Clone)]
pub struct Classifier {
    skip_prefixes: Vec<String>,
    rules: Vec<ClassificationRule>,
}

impl Classifier {
    pub fn new(skip_prefixes: Vec<String>, rules: Vec<ClassificationRule>) -> Self {
        Classifier {
            skip_prefixes,
            rules,
        }
    }

    pub fn from_config(repository: &RepositoryConfig, classification: &ClassificationConfig) -> Self {
        Classifier::new(
            repository.skip_prefixes.clone(),
            classification.rules.clone(),
        )
    }

    /// Merge commits and dependency bumps never make it into the notes.
    pub fn should_skip(&self, message: &str) -> bool {
        self.skip_prefixes
            .iter()
            .any(|prefix| message.starts_with(prefix.as_str()))
    }

    /// First rule whose literal prefix starts the message wins.
    pub fn classify(&self, message: &str) -> CommitType {
        self.rules
            .iter()
            .find(|rule| message.starts_with(rule.prefix.as_str()))
            .map(|rule| rule.kind)
            .unwrap_or(CommitType::Other)
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::from_config(&RepositoryConfig::default(), &ClassificationConfig::default())
    }
}
