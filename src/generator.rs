//! Release notes pipeline: fetch, preprocess, generate, format.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::analyzer::analyze_patches;
use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::conventional::{extract_issues, Classifier};
use crate::domain::{Category, CommitType, EnrichedCommit, NoteEntry, ReleaseNotes, SkipReason};
use crate::error::Result;
use crate::git::{CommitInfo, Repository};
use crate::markdown::{render_markdown, render_markdown_today};
use crate::summarizer::Summarizer;

/// Separator between breaking-change fragments of one commit
pub const FRAGMENT_SEPARATOR: &str = " | ";

/// What to read and how to label the result
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOptions {
    pub branch: String,
    pub base_tag: Option<String>,
    pub target_tag: String,
    pub max_commits: usize,
    /// Propagate summarizer failures instead of falling back to the subject
    pub strict: bool,
}

impl GeneratorOptions {
    pub fn from_config(config: &Config, base_tag: Option<String>, target_tag: String) -> Self {
        GeneratorOptions {
            branch: config.repository.branch.clone(),
            base_tag,
            target_tag,
            max_commits: config.repository.max_commits,
            strict: config.summarizer.strict,
        }
    }
}

/// Decide the category and entry for an enriched commit and its summary.
///
/// Type wins over content: `feat` and `fix` are never moved to breaking
/// changes, even when their diff carries a marker.
pub fn categorize(commit: &EnrichedCommit, summary: String) -> (Category, NoteEntry) {
    let entry = NoteEntry::new(summary, commit.author.clone(), commit.issues.clone());

    match commit.r#type {
        CommitType::Feat => (Category::Features, entry),
        CommitType::Fix => (Category::BugFixes, entry),
        _ if commit.diff.has_breaking_changes() => (
            Category::BreakingChanges,
            NoteEntry::text_only(commit.diff.breaking_changes().join(FRAGMENT_SEPARATOR)),
        ),
        _ => (Category::Maintenance, entry),
    }
}

/// Generates Markdown release notes from a repository's recent history
pub struct ReleaseNotesGenerator<R, S> {
    repo: R,
    summarizer: S,
    classifier: Classifier,
    options: GeneratorOptions,
    fetched: Vec<CommitInfo>,
    commits: Vec<EnrichedCommit>,
    issues: BTreeSet<u64>,
    warnings: Vec<BoundaryWarning>,
}

impl<R: Repository, S: Summarizer> ReleaseNotesGenerator<R, S> {
    pub fn new(repo: R, summarizer: S, classifier: Classifier, options: GeneratorOptions) -> Self {
        ReleaseNotesGenerator {
            repo,
            summarizer,
            classifier,
            options,
            fetched: Vec::new(),
            commits: Vec::new(),
            issues: BTreeSet::new(),
            warnings: Vec::new(),
        }
    }

    /// Every issue referenced by a fetched commit, including dropped ones
    pub fn issues(&self) -> &BTreeSet<u64> {
        &self.issues
    }

    /// Commits that survived preprocessing, in fetch order
    pub fn commits(&self) -> &[EnrichedCommit] {
        &self.commits
    }

    pub fn warnings(&self) -> &[BoundaryWarning] {
        &self.warnings
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Read up to `max_commits` commits, newest first, and collect issue refs.
    #[tracing::instrument(level = "debug", skip(self), fields(branch = %self.options.branch))]
    pub fn fetch_data(&mut self) -> Result<()> {
        self.fetched = self.repo.recent_commits(
            &self.options.branch,
            self.options.base_tag.as_deref(),
            self.options.max_commits,
        )?;

        self.issues = self
            .fetched
            .iter()
            .flat_map(|commit| extract_issues(&commit.message))
            .collect();

        info!(
            "Fetched {} commits from '{}'",
            self.fetched.len(),
            self.options.branch
        );
        debug!("Referenced issues: {:?}", self.issues);
        Ok(())
    }

    /// Drop skipped commits, then classify and diff-scan the rest.
    pub fn preprocess_commits(&mut self) -> Result<()> {
        let fetched = std::mem::take(&mut self.fetched);
        let mut commits = Vec::with_capacity(fetched.len());

        for commit in fetched {
            if self.classifier.should_skip(&commit.message) {
                debug!("Dropping {}: {}", commit.hash, commit.message.trim());
                continue;
            }

            let r#type = self.classifier.classify(&commit.message);
            let issues = extract_issues(&commit.message);
            let patches = self.repo.first_parent_patches(&commit.hash)?;
            let diff = analyze_patches(patches.as_deref());

            for (path, reason) in diff.skipped() {
                if matches!(reason, SkipReason::NotUtf8(_) | SkipReason::Malformed(_)) {
                    self.warnings.push(BoundaryWarning::SkippedDiff {
                        commit_hash: commit.hash.clone(),
                        path: path.to_string(),
                        reason: reason.clone(),
                    });
                }
            }

            debug!("Classified {} as {}", commit.hash, r#type);
            commits.push(EnrichedCommit {
                hash: commit.hash,
                message: commit.message,
                author: commit.author,
                r#type,
                issues,
                diff,
            });
        }

        if commits.is_empty() {
            self.warnings.push(BoundaryWarning::NoCommitsInRange {
                branch: self.options.branch.clone(),
                base_tag: self.options.base_tag.clone(),
            });
        }

        self.commits = commits;
        Ok(())
    }

    fn summarize(&mut self, commit: &EnrichedCommit) -> Result<String> {
        match self.summarizer.summarize(&commit.message) {
            Ok(summary) => Ok(summary),
            Err(e) if self.options.strict => Err(e),
            Err(e) => {
                warn!("Falling back to subject for {}: {}", commit.short_hash(), e);
                self.warnings.push(BoundaryWarning::SummaryFallback {
                    commit_hash: commit.hash.clone(),
                    reason: e.to_string(),
                });
                Ok(commit.subject().to_string())
            }
        }
    }

    fn partition(&mut self, commits: &[EnrichedCommit]) -> Result<ReleaseNotes> {
        let mut notes = ReleaseNotes::default();
        for commit in commits {
            let summary = self.summarize(commit)?;
            let (category, entry) = categorize(commit, summary);
            notes.push(category, entry);
        }
        Ok(notes)
    }

    /// Summarize each commit in order and partition into categories.
    pub fn generate_notes(&mut self) -> Result<ReleaseNotes> {
        let commits = std::mem::take(&mut self.commits);
        let result = self.partition(&commits);
        self.commits = commits;

        let notes = result?;
        info!("Generated {} release note entries", notes.len());
        Ok(notes)
    }

    pub fn format_markdown(&self, notes: &ReleaseNotes, date: &str) -> String {
        render_markdown(notes, &self.options.target_tag, date)
    }

    /// Run the whole pipeline and render with today's date.
    pub fn run(&mut self) -> Result<String> {
        self.fetch_data()?;
        self.preprocess_commits()?;
        let notes = self.generate_notes()?;
        Ok(render_markdown_today(&notes, &self.options.target_tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DiffAnalysis, FileScan};

    fn enriched(r#type: CommitType, fragments: Vec<&str>) -> EnrichedCommit {
        let files = if fragments.is_empty() {
            Vec::new()
        } else {
            vec![FileScan::Scanned {
                path: "src/lib.rs".to_string(),
                fragments: fragments.into_iter().map(String::from).collect(),
            }]
        };
        EnrichedCommit {
            hash: "0123456789abcdef".to_string(),
            message: "msg".to_string(),
            author: "Ada".to_string(),
            r#type,
            issues: BTreeSet::from([9]),
            diff: DiffAnalysis::from_scans(files),
        }
    }

    #[test]
    fn test_feat_with_marker_stays_feature() {
        let commit = enriched(CommitType::Feat, vec!["BREAKING CHANGE: x"]);
        let (category, entry) = categorize(&commit, "Add X".to_string());
        assert_eq!(category, Category::Features);
        assert_eq!(entry.author.as_deref(), Some("Ada"));
    }

    #[test]
    fn test_fix_with_marker_stays_bug_fix() {
        let commit = enriched(CommitType::Fix, vec!["BREAKING CHANGE: x"]);
        assert_eq!(categorize(&commit, "s".into()).0, Category::BugFixes);
    }

    #[test]
    fn test_breaking_entry_joins_fragments_and_drops_metadata() {
        let commit = enriched(
            CommitType::Refactor,
            vec!["BREAKING CHANGE: a", "BREAKING CHANGE: b"],
        );
        let (category, entry) = categorize(&commit, "ignored summary".to_string());
        assert_eq!(category, Category::BreakingChanges);
        assert_eq!(entry.text, "BREAKING CHANGE: a | BREAKING CHANGE: b");
        assert_eq!(entry.author, None);
        assert!(entry.issues.is_empty());
    }

    #[test]
    fn test_docs_without_marker_is_maintenance() {
        let commit = enriched(CommitType::Docs, vec![]);
        let (category, entry) = categorize(&commit, "Update docs".to_string());
        assert_eq!(category, Category::Maintenance);
        assert_eq!(entry.issues, BTreeSet::from([9]));
    }
}
