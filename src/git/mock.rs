use crate::error::{ReleaseNotesError, Result};
use crate::git::{CommitInfo, FilePatch, Repository};
use std::collections::{HashMap, HashSet};

/// Mock repository for testing without actual git operations
///
/// Commits are kept newest first, the order `recent_commits` returns them in.
pub struct MockRepository {
    commits: Vec<CommitInfo>,
    patches: HashMap<String, Vec<FilePatch>>,
    tags: HashMap<String, String>,
    branches: HashSet<String>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            patches: HashMap::new(),
            tags: HashMap::new(),
            branches: HashSet::new(),
        }
    }

    /// Add a root commit (no parent) as the new newest commit
    pub fn add_commit(&mut self, info: CommitInfo) {
        self.commits.insert(0, info);
    }

    /// Add a commit with first-parent patches as the new newest commit
    pub fn add_commit_with_patches(&mut self, info: CommitInfo, patches: Vec<FilePatch>) {
        self.patches.insert(info.hash.clone(), patches);
        self.add_commit(info);
    }

    /// Add a tag pointing at a commit hash
    pub fn add_tag(&mut self, name: impl Into<String>, hash: impl Into<String>) {
        self.tags.insert(name.into(), hash.into());
    }

    /// Register a branch; every branch sees the full commit list
    pub fn add_branch(&mut self, name: impl Into<String>) {
        self.branches.insert(name.into());
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn recent_commits(
        &self,
        branch: &str,
        base_tag: Option<&str>,
        max_count: usize,
    ) -> Result<Vec<CommitInfo>> {
        if !self.branches.contains(branch) {
            return Err(ReleaseNotesError::repository(format!(
                "Cannot find branch '{}'",
                branch
            )));
        }

        let stop_at = match base_tag {
            Some(tag) => Some(self.tags.get(tag).ok_or_else(|| {
                ReleaseNotesError::repository(format!("Cannot find tag '{}'", tag))
            })?),
            None => None,
        };

        Ok(self
            .commits
            .iter()
            .take_while(|c| Some(&c.hash) != stop_at)
            .take(max_count)
            .cloned()
            .collect())
    }

    fn first_parent_patches(&self, hash: &str) -> Result<Option<Vec<FilePatch>>> {
        Ok(self.patches.get(hash).cloned())
    }
}
