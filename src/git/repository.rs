use crate::error::{ReleaseNotesError, Result};
use crate::git::{CommitInfo, FilePatch};
use git2::{BranchType, Oid, Patch, Repository as Git2Repo, Sort};
use std::path::Path;
use tracing::{debug, trace};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::discover(path).map_err(|e| {
            ReleaseNotesError::repository(format!(
                "'{}' is not a git repository: {}",
                path.display(),
                e
            ))
        })?;

        debug!("Opened repository at {}", repo.path().display());
        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn branch_head_oid(&self, branch_name: &str) -> Result<Oid> {
        let branch = self
            .repo
            .find_branch(branch_name, BranchType::Local)
            .map_err(|e| {
                ReleaseNotesError::repository(format!(
                    "Cannot find branch '{}': {}",
                    branch_name, e
                ))
            })?;

        branch.get().target().ok_or_else(|| {
            ReleaseNotesError::repository(format!("Branch '{}' has no target", branch_name))
        })
    }

    /// Resolves lightweight and annotated tags to the tagged commit
    fn tag_commit_oid(&self, tag_name: &str) -> Result<Oid> {
        let reference = self
            .repo
            .find_reference(&format!("refs/tags/{}", tag_name))
            .map_err(|e| {
                ReleaseNotesError::repository(format!("Cannot find tag '{}': {}", tag_name, e))
            })?;

        let commit = reference.peel_to_commit().map_err(|e| {
            ReleaseNotesError::repository(format!(
                "Tag '{}' does not point at a commit: {}",
                tag_name, e
            ))
        })?;

        Ok(commit.id())
    }
}

fn delta_path(delta: &git2::DiffDelta) -> String {
    delta
        .new_file()
        .path()
        .or_else(|| delta.old_file().path())
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

impl super::Repository for Git2Repository {
    fn recent_commits(
        &self,
        branch: &str,
        base_tag: Option<&str>,
        max_count: usize,
    ) -> Result<Vec<CommitInfo>> {
        let head = self.branch_head_oid(branch)?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push(head)?;

        if let Some(tag) = base_tag {
            revwalk.hide(self.tag_commit_oid(tag)?)?;
        }

        let mut commits = Vec::new();

        for oid_result in revwalk.take(max_count) {
            let oid = oid_result?;
            let commit = self.repo.find_commit(oid)?;

            let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
            let author = commit.author().name().unwrap_or("unknown").to_string();

            trace!("Walked commit {}", oid);
            commits.push(CommitInfo {
                hash: oid.to_string(),
                message,
                author,
            });
        }

        Ok(commits)
    }

    fn first_parent_patches(&self, hash: &str) -> Result<Option<Vec<FilePatch>>> {
        let oid = Oid::from_str(hash)?;
        let commit = self.repo.find_commit(oid)?;

        if commit.parent_count() == 0 {
            return Ok(None);
        }

        let parent = commit.parent(0)?;
        let diff =
            self.repo
                .diff_tree_to_tree(Some(&parent.tree()?), Some(&commit.tree()?), None)?;

        let mut patches = Vec::new();
        for (idx, delta) in diff.deltas().enumerate() {
            let path = delta_path(&delta);

            let patch = match Patch::from_diff(&diff, idx)? {
                Some(mut patch) => patch.to_buf()?.to_vec(),
                // libgit2 builds no patch for binary deltas; keep git's marker
                None if delta.flags().is_binary() => {
                    format!("Binary files a/{} and b/{} differ\n", path, path).into_bytes()
                }
                None => Vec::new(),
            };

            patches.push(FilePatch { path, patch });
        }

        Ok(Some(patches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_non_repository() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");
        match Git2Repository::open(&missing) {
            Err(ReleaseNotesError::RepositoryAccess(msg)) => {
                assert!(msg.contains("does-not-exist"))
            }
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("opening a missing path should fail"),
        }
    }
}
