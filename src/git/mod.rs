//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the history and diff
//! access the release notes pipeline needs, allowing for a real git2-backed
//! repository and an in-memory mock for testing.
//!
//! # Overview
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! Most code should depend on the [Repository] trait rather than concrete
//! implementations.
//!
//! ```rust,no_run
//! # use git_release_notes::git::{Git2Repository, Repository};
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = Git2Repository::open(".")?;
//! for commit in repo.recent_commits("main", None, 10)? {
//!     println!("{} {}", commit.hash, commit.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Commit information read from history
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The full hexadecimal commit id
    pub hash: String,
    /// The commit message
    pub message: String,
    /// The commit author's name
    pub author: String,
}

impl CommitInfo {
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        CommitInfo {
            hash: hash.into(),
            message: message.into(),
            author: author.into(),
        }
    }
}

/// Raw unified-diff text for one changed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePatch {
    pub path: String,
    pub patch: Vec<u8>,
}

impl FilePatch {
    pub fn new(path: impl Into<String>, patch: impl Into<Vec<u8>>) -> Self {
        FilePatch {
            path: path.into(),
            patch: patch.into(),
        }
    }
}

/// History and diff access used by the release notes generator
///
/// ## Error Handling
///
/// Implementations report a missing branch, tag or unreadable repository as
/// [crate::error::ReleaseNotesError::RepositoryAccess].
pub trait Repository {
    /// Get the most recent commits reachable from a branch
    ///
    /// Returns at most `max_count` commits, newest first. When `base_tag` is
    /// given, commits reachable from that tag are excluded.
    ///
    /// # Arguments
    /// * `branch` - Local branch name (e.g., "main")
    /// * `base_tag` - Optional lower bound of the range
    /// * `max_count` - Upper bound on the number of commits returned
    fn recent_commits(
        &self,
        branch: &str,
        base_tag: Option<&str>,
        max_count: usize,
    ) -> Result<Vec<CommitInfo>>;

    /// Get per-file patches between a commit and its first parent
    ///
    /// Returns `Ok(None)` for a root commit.
    fn first_parent_patches(&self, hash: &str) -> Result<Option<Vec<FilePatch>>>;
}
