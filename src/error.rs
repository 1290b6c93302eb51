use thiserror::Error;

/// Unified error type for release note generation
#[derive(Error, Debug)]
pub enum ReleaseNotesError {
    #[error("Repository access failed: {0}")]
    RepositoryAccess(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Malformed diff for '{path}': {reason}")]
    DiffParse { path: String, reason: String },

    #[error("Summarization failed: {0}")]
    Summarization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-release-notes
pub type Result<T> = std::result::Result<T, ReleaseNotesError>;

impl ReleaseNotesError {
    /// Create a repository access error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        ReleaseNotesError::RepositoryAccess(msg.into())
    }

    /// Create a diff parse error for a single file
    pub fn diff_parse(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ReleaseNotesError::DiffParse {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a summarization error with context
    pub fn summarization(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Summarization(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Config(msg.into())
    }
}

impl From<reqwest::Error> for ReleaseNotesError {
    fn from(err: reqwest::Error) -> Self {
        ReleaseNotesError::Summarization(err.to_string())
    }
}
