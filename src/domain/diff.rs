use std::fmt;

/// Why a single file's patch contributed nothing to the analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Empty,
    Binary,
    NotUtf8(String),
    Malformed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Empty => write!(f, "empty patch"),
            SkipReason::Binary => write!(f, "binary file"),
            SkipReason::NotUtf8(e) => write!(f, "patch is not valid UTF-8: {}", e),
            SkipReason::Malformed(e) => write!(f, "malformed diff: {}", e),
        }
    }
}

/// Outcome of scanning one file's patch for breaking-change markers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileScan {
    Scanned {
        path: String,
        fragments: Vec<String>,
    },
    Skipped {
        path: String,
        reason: SkipReason,
    },
}

impl FileScan {
    pub fn path(&self) -> &str {
        match self {
            FileScan::Scanned { path, .. } | FileScan::Skipped { path, .. } => path,
        }
    }

    pub fn fragments(&self) -> &[String] {
        match self {
            FileScan::Scanned { fragments, .. } => fragments,
            FileScan::Skipped { .. } => &[],
        }
    }
}

/// Aggregated diff analysis for a commit against its first parent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffAnalysis {
    pub files: Vec<FileScan>,
}

impl DiffAnalysis {
    pub fn from_scans(files: Vec<FileScan>) -> Self {
        DiffAnalysis { files }
    }

    /// Breaking-change fragments across all scanned files, in file order
    pub fn breaking_changes(&self) -> Vec<String> {
        self.files
            .iter()
            .flat_map(|scan| scan.fragments().iter().cloned())
            .collect()
    }

    pub fn has_breaking_changes(&self) -> bool {
        self.files.iter().any(|scan| !scan.fragments().is_empty())
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.files.iter().filter_map(|scan| match scan {
            FileScan::Skipped { path, reason } => Some((path.as_str(), reason)),
            FileScan::Scanned { .. } => None,
        })
    }
}
