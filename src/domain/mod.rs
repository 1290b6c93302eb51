//! Domain types - commits, diff analysis results and release note categories

pub mod commit;
pub mod diff;
pub mod notes;

pub use commit::{subject_line, CommitType, EnrichedCommit};
pub use diff::{DiffAnalysis, FileScan, SkipReason};
pub use notes::{Category, NoteEntry, ReleaseNotes};
