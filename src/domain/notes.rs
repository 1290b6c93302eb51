use std::collections::BTreeSet;

/// The four release note sections, in rendering order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Features,
    BugFixes,
    BreakingChanges,
    Maintenance,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Features,
        Category::BugFixes,
        Category::BreakingChanges,
        Category::Maintenance,
    ];

    pub fn heading(&self) -> &'static str {
        match self {
            Category::Features => "### 🚀 New Features",
            Category::BugFixes => "### 🐛 Bug Fixes",
            Category::BreakingChanges => "### ⚠️ Breaking Changes",
            Category::Maintenance => "### 🔧 Maintenance",
        }
    }
}

/// A single bullet in the release notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    pub text: String,
    /// Absent for breaking-change entries, which carry only the marker text
    pub author: Option<String>,
    pub issues: BTreeSet<u64>,
}

impl NoteEntry {
    pub fn new(text: impl Into<String>, author: impl Into<String>, issues: BTreeSet<u64>) -> Self {
        NoteEntry {
            text: text.into(),
            author: Some(author.into()),
            issues,
        }
    }

    pub fn text_only(text: impl Into<String>) -> Self {
        NoteEntry {
            text: text.into(),
            author: None,
            issues: BTreeSet::new(),
        }
    }
}

/// Release note entries partitioned by category, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseNotes {
    pub features: Vec<NoteEntry>,
    pub bug_fixes: Vec<NoteEntry>,
    pub breaking_changes: Vec<NoteEntry>,
    pub maintenance: Vec<NoteEntry>,
}

impl ReleaseNotes {
    pub fn push(&mut self, category: Category, entry: NoteEntry) {
        self.entries_mut(category).push(entry);
    }

    pub fn entries(&self, category: Category) -> &[NoteEntry] {
        match category {
            Category::Features => &self.features,
            Category::BugFixes => &self.bug_fixes,
            Category::BreakingChanges => &self.breaking_changes,
            Category::Maintenance => &self.maintenance,
        }
    }

    fn entries_mut(&mut self, category: Category) -> &mut Vec<NoteEntry> {
        match category {
            Category::Features => &mut self.features,
            Category::BugFixes => &mut self.bug_fixes,
            Category::BreakingChanges => &mut self.breaking_changes,
            Category::Maintenance => &mut self.maintenance,
        }
    }

    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.entries(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
