//! Markdown rendering of categorized release notes.

use chrono::Local;

use crate::domain::{Category, NoteEntry, ReleaseNotes};

fn bullet(category: Category, entry: &NoteEntry) -> String {
    match (category, entry.author.as_deref()) {
        (Category::Features, Some(author)) => format!("- {} (by {})", entry.text, author),
        _ => format!("- {}", entry.text),
    }
}

/// Render release notes for `target_tag` dated `date` (`YYYY-MM-DD`).
///
/// Every section header is emitted, even for empty categories. Only features
/// carry author attribution.
pub fn render_markdown(notes: &ReleaseNotes, target_tag: &str, date: &str) -> String {
    let mut output = vec![format!("## {} - {}\n", target_tag, date)];

    for (i, category) in Category::ALL.iter().enumerate() {
        if i == 0 {
            output.push(category.heading().to_string());
        } else {
            output.push(format!("\n{}", category.heading()));
        }
        output.extend(
            notes
                .entries(*category)
                .iter()
                .map(|entry| bullet(*category, entry)),
        );
    }

    output.join("\n")
}

/// Render release notes dated with the local current date.
pub fn render_markdown_today(notes: &ReleaseNotes, target_tag: &str) -> String {
    let date = Local::now().format("%Y-%m-%d").to_string();
    render_markdown(notes, target_tag, &date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_empty_notes_render_all_headers() {
        let rendered = render_markdown(&ReleaseNotes::default(), "v1.1.0", "2024-05-01");
        let expected = "## v1.1.0 - 2024-05-01\n\n\
### 🚀 New Features\n\n\
### 🐛 Bug Fixes\n\n\
### ⚠️ Breaking Changes\n\n\
### 🔧 Maintenance";
        assert_eq!(rendered, expected);
        assert_eq!(rendered.lines().filter(|l| l.starts_with("- ")).count(), 0);
    }

    #[test]
    fn test_only_features_show_author() {
        let mut notes = ReleaseNotes::default();
        notes.push(
            Category::Features,
            NoteEntry::new("Add search (#4)", "Ada", BTreeSet::from([4])),
        );
        notes.push(
            Category::BugFixes,
            NoteEntry::new("Fix crash", "Grace", BTreeSet::new()),
        );
        notes.push(
            Category::BreakingChanges,
            NoteEntry::text_only("BREAKING CHANGE: a | BREAKING CHANGE: b"),
        );
        notes.push(
            Category::Maintenance,
            NoteEntry::new("Tidy build", "Linus", BTreeSet::new()),
        );

        let rendered = render_markdown(&notes, "v2.0.0", "2024-05-01");
        let expected = "## v2.0.0 - 2024-05-01\n\n\
### 🚀 New Features\n\
- Add search (#4) (by Ada)\n\n\
### 🐛 Bug Fixes\n\
- Fix crash\n\n\
### ⚠️ Breaking Changes\n\
- BREAKING CHANGE: a | BREAKING CHANGE: b\n\n\
### 🔧 Maintenance\n\
- Tidy build";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_entries_keep_insertion_order() {
        let mut notes = ReleaseNotes::default();
        for text in ["first", "second", "third"] {
            notes.push(Category::Maintenance, NoteEntry::text_only(text));
        }
        let rendered = render_markdown(&notes, "v1", "2024-01-01");
        let bullets: Vec<_> = rendered.lines().filter(|l| l.starts_with("- ")).collect();
        assert_eq!(bullets, vec!["- first", "- second", "- third"]);
    }

    #[test]
    fn test_today_uses_iso_date() {
        let rendered = render_markdown_today(&ReleaseNotes::default(), "v1");
        let header = rendered.lines().next().unwrap();
        let date = header.trim_start_matches("## v1 - ");
        assert_eq!(date.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok());
    }
}
