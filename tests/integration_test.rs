// tests/integration_test.rs
use std::fs;
use std::path::Path;

use git2::{Commit, Oid, Repository, RepositoryInitOptions, Signature, Time};
use tempfile::TempDir;

use git_release_notes::analyzer::analyze_patches;
use git_release_notes::cli::orchestration::{run_release_notes_workflow, run_with, ReleaseNotesArgs};
use git_release_notes::config::Config;
use git_release_notes::domain::{FileScan, SkipReason};
use git_release_notes::git::{Git2Repository, Repository as _};
use git_release_notes::summarizer::SubjectSummarizer;
use git_release_notes::ReleaseNotesError;

struct TestRepo {
    dir: TempDir,
    repo: Repository,
    clock: i64,
}

impl TestRepo {
    // Helper function to setup a temporary git repo on branch "main"
    fn new() -> Self {
        let dir = TempDir::new().expect("Could not create temp dir");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("Could not init git repo");
        TestRepo {
            dir,
            repo,
            clock: 1_700_000_000,
        }
    }

    fn commit(&mut self, file: &str, content: &[u8], message: &str) -> Oid {
        fs::write(self.dir.path().join(file), content).expect("Could not write file");

        let mut index = self.repo.index().expect("Could not get index");
        index
            .add_path(Path::new(file))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");
        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = self.repo.find_tree(tree_id).expect("Could not find tree");

        // Distinct timestamps keep time-sorted history deterministic
        self.clock += 60;
        let sig = Signature::new("Test User", "test@example.com", &Time::new(self.clock, 0))
            .expect("Could not build signature");

        let parents: Vec<Commit> = match self.repo.head() {
            Ok(head) => vec![head.peel_to_commit().expect("HEAD is a commit")],
            Err(_) => Vec::new(),
        };
        let parent_refs: Vec<&Commit> = parents.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
            .expect("Could not create commit")
    }

    fn tag(&self, name: &str, oid: Oid) {
        let object = self.repo.find_object(oid, None).unwrap();
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Could not create tag");
    }

    fn open(&self) -> Git2Repository {
        Git2Repository::open(self.dir.path()).expect("Could not open repo")
    }

    fn path(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }
}

fn sample_history() -> TestRepo {
    let mut repo = TestRepo::new();
    repo.commit("README.md", b"Initial content\n", "Initial commit");
    repo.commit("search.rs", b"pub fn search() {}\n", "feat: add search (#4)");
    repo.commit(
        "api.rs",
        b"// BREAKING CHANGE: connect() takes a timeout\npub fn connect(t: u64) {}\n",
        "Rework connection API",
    );
    repo.commit("notes.txt", b"merged\n", "Merge branch 'topic' into main");
    repo
}

#[test]
fn test_recent_commits_newest_first() {
    let repo = sample_history();
    let commits = repo.open().recent_commits("main", None, 100).unwrap();

    let messages: Vec<_> = commits.iter().map(|c| c.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Merge branch 'topic' into main",
            "Rework connection API",
            "feat: add search (#4)",
            "Initial commit",
        ]
    );
    assert!(commits.iter().all(|c| c.author == "Test User"));
    assert!(commits.iter().all(|c| c.hash.len() == 40));
}

#[test]
fn test_recent_commits_respects_max_count() {
    let repo = sample_history();
    let commits = repo.open().recent_commits("main", None, 2).unwrap();
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0].message, "Merge branch 'topic' into main");
}

#[test]
fn test_base_tag_bounds_the_range() {
    let mut repo = TestRepo::new();
    repo.commit("a.txt", b"a\n", "Initial commit");
    let released = repo.commit("b.txt", b"b\n", "feat: shipped in v1");
    repo.tag("v1.0.0", released);
    repo.commit("c.txt", b"c\n", "fix: after the release");

    let commits = repo
        .open()
        .recent_commits("main", Some("v1.0.0"), 100)
        .unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].message, "fix: after the release");
}

#[test]
fn test_missing_branch_and_tag_are_repository_errors() {
    let repo = sample_history();
    let git = repo.open();

    assert!(matches!(
        git.recent_commits("develop", None, 10),
        Err(ReleaseNotesError::RepositoryAccess(_))
    ));
    assert!(matches!(
        git.recent_commits("main", Some("v0.0.0"), 10),
        Err(ReleaseNotesError::RepositoryAccess(_))
    ));
}

#[test]
fn test_root_commit_has_no_parent_patches() {
    let mut repo = TestRepo::new();
    let root = repo.commit("a.txt", b"a\n", "Initial commit");
    assert_eq!(
        repo.open().first_parent_patches(&root.to_string()).unwrap(),
        None
    );
}

#[test]
fn test_breaking_marker_found_in_real_diff() {
    let mut repo = TestRepo::new();
    repo.commit("api.rs", b"pub fn connect() {}\n", "Initial commit");
    let change = repo.commit(
        "api.rs",
        b"pub fn connect() {}\n  // BREAKING CHANGE: connect() takes a timeout  \n",
        "Rework connection API",
    );

    let patches = repo
        .open()
        .first_parent_patches(&change.to_string())
        .unwrap()
        .expect("commit has a parent");
    let analysis = analyze_patches(Some(&patches));

    assert_eq!(
        analysis.breaking_changes(),
        vec!["// BREAKING CHANGE: connect() takes a timeout"]
    );
}

#[test]
fn test_binary_file_is_skipped() {
    let mut repo = TestRepo::new();
    repo.commit("README.md", b"readme\n", "Initial commit");
    let change = repo.commit(
        "logo.png",
        b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR BREAKING CHANGE\0",
        "Add logo",
    );

    let patches = repo
        .open()
        .first_parent_patches(&change.to_string())
        .unwrap()
        .unwrap();
    let analysis = analyze_patches(Some(&patches));

    assert_eq!(
        analysis.files,
        vec![FileScan::Skipped {
            path: "logo.png".to_string(),
            reason: SkipReason::Binary,
        }]
    );
    assert!(analysis.breaking_changes().is_empty());
}

#[test]
fn test_end_to_end_offline_notes() {
    let repo = sample_history();
    let args = ReleaseNotesArgs {
        target_tag: Some("v1.1.0".to_string()),
        ..ReleaseNotesArgs::default()
    };

    let result = run_with(repo.open(), SubjectSummarizer, &args, &Config::default()).unwrap();

    assert_eq!(result.commit_count, 3);
    assert_eq!(result.issues, vec![4]);
    assert!(result.markdown.starts_with("## v1.1.0 - "));
    assert!(result
        .markdown
        .contains("### 🚀 New Features\n- feat: add search (#4) (by Test User)\n"));
    assert!(result.markdown.contains(
        "### ⚠️ Breaking Changes\n- // BREAKING CHANGE: connect() takes a timeout\n"
    ));
    assert!(result
        .markdown
        .ends_with("### 🔧 Maintenance\n- Initial commit"));
    assert!(!result.markdown.contains("Merge"));
}

#[test]
fn test_workflow_opens_repo_from_args() {
    let repo = sample_history();
    let args = ReleaseNotesArgs {
        repo_path: Some(repo.path()),
        target_tag: Some("v2.0.0".to_string()),
        offline: true,
        ..ReleaseNotesArgs::default()
    };

    let result = run_release_notes_workflow(args, Config::default()).unwrap();
    assert!(result.markdown.starts_with("## v2.0.0 - "));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_workflow_without_api_key_fails() {
    let repo = sample_history();
    let args = ReleaseNotesArgs {
        repo_path: Some(repo.path()),
        ..ReleaseNotesArgs::default()
    };

    let err = run_release_notes_workflow(args, Config::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("OPENAI_API_KEY"));
}

#[test]
fn test_workflow_rejects_non_repository() {
    let dir = TempDir::new().unwrap();
    let args = ReleaseNotesArgs {
        repo_path: Some(dir.path().join("missing").to_string_lossy().into_owned()),
        offline: true,
        ..ReleaseNotesArgs::default()
    };

    let err = run_release_notes_workflow(args, Config::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("Repository access failed"));
}
