//! Main workflow orchestration logic
//!
//! Keeps `main.rs` down to argument parsing and output; everything between
//! a loaded [Config] and the rendered Markdown happens here.

use anyhow::{Context, Result};
use tracing::info;

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::conventional::Classifier;
use crate::generator::{GeneratorOptions, ReleaseNotesGenerator};
use crate::git::{Git2Repository, Repository};
use crate::summarizer::{OpenAiSummarizer, SubjectSummarizer, Summarizer};

/// Default label for the release heading when no target tag is given
pub const DEFAULT_TARGET_TAG: &str = "Unreleased";

/// Arguments for the release notes workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReleaseNotesArgs {
    /// Repository path; overrides config and `REPO_PATH`
    pub repo_path: Option<String>,

    /// Branch to read history from
    pub branch: Option<String>,

    /// Exclude history reachable from this tag
    pub base_tag: Option<String>,

    /// Version label for the heading
    pub target_tag: Option<String>,

    pub max_commits: Option<usize>,

    pub model: Option<String>,

    pub api_base: Option<String>,

    /// Abort on the first failed summary
    pub strict: bool,

    /// Skip the completion service and use commit subjects
    pub offline: bool,
}

impl ReleaseNotesArgs {
    /// Overlay command-line values on top of file and environment settings.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(path) = &self.repo_path {
            config.repository.path = path.clone();
        }
        if let Some(branch) = &self.branch {
            config.repository.branch = branch.clone();
        }
        if let Some(max) = self.max_commits {
            config.repository.max_commits = max;
        }
        if let Some(model) = &self.model {
            config.summarizer.model = model.clone();
        }
        if let Some(api_base) = &self.api_base {
            config.summarizer.api_base = api_base.clone();
        }
        if self.strict {
            config.summarizer.strict = true;
        }
    }
}

/// Result of a successful release notes run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The rendered Markdown
    pub markdown: String,

    /// Number of commits that made it into the notes
    pub commit_count: usize,

    /// Every issue referenced by the fetched commits
    pub issues: Vec<u64>,

    /// Non-fatal problems met along the way
    pub warnings: Vec<BoundaryWarning>,
}

/// Run the pipeline against any repository and summarizer.
pub fn run_with<R: Repository, S: Summarizer>(
    repo: R,
    summarizer: S,
    args: &ReleaseNotesArgs,
    config: &Config,
) -> Result<WorkflowResult> {
    let options = GeneratorOptions::from_config(
        config,
        args.base_tag.clone(),
        args.target_tag
            .clone()
            .unwrap_or_else(|| DEFAULT_TARGET_TAG.to_string()),
    );
    let classifier = Classifier::from_config(&config.repository, &config.classification);

    let mut generator = ReleaseNotesGenerator::new(repo, summarizer, classifier, options);
    let markdown = generator.run().context("Failed to generate release notes")?;

    Ok(WorkflowResult {
        markdown,
        commit_count: generator.commits().len(),
        issues: generator.issues().iter().copied().collect(),
        warnings: generator.warnings().to_vec(),
    })
}

/// Main release notes workflow
///
/// 1. Apply CLI overrides and validate the configuration
/// 2. Open the git repository
/// 3. Pick the summarizer (hosted service, or commit subjects offline)
/// 4. Fetch, preprocess, summarize and render
pub fn run_release_notes_workflow(
    args: ReleaseNotesArgs,
    mut config: Config,
) -> Result<WorkflowResult> {
    args.apply_to(&mut config);
    config.validate()?;

    info!("Reading history from {}", config.repository.path);
    let repo = Git2Repository::open(&config.repository.path)?;

    let summarizer: Box<dyn Summarizer> = if args.offline {
        Box::new(SubjectSummarizer)
    } else {
        Box::new(OpenAiSummarizer::new(&config.summarizer)?)
    };

    run_with(repo, summarizer, &args, &config)
}
