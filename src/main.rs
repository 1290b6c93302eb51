use anyhow::Result;
use clap::Parser;

use git_release_notes::cli::orchestration::{self, ReleaseNotesArgs};
use git_release_notes::{config, logging, ui};

#[derive(clap::Parser)]
#[command(
    name = "git-release-notes",
    version,
    about = "Generate Markdown release notes from conventional commits"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Path to the git repository [env: REPO_PATH]")]
    repo: Option<String>,

    #[arg(short, long, help = "Branch to read history from [default: main]")]
    branch: Option<String>,

    #[arg(long, help = "Only include commits after this tag")]
    base_tag: Option<String>,

    #[arg(short, long, help = "Version label for the release heading")]
    target_tag: Option<String>,

    #[arg(long, help = "Maximum number of commits to read [default: 100]")]
    max_commits: Option<usize>,

    #[arg(long, help = "Completion model identifier")]
    model: Option<String>,

    #[arg(long, help = "Base URL of an OpenAI-compatible API")]
    api_base: Option<String>,

    #[arg(long, help = "Fail instead of falling back when a summary request fails")]
    strict: bool,

    #[arg(long, help = "Use commit subjects instead of calling the completion service")]
    offline: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

impl From<&Args> for ReleaseNotesArgs {
    fn from(args: &Args) -> Self {
        ReleaseNotesArgs {
            repo_path: args.repo.clone(),
            branch: args.branch.clone(),
            base_tag: args.base_tag.clone(),
            target_tag: args.target_tag.clone(),
            max_commits: args.max_commits,
            model: args.model.clone(),
            api_base: args.api_base.clone(),
            strict: args.strict,
            offline: args.offline,
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    logging::setup_logger(args.verbose);

    // Load configuration
    let mut config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };
    config.apply_env();

    let result = match orchestration::run_release_notes_workflow((&args).into(), config) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_success(&ui::format_run_summary(
        result.commit_count,
        &result.issues,
    ));

    println!("{}", result.markdown);
    Ok(())
}
