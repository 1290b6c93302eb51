use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::domain::CommitType;
use crate::error::{ReleaseNotesError, Result};

/// Environment variable holding the completion service credential
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable holding the repository path
pub const REPO_PATH_ENV: &str = "REPO_PATH";

/// Represents the complete configuration for git-release-notes.
///
/// Built once at startup and handed to the generator; nothing reads the
/// environment after that.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,

    #[serde(default)]
    pub classification: ClassificationConfig,

    #[serde(default)]
    pub summarizer: SummarizerConfig,
}

fn default_repo_path() -> String {
    ".".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_max_commits() -> usize {
    100
}

/// Returns the default list of message prefixes that exclude a commit.
fn default_skip_prefixes() -> Vec<String> {
    vec!["Merge".to_string(), "chore(deps)".to_string()]
}

/// Where to read history from and how much of it.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RepositoryConfig {
    #[serde(default = "default_repo_path")]
    pub path: String,

    #[serde(default = "default_branch")]
    pub branch: String,

    #[serde(default = "default_max_commits")]
    pub max_commits: usize,

    #[serde(default = "default_skip_prefixes")]
    pub skip_prefixes: Vec<String>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            path: default_repo_path(),
            branch: default_branch(),
            max_commits: default_max_commits(),
            skip_prefixes: default_skip_prefixes(),
        }
    }
}

/// A single `(prefix, type)` classification rule
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ClassificationRule {
    pub prefix: String,
    pub kind: CommitType,
}

impl ClassificationRule {
    pub fn new(prefix: impl Into<String>, kind: CommitType) -> Self {
        ClassificationRule {
            prefix: prefix.into(),
            kind,
        }
    }
}

/// Returns the default ordered classification rules.
fn default_rules() -> Vec<ClassificationRule> {
    vec![
        ClassificationRule::new("feat:", CommitType::Feat),
        ClassificationRule::new("fix:", CommitType::Fix),
        ClassificationRule::new("docs:", CommitType::Docs),
        ClassificationRule::new("refactor:", CommitType::Refactor),
    ]
}

/// Ordered prefix rules; the first matching rule decides the commit type.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ClassificationConfig {
    #[serde(default = "default_rules")]
    pub rules: Vec<ClassificationRule>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        ClassificationConfig {
            rules: default_rules(),
        }
    }
}

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert in software release notes. \
Summarize this into a concise 1-line release note entry. \
Include issue references like (#123) if present";

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_temperature() -> f32 {
    0.2
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

/// Settings for the completion service.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SummarizerConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Abort the run on the first failed summary instead of falling back
    #[serde(default)]
    pub strict: bool,

    /// Only ever read from the environment, never from or to disk
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        SummarizerConfig {
            model: default_model(),
            api_base: default_api_base(),
            temperature: default_temperature(),
            system_prompt: default_system_prompt(),
            strict: false,
            api_key: None,
        }
    }
}

impl Config {
    /// Overlay environment settings (`OPENAI_API_KEY`, `REPO_PATH`).
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.is_empty()) {
            self.summarizer.api_key = Some(key);
        }
        if let Some(path) = lookup(REPO_PATH_ENV).filter(|p| !p.is_empty()) {
            self.repository.path = path;
        }
    }

    /// Checks values that serde cannot express as types.
    pub fn validate(&self) -> Result<()> {
        if self.repository.max_commits == 0 {
            return Err(ReleaseNotesError::config(
                "repository.max_commits must be greater than zero",
            ));
        }
        if self.repository.branch.trim().is_empty() {
            return Err(ReleaseNotesError::config("repository.branch is empty"));
        }
        if let Some(rule) = self.classification.rules.iter().find(|r| r.prefix.is_empty()) {
            return Err(ReleaseNotesError::config(format!(
                "classification rule for '{}' has an empty prefix",
                rule.kind
            )));
        }
        if !(0.0..=2.0).contains(&self.summarizer.temperature) {
            return Err(ReleaseNotesError::config(format!(
                "summarizer.temperature {} is outside 0.0..=2.0",
                self.summarizer.temperature
            )));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasenotes.toml` in current directory
/// 3. `.releasenotes.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// Environment overrides are not applied here; see [`Config::apply_env`].
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./releasenotes.toml").exists() {
        fs::read_to_string("./releasenotes.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".releasenotes.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| ReleaseNotesError::config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
