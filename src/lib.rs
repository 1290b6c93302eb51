pub mod analyzer;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod error;
pub mod generator;
pub mod git;
pub mod logging;
pub mod markdown;
pub mod summarizer;
pub mod ui;

pub use error::{ReleaseNotesError, Result};
pub use generator::{GeneratorOptions, ReleaseNotesGenerator};
