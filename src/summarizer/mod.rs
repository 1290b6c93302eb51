//! One-line summaries of commit messages
//!
//! [Summarizer] is the seam between the generator and the hosted completion
//! service. [OpenAiSummarizer] talks to any OpenAI-compatible endpoint;
//! [SubjectSummarizer] needs no network and is also what failed summaries
//! fall back to.

pub mod openai;

pub use openai::OpenAiSummarizer;

use crate::domain::subject_line;
use crate::error::Result;

/// Turns a raw commit message into a single release note line
pub trait Summarizer {
    fn summarize(&self, message: &str) -> Result<String>;
}

impl<S: Summarizer + ?Sized> Summarizer for &S {
    fn summarize(&self, message: &str) -> Result<String> {
        (**self).summarize(message)
    }
}

impl<S: Summarizer + ?Sized> Summarizer for Box<S> {
    fn summarize(&self, message: &str) -> Result<String> {
        (**self).summarize(message)
    }
}

/// Uses the message's subject line verbatim
#[derive(Debug, Clone, Copy, Default)]
pub struct SubjectSummarizer;

impl Summarizer for SubjectSummarizer {
    fn summarize(&self, message: &str) -> Result<String> {
        Ok(subject_line(message).to_string())
    }
}
