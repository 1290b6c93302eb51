use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::Summarizer;
use crate::config::{SummarizerConfig, API_KEY_ENV};
use crate::error::{ReleaseNotesError, Result};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Chat-completions client for OpenAI-compatible services
///
/// Sends exactly one blocking request per message. There is no retry; every
/// transport, status or decoding failure is returned as
/// [ReleaseNotesError::Summarization].
pub struct OpenAiSummarizer {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    system_prompt: String,
}

impl OpenAiSummarizer {
    /// Build a client from configuration; fails when no API key is set.
    pub fn new(config: &SummarizerConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            ReleaseNotesError::config(format!(
                "{} is not set; export it or run with --offline",
                API_KEY_ENV
            ))
        })?;

        Ok(OpenAiSummarizer {
            client: Client::new(),
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            system_prompt: config.system_prompt.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request<'a>(&'a self, message: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: message,
                },
            ],
            temperature: self.temperature,
        }
    }
}

/// Extract the trimmed text of the first choice from a completion body.
fn parse_completion(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body).map_err(|e| {
        ReleaseNotesError::summarization(format!("unexpected response body: {}", e))
    })?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| ReleaseNotesError::summarization("response contained no message content"))
}

impl Summarizer for OpenAiSummarizer {
    fn summarize(&self, message: &str) -> Result<String> {
        debug!("Requesting summary from {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request(message))
            .send()?;

        let status = response.status();
        let body = response.text()?;
        trace!("Completion response ({}): {}", status, body);

        if !status.is_success() {
            return Err(ReleaseNotesError::summarization(format!(
                "{} returned {}: {}",
                self.endpoint, status, body
            )));
        }

        parse_completion(&body)
    }
}
