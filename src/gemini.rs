//! Gemini API-backed collaborators.
//!
//! This module provides a classifier and a lexicon updater that delegate to
//! Google's `generateContent` endpoint and ask for a JSON answer.
//! Requires the `gemini` feature to be enabled.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use sentiment_compiler::gemini::{GeminiClassifier, GeminiClient};
//! use sentiment_compiler::pipeline::SentimentCompiler;
//!
//! # async fn example() -> sentiment_compiler::error::Result<()> {
//! let client = GeminiClient::from_env()?;
//! let compiler = SentimentCompiler::new(Arc::new(GeminiClassifier::new(client)));
//!
//! let report = compiler.analyze("The movie was extremely good and inspiring.").await?;
//! println!("{} ({})", report.sentiment.polarity, report.sentiment.score);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};
use crate::lexicon::{LexiconAck, LexiconEntry, LexiconUpdater};
use crate::sentiment::{ClassifierResponse, SentimentClassifier};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Model used when none is given.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Request structure for the generateContent endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

/// Response structure from the generateContent endpoint.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Minimal client for the Gemini generateContent API.
#[derive(Clone)]
pub struct GeminiClient {
    /// HTTP client for making API requests.
    client: Client,
    /// API key for authentication.
    api_key: String,
    /// Model name (e.g., "gemini-2.0-flash").
    model: String,
}

impl GeminiClient {
    /// Create a new client.
    pub fn new<K, M>(api_key: K, model: M) -> Result<Self>
    where
        K: Into<String>,
        M: Into<String>,
    {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SentimentError::config("Gemini API key is empty"));
        }
        Ok(Self {
            client: Client::new(),
            api_key,
            model: model.into(),
        })
    }

    /// Create a client using `GEMINI_API_KEY` and the default model.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| SentimentError::config(format!("{API_KEY_ENV} is not set")))?;
        Self::new(api_key, DEFAULT_MODEL)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a prompt and return the text of the first candidate.
    ///
    /// `fail` builds the error for every failure, so each collaborator reports
    /// through its own variant.
    async fn generate(
        &self,
        prompt: String,
        fail: fn(String) -> SentimentError,
    ) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        let url = format!("{API_BASE}/{}:generateContent", self.model);
        debug!("POST {url}");

        let http_response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| fail(format!("Gemini API request failed: {e}")))?;

        let status = http_response.status();
        let response_text = http_response
            .text()
            .await
            .map_err(|e| fail(format!("Failed to read response text: {e}")))?;

        if !status.is_success() {
            return Err(fail(format!(
                "Gemini API error (status {status}): {response_text}"
            )));
        }

        first_candidate_text(&response_text, fail)
    }
}

/// Extract the text of the first candidate from a generateContent response.
fn first_candidate_text(
    response_text: &str,
    fail: fn(String) -> SentimentError,
) -> Result<String> {
    let response: GenerateResponse = serde_json::from_str(response_text).map_err(|e| {
        fail(format!(
            "Failed to parse Gemini response: {e}. Response text: {response_text}"
        ))
    })?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .map(|p| p.text)
        .ok_or_else(|| fail("No candidate text in Gemini response".to_string()))
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

fn classification_prompt(tokens: &[String]) -> String {
    format!(
        "You are a sentiment analysis expert. Your task is to determine the sentiment \
         polarity of a sentence based on the provided lexical tokens.\n\n\
         Given the following tokens: {}\n\n\
         Determine the sentiment polarity (Positive, Negative, or Neutral) and calculate an \
         overall sentiment score between -1 and 1.\n\
         - A score greater than 0.3 should be considered \"Positive\".\n\
         - A score less than -0.3 should be considered \"Negative\".\n\
         - Any score between -0.3 and 0.3 (inclusive) should be considered \"Neutral\".\n\n\
         Respond with a JSON object with the keys \"sentimentPolarity\" and \"sentimentScore\".",
        tokens.join(", ")
    )
}

fn lexicon_prompt(entry: &LexiconEntry) -> String {
    format!(
        "You are a sentiment lexicon manager. The user wants to update the lexicon with the \
         following word and sentiment score:\n\n\
         Word: {}\n\
         Sentiment Score: {}\n\n\
         Respond with a JSON object with the keys \"success\" (boolean) and \"message\" \
         (string). The message should acknowledge the update.",
        entry.word, entry.score
    )
}

/// Semantic classifier backed by Gemini.
#[derive(Debug, Clone)]
pub struct GeminiClassifier {
    client: GeminiClient,
}

impl GeminiClassifier {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SentimentClassifier for GeminiClassifier {
    async fn classify(&self, tokens: &[String]) -> Result<ClassifierResponse> {
        let text = self
            .client
            .generate(
                classification_prompt(tokens),
                SentimentError::ClassifierUnavailable,
            )
            .await?;
        ClassifierResponse::from_json(&text)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Lexicon updater backed by Gemini.
#[derive(Debug, Clone)]
pub struct GeminiLexiconUpdater {
    client: GeminiClient,
}

impl GeminiLexiconUpdater {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LexiconUpdater for GeminiLexiconUpdater {
    async fn update(&self, entry: &LexiconEntry) -> Result<LexiconAck> {
        let text = self
            .client
            .generate(lexicon_prompt(entry), SentimentError::InvalidOperation)
            .await?;
        serde_json::from_str(&text).map_err(|e| {
            SentimentError::InvalidOperation(format!(
                "Malformed lexicon acknowledgment: {e}. Response text: {text}"
            ))
        })
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
