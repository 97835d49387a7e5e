//! Hosted generative API client for document summarization

use crate::config::Config;
use crate::error::{Result, SummarizerError};
use crate::input::format::DocumentFormat;
use crate::llm::prompts::{parse_bullets, SUMMARY_PROMPT};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// External summarization collaborator: document bytes in, ordered bullet
/// lines out. The bullets are trimmed and non-empty.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, bytes: &[u8], format: DocumentFormat) -> Result<Vec<String>>;

    /// Model identifier reported in the summary output.
    fn model(&self) -> &str;
}

/// Client for the Gemini `generateContent` endpoint.
///
/// The document is sent inline (base64) together with the fixed instruction
/// prompt; the free-text response is split into bullet lines.
pub struct GeminiClient {
    api_key: String,
    model: String,
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: String,
        endpoint: String,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SummarizerError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            model,
            endpoint,
            client,
        })
    }

    /// Build a client from configuration. The API key comes from the config
    /// file or, preferably, the `GEMINI_API_KEY` environment variable.
    pub fn from_config(config: &Config, model_override: Option<String>) -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .or_else(|| config.summarizer.api_key.clone())
            .ok_or_else(|| {
                SummarizerError::Configuration(
                    "No API key configured; set GEMINI_API_KEY or summarizer.api_key".to_string(),
                )
            })?;

        let model = model_override.unwrap_or_else(|| config.summarizer.model.clone());

        Self::new(
            api_key,
            model,
            config.summarizer.endpoint.clone(),
            Duration::from_secs(config.summarizer.timeout_secs),
        )
    }

    fn build_request(&self, bytes: &[u8], format: DocumentFormat) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part {
                        inline_data: Some(InlineData {
                            mime_type: format.mime_type().to_string(),
                            data: STANDARD.encode(bytes),
                        }),
                        text: None,
                    },
                    Part {
                        inline_data: None,
                        text: Some(SUMMARY_PROMPT.to_string()),
                    },
                ],
            }],
        }
    }
}

#[async_trait]
impl Summarizer for GeminiClient {
    async fn summarize(&self, bytes: &[u8], format: DocumentFormat) -> Result<Vec<String>> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let request = self.build_request(bytes, format);

        log::debug!("Requesting summary from {} ({} bytes)", self.model, bytes.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizerError::Summarization(format!(
                "summarization API returned {}: {}",
                status, body
            )));
        }

        let response: GenerateContentResponse = response.json().await?;
        let text = response
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();

        let bullets = parse_bullets(&text);
        if bullets.is_empty() {
            return Err(SummarizerError::Summarization(
                "model returned no bullet points".to_string(),
            ));
        }

        Ok(bullets)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
