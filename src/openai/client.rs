//! HTTP client for the OpenAI completions endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CompletionError;
use crate::openai::CompletionBackend;

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default completions model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";

/// Request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Fixed sampling parameters for commit-message completions.
///
/// Low-ish temperature for focused messages, short outputs, no penalties.
#[derive(Debug, Clone, Copy)]
pub struct SamplingParams {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.5,
            top_p: 1.0,
            max_tokens: 50,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    text: Option<String>,
}

/// Client for the `/completions` endpoint.
pub struct CompletionClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    params: SamplingParams,
}

impl CompletionClient {
    pub fn new(model: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            params: SamplingParams::default(),
        }
    }

    /// Override the API base URL (proxies, mock servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(
        &self,
        credential: &str,
        prompt: &str,
        count: u32,
    ) -> Result<Vec<String>, CompletionError> {
        let body = CompletionRequest {
            model: &self.model,
            prompt,
            n: count,
            temperature: self.params.temperature,
            top_p: self.params.top_p,
            max_tokens: self.params.max_tokens,
            frequency_penalty: self.params.frequency_penalty,
            presence_penalty: self.params.presence_penalty,
        };

        let url = self.endpoint();
        debug!(model = %self.model, n = count, "requesting completions");

        let response = self
            .http
            .post(&url)
            .bearer_auth(credential)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        debug!(%status, "completions response");

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(CompletionError::RateLimited);
        }

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = extract_api_message(&text).unwrap_or(text);
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        Ok(parsed
            .choices
            .into_iter()
            .filter_map(|choice| choice.text)
            .collect())
    }
}

/// Pull the human-readable message out of an API error body, if present.
///
/// Error bodies look like `{"error": {"message": "...", ...}}`.
fn extract_api_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(String::from)
}
