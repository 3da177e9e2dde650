//! Google Gemini `generateContent` backend
use std::sync::OnceLock;
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{BackendError, CompletionBackend};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

pub struct GeminiBackend {
    http_client: HttpClient,
    blocking_client: OnceLock<reqwest::blocking::Client>,
    api_key: String,
    model: String,
    api_url: String,
    timeout: Duration,
}

impl GeminiBackend {
    pub fn new(
        api_key: String,
        model: String,
        api_url: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            blocking_client: OnceLock::new(),
            api_key,
            model,
            api_url: api_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }

    fn request_body(prompt: &str) -> Value {
        json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        })
    }

    fn blocking_client(&self) -> Result<&reqwest::blocking::Client, BackendError> {
        if let Some(client) = self.blocking_client.get() {
            return Ok(client);
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        Ok(self.blocking_client.get_or_init(|| client))
    }

    /// Joins the text parts of the first candidate
    fn extract_text(response: GeminiResponse) -> Result<String, BackendError> {
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(BackendError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl CompletionBackend for GeminiBackend {
    fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        let response = self
            .blocking_client()?
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&Self::request_body(prompt))
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(BackendError::Status { status, body });
        }

        Self::extract_text(response.json()?)
    }

    async fn complete_async(&self, prompt: &str) -> Result<String, BackendError> {
        let response = self
            .http_client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&Self::request_body(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, body });
        }

        let result: GeminiResponse = response.json().await?;

        tracing::debug!(
            model = %self.model,
            candidates = result.candidates.len(),
            provider = "gemini",
            "Completion received"
        );

        Self::extract_text(result)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
