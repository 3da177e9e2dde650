//! OpenAI chat completions backend
//!
//! Requests JSON-mode completions so the reply is a bare JSON object matching the
//! prompt's response contract.
use std::sync::OnceLock;
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{BackendError, CompletionBackend};

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

pub struct OpenAiBackend {
    http_client: HttpClient,
    /// Built on the first blocking call so async-only deployments never create it
    blocking_client: OnceLock<reqwest::blocking::Client>,
    api_key: String,
    model: String,
    api_url: String,
    timeout: Duration,
}

impl OpenAiBackend {
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

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_url)
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": &self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
            "response_format": { "type": "json_object" }
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

    fn extract_text(response: ChatResponse) -> Result<String, BackendError> {
        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(BackendError::EmptyResponse)
    }
}

#[async_trait::async_trait]
impl CompletionBackend for OpenAiBackend {
    fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        let response = self
            .blocking_client()?
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(BackendError::Status { status, body });
        }

        let chat: ChatResponse = response.json()?;
        Self::extract_text(chat)
    }

    async fn complete_async(&self, prompt: &str) -> Result<String, BackendError> {
        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status { status, body });
        }

        let chat: ChatResponse = response.json().await?;

        tracing::debug!(
            model = %self.model,
            choices = chat.choices.len(),
            provider = "openai",
            "Completion received"
        );

        Self::extract_text(chat)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}
