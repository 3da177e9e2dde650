//! Reasoning backend abstraction
//!
//! This module provides a pluggable architecture for the text-completion services
//! (OpenAI, Gemini) behind the stylist. The orchestrator only sees the
//! `CompletionBackend` trait; which adapter is wired in is decided once at startup
//! from configuration.
use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::Config,
    error::{AppError, AppResult},
};

pub mod gemini;
pub mod openai;

pub use gemini::GeminiBackend;
pub use openai::OpenAiBackend;

/// Failure while talking to a reasoning backend
///
/// Never leaves the stylist: every variant is a trigger for the rule engine fallback.
#[derive(thiserror::Error, Debug)]
pub enum BackendError {
    #[error("Backend transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Backend returned no completion")]
    EmptyResponse,
}

/// Trait for text-completion backends
///
/// Adapters own their HTTP clients and reuse them across calls. Both operations
/// send the same request; they differ only in how the caller waits for it.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Blocking completion
    ///
    /// Must not be called from inside an async runtime; use `complete_async` there.
    fn complete(&self, prompt: &str) -> Result<String, BackendError>;

    /// Non-blocking completion
    async fn complete_async(&self, prompt: &str) -> Result<String, BackendError>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Builds the configured backend, or `None` when no provider is selected
///
/// A selected provider without its credential, or an unknown provider, is a
/// deployment defect and fails startup.
pub fn from_config(config: &Config) -> AppResult<Option<Arc<dyn CompletionBackend>>> {
    let Some(provider) = config.provider() else {
        tracing::info!("No AI_PROVIDER configured, using rules engine only");
        return Ok(None);
    };

    let timeout = Duration::from_secs(config.backend_timeout_secs);

    let backend: Arc<dyn CompletionBackend> = match provider.as_str() {
        "openai" => {
            let api_key = require_key(&config.openai_api_key, "OPENAI_API_KEY", &provider)?;
            Arc::new(OpenAiBackend::new(
                api_key,
                config.openai_model.clone(),
                config.openai_api_url.clone(),
                timeout,
            )?)
        }
        "gemini" => {
            let api_key = require_key(&config.gemini_api_key, "GEMINI_API_KEY", &provider)?;
            Arc::new(GeminiBackend::new(
                api_key,
                config.gemini_model.clone(),
                config.gemini_api_url.clone(),
                timeout,
            )?)
        }
        other => {
            return Err(AppError::Configuration(format!(
                "Unknown AI_PROVIDER '{}', expected 'openai' or 'gemini'",
                other
            )))
        }
    };

    tracing::info!(
        provider = backend.name(),
        timeout_secs = config.backend_timeout_secs,
        "Reasoning backend configured"
    );

    Ok(Some(backend))
}

fn require_key(key: &Option<String>, var: &str, provider: &str) -> AppResult<String> {
    key.as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            AppError::Configuration(format!(
                "AI_PROVIDER={} requires {} to be set",
                provider, var
            ))
        })
}
