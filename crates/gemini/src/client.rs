//! High-level generation client: default-model resolution, retry, and
//! failure classification.

use scriptflow_core::prompts;

use crate::api::GeminiApi;
use crate::error::{classify, GeminiError};
use crate::models::DEFAULT_MODEL;
use crate::retry::{with_retry, RetryConfig};

/// Official API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Explicit client configuration, constructed once at process start and
/// passed by reference into the components that generate text. No
/// ambient environment reads happen inside the client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key, sent as `x-goog-api-key`.
    pub api_key: String,
    /// Base URL of the API (overridable for tests).
    pub base_url: String,
    /// Model used when a caller supplies none.
    pub default_model: String,
    /// Backoff parameters for transient network failures.
    pub retry: RetryConfig,
}

impl GeminiConfig {
    /// Config with the official endpoint, the catalog default model, and
    /// the standard retry budget.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            retry: RetryConfig::default(),
        }
    }
}

/// Retrying text-generation client.
pub struct GeminiClient {
    api: GeminiApi,
    default_model: String,
    retry: RetryConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            api: GeminiApi::new(config.base_url, config.api_key),
            default_model: config.default_model,
            retry: config.retry,
        }
    }

    /// The supplied model id, or the configured default.
    fn resolve_model<'a>(&'a self, model: Option<&'a str>) -> &'a str {
        match model {
            Some(id) if !id.is_empty() => id,
            _ => &self.default_model,
        }
    }

    /// Generate text for a prompt.
    ///
    /// Transient network failures are retried with doubling delays up to
    /// the configured attempt budget; every other failure propagates
    /// immediately. A call that succeeds but yields empty or absent text
    /// fails with [`GeminiError::EmptyResult`].
    pub async fn generate_content(
        &self,
        prompt: &str,
        model: Option<&str>,
    ) -> Result<String, GeminiError> {
        let model = self.resolve_model(model);
        tracing::debug!(model, "Generating content");

        let text = with_retry(&self.retry, || self.api.generate_content(model, prompt))
            .await
            .map_err(|err| {
                tracing::error!(model, error = %err, "Generation call failed");
                classify(err, model)
            })?;

        match text {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(GeminiError::EmptyResult),
        }
    }

    /// Generate an English translation of a Chinese social-media script.
    ///
    /// Wraps the input in the fixed translation instruction and runs the
    /// same retry/classification pipeline as [`generate_content`](Self::generate_content).
    pub async fn generate_translation(
        &self,
        text: &str,
        model: Option<&str>,
    ) -> Result<String, GeminiError> {
        self.generate_content(&prompts::translate(text), model).await
    }
}
