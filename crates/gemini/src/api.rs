//! Raw HTTP client for the Gemini `generateContent` endpoint.
//!
//! This layer knows nothing about retries or the user-facing error
//! taxonomy; it reports exactly what the wire said via
//! [`GeminiApiError`]. The [`client`](crate::client) module wraps it.

use serde_json::Value;

/// HTTP client for the Gemini REST API.
pub struct GeminiApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Errors from the raw API layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    /// The HTTP request itself failed (connect, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Gemini API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for classification and debugging.
        body: String,
    },
}

impl GeminiApi {
    /// Create a new API client.
    ///
    /// * `base_url` - e.g. `https://generativelanguage.googleapis.com`.
    /// * `api_key`  - sent as `x-goog-api-key` on every request.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Invoke `generateContent` once for the given model and prompt.
    ///
    /// Returns the concatenated candidate text, or `None` when the call
    /// succeeded but produced no text (the caller decides what that
    /// means).
    pub async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<Option<String>, GeminiApiError> {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{model}:generateContent",
                self.base_url
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let payload: Value = response.json().await?;
        Ok(extract_text(&payload))
    }

    /// Ensure the response has a success status code, otherwise capture
    /// the status and body text for classification.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GeminiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeminiApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// Pull the generated text out of a `generateContent` response body:
/// all `text` parts of the first candidate, concatenated.
fn extract_text(payload: &Value) -> Option<String> {
    let parts = payload
        .pointer("/candidates/0/content/parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_text_joins_candidate_parts() {
        let payload = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Hello " }, { "text": "world" }] }
            }]
        });
        assert_eq!(extract_text(&payload), Some("Hello world".to_string()));
    }

    #[test]
    fn extract_text_handles_missing_candidates() {
        assert_eq!(extract_text(&serde_json::json!({})), None);
        let empty_parts = serde_json::json!({
            "candidates": [{ "content": { "parts": [] } }]
        });
        assert_eq!(extract_text(&empty_parts), None);
    }
}
